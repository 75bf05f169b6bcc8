use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::error::IntentError;

/// A media-management service a request can be routed to.
///
/// Declaration order matters: it breaks ties when two services score the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Sonarr,
    Radarr,
    Prowlarr,
    Bazarr,
    Overseerr,
    Plex,
}

impl Service {
    /// Every service, in declaration order.
    pub const ALL: [Service; 6] = [
        Service::Sonarr,
        Service::Radarr,
        Service::Prowlarr,
        Service::Bazarr,
        Service::Overseerr,
        Service::Plex,
    ];

    /// Lowercase wire name (e.g. "sonarr").
    pub fn as_str(self) -> &'static str {
        match self {
            Service::Sonarr => "sonarr",
            Service::Radarr => "radarr",
            Service::Prowlarr => "prowlarr",
            Service::Bazarr => "bazarr",
            Service::Overseerr => "overseerr",
            Service::Plex => "plex",
        }
    }

    /// Capitalized name used in human-readable output (e.g. "Sonarr").
    pub fn display_name(self) -> &'static str {
        match self {
            Service::Sonarr => "Sonarr",
            Service::Radarr => "Radarr",
            Service::Prowlarr => "Prowlarr",
            Service::Bazarr => "Bazarr",
            Service::Overseerr => "Overseerr",
            Service::Plex => "Plex",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Lookup table for service names. Keys are lowercase.
static NAMES: phf::Map<&'static str, Service> = phf_map! {
    "sonarr" => Service::Sonarr,
    "radarr" => Service::Radarr,
    "prowlarr" => Service::Prowlarr,
    "bazarr" => Service::Bazarr,
    "overseerr" => Service::Overseerr,
    "plex" => Service::Plex,
};

impl FromStr for Service {
    type Err = IntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMES
            .get(s.trim().to_lowercase().as_str())
            .copied()
            .ok_or_else(|| IntentError::UnknownService(s.to_string()))
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
