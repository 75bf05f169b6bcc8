use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::error::IntentError;

/// The kind of action a request asks a service to perform.
///
/// Declaration order breaks ties between equally scored operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Search,
    Add,
    Delete,
    Update,
    List,
    Get,
    Configure,
    Monitor,
    Download,
    Request,
    Approve,
    Sync,
    Backup,
    Play,
    Scan,
    Refresh,
    Watch,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 17] = [
        Operation::Search,
        Operation::Add,
        Operation::Delete,
        Operation::Update,
        Operation::List,
        Operation::Get,
        Operation::Configure,
        Operation::Monitor,
        Operation::Download,
        Operation::Request,
        Operation::Approve,
        Operation::Sync,
        Operation::Backup,
        Operation::Play,
        Operation::Scan,
        Operation::Refresh,
        Operation::Watch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Search => "search",
            Operation::Add => "add",
            Operation::Delete => "delete",
            Operation::Update => "update",
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Configure => "configure",
            Operation::Monitor => "monitor",
            Operation::Download => "download",
            Operation::Request => "request",
            Operation::Approve => "approve",
            Operation::Sync => "sync",
            Operation::Backup => "backup",
            Operation::Play => "play",
            Operation::Scan => "scan",
            Operation::Refresh => "refresh",
            Operation::Watch => "watch",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Operation::Search => "Search",
            Operation::Add => "Add",
            Operation::Delete => "Delete",
            Operation::Update => "Update",
            Operation::List => "List",
            Operation::Get => "Get",
            Operation::Configure => "Configure",
            Operation::Monitor => "Monitor",
            Operation::Download => "Download",
            Operation::Request => "Request",
            Operation::Approve => "Approve",
            Operation::Sync => "Sync",
            Operation::Backup => "Backup",
            Operation::Play => "Play",
            Operation::Scan => "Scan",
            Operation::Refresh => "Refresh",
            Operation::Watch => "Watch",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

static NAMES: phf::Map<&'static str, Operation> = phf_map! {
    "search" => Operation::Search,
    "add" => Operation::Add,
    "delete" => Operation::Delete,
    "update" => Operation::Update,
    "list" => Operation::List,
    "get" => Operation::Get,
    "configure" => Operation::Configure,
    "monitor" => Operation::Monitor,
    "download" => Operation::Download,
    "request" => Operation::Request,
    "approve" => Operation::Approve,
    "sync" => Operation::Sync,
    "backup" => Operation::Backup,
    "play" => Operation::Play,
    "scan" => Operation::Scan,
    "refresh" => Operation::Refresh,
    "watch" => Operation::Watch,
};

impl FromStr for Operation {
    type Err = IntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMES
            .get(s.trim().to_lowercase().as_str())
            .copied()
            .ok_or_else(|| IntentError::UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
