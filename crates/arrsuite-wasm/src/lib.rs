use arrsuite_intent::default_engine;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn parse_intent(query: &str) -> String {
    let intent = default_engine().parse_intent(query);
    serde_json::to_string(&intent).unwrap_or_else(|_| "{}".to_string())
}

#[wasm_bindgen]
pub fn explain_intent(query: &str) -> String {
    default_engine().explain_intent(query)
}
