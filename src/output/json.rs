//! JSON rendering for machine consumers

use serde::Serialize;

/// Serializes any output payload as pretty-printed JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
