use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A bookable event as supplied by the catalog. Read-only to this service.
///
/// The catalog owns the row layout, so every column is kept exactly as it
/// arrived (types included) and the fields the matcher needs are read
/// through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventRecord(Map<String, Value>);

impl EventRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn id(&self) -> &Value {
        self.0.get("id").unwrap_or(&Value::Null)
    }

    pub fn event_name(&self) -> Option<&Value> {
        self.0.get("eventName").filter(|v| !v.is_null())
    }

    pub fn event_date(&self) -> Option<&Value> {
        self.0.get("eventDate").filter(|v| !v.is_null())
    }

    /// Text the matcher compares against: the name, else the date.
    pub fn label(&self) -> String {
        match self.event_name().or_else(|| self.event_date()) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }
}
