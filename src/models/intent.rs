use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;

/// Booking verb requested by the user.
///
/// The model is asked for one of `book`, `cancel` or `view`, but anything else
/// it emits is carried through verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Book,
    Cancel,
    View,
    Other(String),
}

impl Intent {
    pub fn as_str(&self) -> &str {
        match self {
            Intent::Book => "book",
            Intent::Cancel => "cancel",
            Intent::View => "view",
            Intent::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "book" => Intent::Book,
            "cancel" => Intent::Cancel,
            "view" => Intent::View,
            other => Intent::Other(other.to_string()),
        }
    }
}

impl Serialize for Intent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Intent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Intent::parse(&s))
    }
}

/// What the model understood from the user's prompt. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedIntent {
    pub intent: Option<Intent>,
    pub event: Option<String>,
    /// Kept as the model wrote it; `2.5` stays `2.5`.
    pub tickets: Option<Number>,
}
