use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of the dashboard POST: `{"category": "..."}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryRequest {
    pub category: String,
}

impl CategoryRequest {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}

/// What the dashboard answers with. Only `redirect_url` is understood;
/// everything else is kept for logging.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct DashboardResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DashboardResponse {
    /// Returns the navigation target if `redirect_url` is truthy.
    ///
    /// Falsy: missing, `null`, `false`, `0`, `""`. A non-string truthy value
    /// is coerced to text the way a browser assigning it to a location would.
    pub fn redirect_target(&self) -> Option<String> {
        let value = self.redirect_url.as_ref()?;
        match value {
            Value::Null => None,
            Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::Number(n) => {
                warn!("redirect_url is a number ({n}), using its text form");
                Some(n.to_string())
            }
            Value::Bool(true) => {
                warn!("redirect_url is `true`, using its text form");
                Some("true".to_string())
            }
            Value::Array(_) | Value::Object(_) => {
                warn!("redirect_url is not a string, ignoring: {value}");
                None
            }
        }
    }
}
