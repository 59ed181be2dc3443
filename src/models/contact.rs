//! Contact form models.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Request body of the contact form.
///
/// `agreed` is kept as a raw JSON value so that a non-boolean (e.g. the
/// string `"true"`) can be rejected instead of coerced.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub agreed: Option<Value>,
}

/// A contact submission that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub agreed_to_policy: bool,
}

impl Contact {
    /// Store fields for the `Contacts` table.
    pub fn into_fields(self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("Firstname".into(), Value::String(self.first_name));
        map.insert("Lastname".into(), Value::String(self.last_name));
        map.insert("Email".into(), Value::String(self.email));
        map.insert("Phone".into(), Value::String(self.phone));
        map.insert("Message".into(), Value::String(self.message));
        map.insert(
            "AcceptOurPrivacyPolicy".into(),
            Value::Bool(self.agreed_to_policy),
        );
        map
    }
}
