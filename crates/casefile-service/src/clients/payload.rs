//! Write request payloads.
//!
//! The partial-update payload distinguishes a field that is absent (leave
//! the stored value untouched) from a field explicitly set to `null`
//! (clear it), so every patchable field is a double `Option`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Payload for create and full update. `status_code` is mandatory; the
/// other reference codes clear the relation when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientPayload {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub status_code: String,
    #[serde(default)]
    pub primary_language_code: Option<String>,
    #[serde(default)]
    pub pronoun_code: Option<String>,
    #[serde(default)]
    pub sex_code: Option<String>,
    #[serde(default)]
    pub interpreter_needed: bool,
}

/// Payload for partial update. Outer `None` means the field was not sent;
/// `Some(None)` means it was sent as an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub date_of_birth: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub status_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub primary_language_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub pronoun_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub sex_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub interpreter_needed: Option<Option<bool>>,
}

impl ClientPatch {
    /// An empty patch is an accepted no-op: the existing record is
    /// returned and nothing is written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.date_of_birth.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.status_code.is_none()
            && self.primary_language_code.is_none()
            && self.pronoun_code.is_none()
            && self.sex_code.is_none()
            && self.interpreter_needed.is_none()
    }
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
