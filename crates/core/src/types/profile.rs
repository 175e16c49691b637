//! User profile metadata and the names derived from it.

use serde::{Deserialize, Serialize};

use crate::types::email::Email;

/// Profile fields kept in the authentication service's user metadata.
///
/// The service stores whatever the profile form last sent, which includes
/// empty strings for fields the user left blank. Empty and whitespace-only
/// values are read as "not set".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserMetadata {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub role: Option<String>,
}

impl UserMetadata {
    /// Build metadata from the four profile form fields.
    #[must_use]
    pub fn from_form(full_name: &str, phone: &str, company: &str, role: &str) -> Self {
        Self {
            full_name: non_blank(full_name),
            phone: non_blank(phone),
            company: non_blank(company),
            role: non_blank(role),
        }
    }

    /// Payload for a metadata update: all four keys, empty string when unset.
    #[must_use]
    pub fn to_update_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "full_name": self.full_name.as_deref().unwrap_or_default(),
            "phone": self.phone.as_deref().unwrap_or_default(),
            "company": self.company.as_deref().unwrap_or_default(),
            "role": self.role.as_deref().unwrap_or_default(),
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(non_blank))
}

/// Name shown in the header: the full name if set, else the email local part.
#[must_use]
pub fn display_name(metadata: &UserMetadata, email: &Email) -> String {
    metadata
        .full_name
        .clone()
        .unwrap_or_else(|| email.local_part().to_owned())
}

/// Avatar initials: first letters of up to two words of the display name.
///
/// Falls back to the first letter of the email when the display name has no words.
#[must_use]
pub fn initials(display_name: &str, email: &Email) -> String {
    let letters: String = display_name
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    if letters.is_empty() {
        email.initial()
    } else {
        letters
    }
}
