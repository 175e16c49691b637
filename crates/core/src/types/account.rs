//! Ad account types.
//!
//! An ad account is identified by an [`AccountId`] derived from its display
//! name, so the same name always maps to the same id and a second account
//! with an equivalent name is a duplicate.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors that can occur when validating an [`AccountId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountIdError {
    /// Nothing left once the name was normalized.
    #[error("account name must contain letters or numbers")]
    Empty,
    /// The value is not in normalized form.
    #[error("account id '{0}' is not normalized")]
    NotNormalized(String),
}

/// Identifier of an ad account.
///
/// Always in normalized form: lower-case alphanumerics and underscores.
///
/// ```
/// use saddle_core::AccountId;
///
/// assert_eq!(AccountId::derive("My Brand!").unwrap().as_str(), "my_brand");
/// assert_eq!(AccountId::derive("Acme-Corp").unwrap().as_str(), "acme_corp");
/// assert!(AccountId::derive("!!!").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Derive the id for an account name.
    ///
    /// Lower-cases the name, turns spaces and hyphens into underscores and
    /// drops every character that is neither alphanumeric nor an underscore.
    ///
    /// # Errors
    ///
    /// Returns [`AccountIdError::Empty`] when nothing survives normalization.
    pub fn derive(name: &str) -> Result<Self, AccountIdError> {
        let id = normalize(name);
        if id.is_empty() {
            return Err(AccountIdError::Empty);
        }
        Ok(Self(id))
    }

    /// Accept an id that is already in normalized form (e.g. read back from storage).
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty or would change under [`AccountId::derive`].
    pub fn parse(value: &str) -> Result<Self, AccountIdError> {
        if value.is_empty() {
            return Err(AccountIdError::Empty);
        }
        if normalize(value) != value {
            return Err(AccountIdError::NotNormalized(value.to_owned()));
        }
        Ok(Self(value.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Error returned when a string does not name a known enum variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// What an ad account represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// An own brand.
    #[default]
    Brand,
    /// A client managed by an agency.
    Client,
    /// A marketplace seller account.
    Marketplace,
    /// Sandbox account for trying things out.
    Test,
}

impl AccountType {
    /// All variants, in form order.
    pub const ALL: [Self; 4] = [Self::Brand, Self::Client, Self::Marketplace, Self::Test];

    /// Stored / submitted representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Client => "client",
            Self::Marketplace => "marketplace",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "account type",
                value: s.to_owned(),
            })
    }
}

/// Reporting currency of an ad account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Aed,
    Sar,
    Gbp,
    Eur,
    Inr,
}

impl Currency {
    /// All supported currencies, in form order.
    pub const ALL: [Self; 6] = [
        Self::Usd,
        Self::Aed,
        Self::Sar,
        Self::Gbp,
        Self::Eur,
        Self::Inr,
    ];

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Aed => "AED",
            Self::Sar => "SAR",
            Self::Gbp => "GBP",
            Self::Eur => "EUR",
            Self::Inr => "INR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError {
                kind: "currency",
                value: s.to_owned(),
            })
    }
}

/// Optional details recorded with an ad account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AccountMetadata {
    /// Marketplace the account sells on, e.g. "Amazon US".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketplace: Option<String>,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AccountMetadata {
    /// Build metadata from raw form values; blank text becomes `None`.
    #[must_use]
    pub fn from_form(marketplace: &str, currency: Currency, notes: &str) -> Self {
        Self {
            marketplace: non_blank(marketplace),
            currency,
            notes: non_blank(notes),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// An ad account as listed in settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdAccount {
    pub id: AccountId,
    pub name: String,
    pub account_type: AccountType,
    #[serde(default)]
    pub metadata: AccountMetadata,
}
