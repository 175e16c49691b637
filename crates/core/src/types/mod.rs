//! Core types for SADDLE.
//!
//! This module provides type-safe wrappers for the dashboard's domain concepts.

pub mod account;
pub mod email;
pub mod password;
pub mod profile;
pub mod status;

pub use account::{
    AccountId, AccountIdError, AccountMetadata, AccountType, AdAccount, Currency, ParseEnumError,
};
pub use email::{Email, EmailError};
pub use password::{MIN_PASSWORD_LENGTH, PasswordError, check_new_password};
pub use profile::{UserMetadata, display_name, initials};
pub use status::{SettingsTab, ThemeMode};
