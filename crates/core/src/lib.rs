//! SADDLE Core - Shared domain types.
//!
//! This crate provides the types shared by the SADDLE components:
//! - `dashboard` - Web dashboard (auth screens, account settings)
//! - `cli` - Command-line tools for migrations and ad account management
//!
//! # Architecture
//!
//! The core crate contains only types and pure rules - no I/O, no database
//! access, no HTTP clients. Everything here is safe to call from a render
//! path or a test without any collaborator in place.
//!
//! # Modules
//!
//! - [`types`] - Emails, ad accounts, user profile metadata, settings state
//!   enums and password rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
