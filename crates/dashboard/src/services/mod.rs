//! Collaborators the screens talk to.
//!
//! # Services
//!
//! - `auth` - Authentication service contract and the GoTrue client
//! - `accounts` - Ad account accessor contract (implemented in [`crate::db`])

pub mod accounts;
pub mod auth;

pub use accounts::AccountStore;
pub use auth::{
    AuthClientError, AuthFailure, AuthResult, AuthService, AuthSession, AuthUser,
    GoTrueAuthService,
};
