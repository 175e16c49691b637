//! SADDLE dashboard library.
//!
//! Authentication screens and account settings, served with axum. The screen
//! logic in [`screens`] is independent of HTTP and talks to the outside world
//! only through the [`services::AuthService`] and [`services::AccountStore`]
//! traits.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod screens;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
