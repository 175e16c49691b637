//! Domain models for the dashboard.

pub mod session;

pub use session::{ActiveAccount, ReportCache, SessionContext, UploadStatus, keys as session_keys};
