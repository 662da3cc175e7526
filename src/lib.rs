//! Academic records portal
//!
//! In-memory courses, results, registrations and announcements behind a
//! role-based session, plus the derived metrics and text views the
//! `uniportal` CLI shows.

pub mod core;
pub mod logger;

pub use core::config;
pub use core::get_version;
pub use core::portal::{Portal, PortalError};
