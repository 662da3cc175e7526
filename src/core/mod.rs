//! Core portal functionality: data model, stores, metrics and views

pub mod config;
pub mod events;
pub mod fixtures;
pub mod grades;
pub mod ids;
pub mod metrics;
pub mod models;
pub mod portal;
pub mod report;
pub mod session;
pub mod store;

/// Returns the current version of the `uni-portal` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
