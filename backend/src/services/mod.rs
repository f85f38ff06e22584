//! HTTP routes of the console, all under `/api`.
//!
//! - `auth`: login relay with a bounded wait.
//! - `dashboard`: aggregated record counts.
//! - `resources`: per-resource relays to the clinic backend, including the
//!   doctor form and the doctor ↔ direction link endpoints.
//!
//! `resources` claims the whole `/api` prefix, so it must be registered last.

pub mod auth;
pub mod dashboard;
pub mod resources;
