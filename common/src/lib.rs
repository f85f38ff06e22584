//! Types and logic shared by the console backend and frontend.
//!
//! - `model`: flat record shapes exchanged with the clinic backend.
//! - `client`: the `ResourceClient` contract, request payloads and client errors.
//! - `form`: the doctor form state holder and its validation rules.
//! - `workflow`: the doctor ↔ direction submission orchestrator.
//! - `filter`: local filtering and pagination of already-fetched lists.
//! - `requests`: request/response bodies of the console's own routes.

pub mod client;
pub mod filter;
pub mod form;
pub mod model;
pub mod requests;
pub mod workflow;
