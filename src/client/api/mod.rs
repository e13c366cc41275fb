//! API trait definitions split by responsibility
//!
//! - [`ListingApi`] - read operations (resources, applications, vulnerabilities)
//! - [`ApplicationApi`] - per-application writes (create, exclusions, scans)
//!
//! The [`SentinelApi`](super::SentinelApi) super-trait combines both.

mod application;
mod listing;

pub use application::ApplicationApi;
pub use listing::ListingApi;
