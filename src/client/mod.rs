//! WhiteHat Sentinel API client

pub mod api;
pub mod batch;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod sentinel;
pub mod url;

pub use api::{ApplicationApi, ListingApi};
#[cfg(test)]
pub use mock::MockSentinelClient;
pub use models::{Application, RepoDescriptor, Vulnerability};
pub use sentinel::SentinelClient;

/// Full Sentinel API surface: listing plus application writes.
///
/// Blanket-implemented for anything implementing both sub-traits, so batch
/// operations can take `&impl SentinelApi` and run against the real client
/// or the test mock alike.
pub trait SentinelApi: ListingApi + ApplicationApi {}

impl<T: ListingApi + ApplicationApi> SentinelApi for T {}
