//! The seam between submission handling and the network.

use std::future::Future;

use crate::error::Result;
use crate::request::AnalysisRequest;

/// Something that can run an analysis and hand back the raw response body.
///
/// [`ApiClient`](crate::ApiClient) is the production implementation; tests
/// substitute an in-memory backend.
pub trait Backend {
    /// Send `request` and return the raw 2xx body.
    fn analyze(&self, request: &AnalysisRequest) -> impl Future<Output = Result<Vec<u8>>> + Send;
}
