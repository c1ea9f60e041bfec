//! HTTP client for the Matrix verification backend.
//!
//! - [`ApiClient`] posts files (multipart) and text (JSON) to the analysis
//!   endpoints and returns raw bodies for the normalizer.
//! - [`GameClient`] drives the spot-the-fake game.
//! - [`Backend`] abstracts the analysis call so it can be mocked.

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod game;
pub mod request;

pub use backend::Backend;
pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, has_http_scheme};
pub use error::{ClientError, Result};
pub use game::GameClient;
pub use request::{AnalysisRequest, Payload};
