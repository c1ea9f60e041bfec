//! Library components of the Matrix command-line client.

pub mod logging;
pub mod media;
pub mod render;
