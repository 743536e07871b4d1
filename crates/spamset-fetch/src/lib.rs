//! HTTP downloading with staged, atomic placement.
//!
//! # Architecture
//!
//! - [`data`] - Options, timeouts and progress snapshots
//! - [`effects`] - I/O operations behind the [`HttpClient`] trait
//!
//! # Key Features
//!
//! - **Staged**: the body streams into a temp file beside the destination and
//!   is renamed into place only when complete
//! - **Mechanism-Only**: no retries; the caller decides what a failure means

pub mod data;
pub mod effects;
mod error;

pub use data::{FetchOptions, FetchPhase, Progress, ProgressCallback, Timeouts};
pub use effects::{BoxStream, Fetcher, HttpClient};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{FetchError, Result};
