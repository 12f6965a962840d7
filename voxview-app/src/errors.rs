//! Error types for the viewer.

use std::time::Duration;
use thiserror::Error;
use voxview_data::DecodeError;
use voxview_window::{LoopError, SessionError, ViewportError};

/// Errors in the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid server URL {url:?}: {reason}")]
    InvalidServerUrl { url: String, reason: String },
}

/// Errors raised while fetching a payload.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// Errors that prevent an asset from being classified.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Fetching {name} timed out after {after:?}")]
    Timeout { name: String, after: Duration },

    #[error("Container {name} could not be decoded: {source}")]
    Decode {
        name: String,
        #[source]
        source: DecodeError,
    },
}

/// Errors reported by the viewer for a load attempt.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    #[error("Unsupported asset: {name}")]
    Unsupported { name: String },

    #[error("Container {name} holds neither sparse-voxel nor voxel content")]
    EmptyContainer { name: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Container {name} was not resolved to a concrete category")]
    UnresolvedContainer { name: String },

    #[error("Viewport error: {0}")]
    Viewport(#[from] ViewportError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Render loop error: {0}")]
    Loop(#[from] LoopError),
}
