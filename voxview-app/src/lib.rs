//! Asset viewer core.
//!
//! Resolves an asset name to a category (sniffing `.pb` containers over
//! HTTP), keeps exactly one render session alive for it and drives that
//! session's frame loop.

pub mod app;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod errors;
pub mod fetch;
pub mod headless;
pub mod sessions;
pub mod sniffer;
pub mod ui;
pub mod viewer;

#[cfg(test)]
mod testing;

pub use app::{AppBuilder, RunReport};
pub use classifier::{Classification, FormatClassifier};
pub use config::{LoggingConfig, ServerConfig};
pub use errors::{ClassifyError, ConfigError, FetchError, ViewerError};
pub use fetch::{HttpFetcher, PayloadFetcher};
pub use headless::{HeadlessHost, HostExit};
pub use sessions::{TraceSession, TraceSessionFactory};
pub use sniffer::ContainerSniffer;
pub use ui::{PresentationMode, RootUi, TracingRootUi};
pub use viewer::{Viewer, ViewerStatus};
