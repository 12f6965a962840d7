//! Application wiring with builder pattern.

use crate::classifier::FormatClassifier;
use crate::config::{LoggingConfig, ServerConfig};
use crate::constants::DEFAULT_FRAME_INTERVAL;
use crate::fetch::{HttpFetcher, PayloadFetcher};
use crate::headless::{HeadlessHost, HostExit};
use crate::sniffer::ContainerSniffer;
use crate::viewer::{Viewer, ViewerStatus};
use serde::Serialize;
use std::error::Error;
use std::rc::Rc;
use std::time::Duration;
use tracing::info;
use voxview_data::{AssetCategory, AssetReference};
use voxview_window::{MountPoints, PendingFrame};

/// Outcome of one run, printed by the binary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub name: String,
    pub category: AssetCategory,
    pub status: ViewerStatus,
    pub host_frames: u64,
}

/// Builder for configuring and running the viewer.
pub struct AppBuilder {
    server: ServerConfig,
    mounts: MountPoints,
    logging: LoggingConfig,
    frame_interval: Duration,
    frame_limit: Option<u64>,
    spin: Option<f32>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            server: ServerConfig::default(),
            mounts: MountPoints::default(),
            logging: LoggingConfig::default(),
            frame_interval: DEFAULT_FRAME_INTERVAL,
            frame_limit: None,
            spin: None,
        }
    }

    pub fn with_server(mut self, server: ServerConfig) -> Self {
        self.server = server;
        self
    }

    pub fn with_mounts(mut self, mounts: MountPoints) -> Self {
        self.mounts = mounts;
        self
    }

    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging = config;
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Stop after this many host frames. `None` runs until Ctrl-C.
    pub fn with_frame_limit(mut self, limit: Option<u64>) -> Self {
        self.frame_limit = limit;
        self
    }

    pub fn with_spin(mut self, pixels: Option<f32>) -> Self {
        self.spin = pixels;
        self
    }

    /// Classifier backed by `fetcher` and the configured server.
    pub fn classifier(&self, fetcher: Rc<dyn PayloadFetcher>) -> FormatClassifier {
        FormatClassifier::new(ContainerSniffer::new(fetcher, self.server.clone()))
    }

    /// Viewer that reports frame requests to `frames`.
    pub fn viewer(&self, fetcher: Rc<dyn PayloadFetcher>, frames: &PendingFrame) -> Viewer {
        Viewer::new(self.classifier(fetcher))
            .with_mounts(self.mounts.clone())
            .with_scheduler(Rc::new(frames.clone()))
    }

    pub fn host(&self) -> HeadlessHost {
        HeadlessHost::new(self.frame_interval)
            .with_frame_limit(self.frame_limit)
            .with_spin(self.spin)
    }

    /// Set up logging, then load `name` and drive it headlessly.
    pub fn run(self, name: &str) -> Result<RunReport, Box<dyn Error>> {
        self.init_logging();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.view(Rc::new(HttpFetcher::new()), name))
    }

    /// Set up logging, then only classify `name`.
    pub fn run_classify(self, name: &str) -> Result<crate::Classification, Box<dyn Error>> {
        self.init_logging();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let classifier = self.classifier(Rc::new(HttpFetcher::new()));
        let classification = runtime.block_on(classifier.describe(&AssetReference::new(name)))?;
        Ok(classification)
    }

    /// Load `name` into a fresh viewer and drive frames until the host exits.
    pub async fn view(
        &self,
        fetcher: Rc<dyn PayloadFetcher>,
        name: &str,
    ) -> Result<RunReport, Box<dyn Error>> {
        let frames = PendingFrame::new();
        let mut viewer = self.viewer(fetcher, &frames);
        let category = viewer.load(name).await?;

        let (exit, host_frames) = self.host().run(&mut viewer, &frames).await?;
        if exit == HostExit::Interrupted {
            info!("Stopping on interrupt");
        }

        let report = RunReport {
            name: name.to_string(),
            category,
            status: viewer.status(),
            host_frames,
        };
        viewer.teardown();
        Ok(report)
    }

    fn init_logging(&self) {
        #[cfg(feature = "tracy")]
        {
            if self.logging.enable_tracy {
                use tracing_subscriber::Layer;
                use tracing_subscriber::layer::SubscriberExt;
                use tracing_subscriber::util::SubscriberInitExt;
                tracing_subscriber::registry()
                    .with(tracing_tracy::TracyLayer::default())
                    .with(
                        tracing_subscriber::fmt::layer().with_target(false).with_filter(
                            tracing_subscriber::EnvFilter::try_from_default_env()
                                .unwrap_or_else(|_| self.logging.level.clone().into()),
                        ),
                    )
                    .init();
                return;
            }
        }

        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&self.logging.level)),
            )
            .with_target(false)
            .init();
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
