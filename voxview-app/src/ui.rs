//! Root UI contract.

use serde::Serialize;
use tracing::info;

/// How the root UI presents the current asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PresentationMode {
    /// Panel and canvas for a live render session.
    Interactive,
    /// A plain image element.
    StaticImage { src: String },
}

/// The presentational shell the viewer mounts into.
pub trait RootUi {
    fn mount(&mut self, mode: PresentationMode);
}

/// Root UI that only logs what would be mounted.
#[derive(Debug, Default)]
pub struct TracingRootUi {
    mounted: Option<PresentationMode>,
}

impl TracingRootUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mounted(&self) -> Option<&PresentationMode> {
        self.mounted.as_ref()
    }
}

impl RootUi for TracingRootUi {
    fn mount(&mut self, mode: PresentationMode) {
        match &mode {
            PresentationMode::Interactive => info!("Mounted interactive panel"),
            PresentationMode::StaticImage { src } => info!("Mounted static image {src}"),
        }
        self.mounted = Some(mode);
    }
}
