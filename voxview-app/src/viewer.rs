//! Session dispatch: owns the single active session slot.

use crate::classifier::FormatClassifier;
use crate::config::ServerConfig;
use crate::errors::ViewerError;
use crate::sessions::TraceSessionFactory;
use crate::ui::{PresentationMode, RootUi, TracingRootUi};
use serde::Serialize;
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use voxview_data::{AssetCategory, AssetReference};
use voxview_window::{
    FrameScheduler, FrameStatus, InputEvent, InputRouter, MountPoints, PendingFrame, RenderLoop,
    SessionFactory, SessionKind, SharedViewport, StandardViewportFactory, ViewportFactory,
    dispatch_event,
};

/// What the viewer is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewerStatus {
    Idle,
    Image { src: String },
    Running { category: AssetCategory, frames: u64 },
}

/// A live session: its viewport, listeners and loop.
struct ActiveSession {
    category: AssetCategory,
    viewport: SharedViewport,
    router: InputRouter,
    render_loop: RenderLoop,
}

enum Slot {
    Idle,
    Image { src: String },
    Interactive(ActiveSession),
}

/// Classifies assets and keeps at most one render session alive.
///
/// Loading takes `&mut self`, so only one load is ever in flight and nothing
/// else can touch the slot while a session initializes.
pub struct Viewer {
    classifier: FormatClassifier,
    server: ServerConfig,
    mounts: MountPoints,
    sessions: Box<dyn SessionFactory>,
    viewports: Box<dyn ViewportFactory>,
    ui: Box<dyn RootUi>,
    scheduler: Rc<dyn FrameScheduler>,
    slot: Slot,
}

impl Viewer {
    pub fn new(classifier: FormatClassifier) -> Self {
        let server = classifier.sniffer().server().clone();
        Self {
            classifier,
            server,
            mounts: MountPoints::default(),
            sessions: Box::new(TraceSessionFactory),
            viewports: Box::new(StandardViewportFactory::default()),
            ui: Box::new(TracingRootUi::new()),
            scheduler: Rc::new(PendingFrame::new()),
            slot: Slot::Idle,
        }
    }

    pub fn with_mounts(mut self, mounts: MountPoints) -> Self {
        self.mounts = mounts;
        self
    }

    pub fn with_sessions(mut self, sessions: impl SessionFactory + 'static) -> Self {
        self.sessions = Box::new(sessions);
        self
    }

    pub fn with_viewports(mut self, viewports: impl ViewportFactory + 'static) -> Self {
        self.viewports = Box::new(viewports);
        self
    }

    pub fn with_ui(mut self, ui: impl RootUi + 'static) -> Self {
        self.ui = Box::new(ui);
        self
    }

    pub fn with_scheduler(mut self, scheduler: Rc<dyn FrameScheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Classify `name` and activate the matching presentation.
    ///
    /// Classification errors leave the current session untouched.
    pub async fn load(&mut self, name: &str) -> Result<AssetCategory, ViewerError> {
        let asset = AssetReference::new(name);
        info!("Loading {asset}");
        let classification = match self.classifier.describe(&asset).await {
            Ok(classification) => classification,
            Err(err) => {
                error!("Failed to classify {asset}: {err}");
                return Err(err.into());
            }
        };
        let category = classification.category;
        if classification.hint == AssetCategory::Container
            && category == AssetCategory::Unsupported
        {
            warn!("Container {asset} has nothing to render");
            return Err(ViewerError::EmptyContainer {
                name: asset.name().to_string(),
            });
        }
        self.activate(category, &asset).await?;
        Ok(category)
    }

    /// Build and start the presentation for an already classified asset.
    pub async fn activate(
        &mut self,
        category: AssetCategory,
        asset: &AssetReference,
    ) -> Result<(), ViewerError> {
        match category {
            AssetCategory::Unsupported => {
                warn!("Unsupported asset {asset}");
                Err(ViewerError::Unsupported {
                    name: asset.name().to_string(),
                })
            }
            AssetCategory::Container => {
                warn!("Container {asset} reached dispatch unresolved");
                Err(ViewerError::UnresolvedContainer {
                    name: asset.name().to_string(),
                })
            }
            AssetCategory::Image => {
                let src = self.server.image_url(asset.name())?;
                self.teardown();
                self.ui
                    .mount(PresentationMode::StaticImage { src: src.clone() });
                self.slot = Slot::Image { src };
                Ok(())
            }
            interactive => {
                let Some(kind) = SessionKind::for_category(interactive) else {
                    return Err(ViewerError::Unsupported {
                        name: asset.name().to_string(),
                    });
                };
                self.start_session(kind, asset).await
            }
        }
    }

    async fn start_session(
        &mut self,
        kind: SessionKind,
        asset: &AssetReference,
    ) -> Result<(), ViewerError> {
        self.teardown();
        self.ui.mount(PresentationMode::Interactive);

        let viewport = self.viewports.create(&self.mounts);
        let initialized = viewport.borrow_mut().init();
        if let Err(err) = initialized {
            error!("Viewport init failed for {asset}: {err}");
            viewport.borrow_mut().dispose();
            return Err(err.into());
        }
        let router = InputRouter::attach(&viewport);

        let mut session = self.sessions.create(kind);
        debug!("Initializing {kind} for {asset}");
        if let Err(err) = session.init(viewport.clone(), asset).await {
            error!("{kind} failed to initialize {asset}: {err}");
            release(router, &viewport);
            return Err(err.into());
        }

        let render_loop = match RenderLoop::start(viewport.clone(), session, self.scheduler.clone())
        {
            Ok(render_loop) => render_loop,
            Err(err) => {
                release(router, &viewport);
                return Err(err.into());
            }
        };

        info!("{kind} running for {asset}");
        self.slot = Slot::Interactive(ActiveSession {
            category: kind.category(),
            viewport,
            router,
            render_loop,
        });
        Ok(())
    }

    /// Run one frame of the active session, if any.
    ///
    /// A draw failure tears the session down and is returned.
    pub fn frame(&mut self) -> Result<FrameStatus, ViewerError> {
        let Slot::Interactive(active) = &mut self.slot else {
            return Ok(FrameStatus::Stopped);
        };
        match active.render_loop.tick() {
            Ok(status) => Ok(status),
            Err(err) => {
                self.teardown();
                Err(err.into())
            }
        }
    }

    /// Deliver a host input event to the active viewport's listeners.
    pub fn dispatch(&self, event: &InputEvent) -> usize {
        match &self.slot {
            Slot::Interactive(active) => dispatch_event(&active.viewport, event),
            _ => 0,
        }
    }

    /// Stop the loop, unbind listeners, dispose the viewport and drop the session.
    pub fn teardown(&mut self) {
        match std::mem::replace(&mut self.slot, Slot::Idle) {
            Slot::Idle => {}
            Slot::Image { src } => debug!("Released static image {src}"),
            Slot::Interactive(mut active) => {
                active.render_loop.stop();
                let frames = active.render_loop.frames();
                let kind = active.render_loop.kind();
                release(active.router, &active.viewport);
                drop(active.render_loop);
                info!("Tore down {kind} after {frames} frames");
            }
        }
    }

    pub fn status(&self) -> ViewerStatus {
        match &self.slot {
            Slot::Idle => ViewerStatus::Idle,
            Slot::Image { src } => ViewerStatus::Image { src: src.clone() },
            Slot::Interactive(active) => ViewerStatus::Running {
                category: active.category,
                frames: active.render_loop.frames(),
            },
        }
    }

    /// Category of what is currently shown.
    pub fn category(&self) -> Option<AssetCategory> {
        match &self.slot {
            Slot::Idle => None,
            Slot::Image { .. } => Some(AssetCategory::Image),
            Slot::Interactive(active) => Some(active.category),
        }
    }

    pub fn viewport(&self) -> Option<&SharedViewport> {
        match &self.slot {
            Slot::Interactive(active) => Some(&active.viewport),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(&self.slot, Slot::Interactive(active) if active.render_loop.is_running())
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Unbind every listener and dispose the viewport.
fn release(router: InputRouter, viewport: &SharedViewport) {
    router.detach(viewport);
    viewport.borrow_mut().dispose();
}
