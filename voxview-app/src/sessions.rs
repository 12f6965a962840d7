//! Tracing render sessions used by the headless binary.
//!
//! They do no rendering; they hold on to the viewport and asset the way a
//! real engine would and emit a trace event per frame.

use async_trait::async_trait;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};
use voxview_data::AssetReference;
use voxview_window::{
    DrawError, RenderSession, SessionError, SessionFactory, SessionKind, SharedViewport, Viewport,
};

pub struct TraceSession {
    kind: SessionKind,
    asset: Option<AssetReference>,
    viewport: Option<Weak<RefCell<dyn Viewport>>>,
    frames: u64,
}

impl TraceSession {
    pub fn new(kind: SessionKind) -> Self {
        Self {
            kind,
            asset: None,
            viewport: None,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn asset(&self) -> Option<&AssetReference> {
        self.asset.as_ref()
    }
}

#[async_trait(?Send)]
impl RenderSession for TraceSession {
    async fn init(
        &mut self,
        viewport: SharedViewport,
        asset: &AssetReference,
    ) -> Result<(), SessionError> {
        // Hand control back once, as a real loader would while fetching.
        tokio::task::yield_now().await;

        if asset.extension().is_empty() {
            return Err(SessionError::Load {
                asset: asset.to_string(),
                reason: format!("empty extension for {} asset", self.kind.category()),
            });
        }

        debug!("{} loaded {asset}", self.kind);
        self.viewport = Some(Rc::downgrade(&viewport));
        self.asset = Some(asset.clone());
        Ok(())
    }

    fn draw(&mut self) -> Result<(), DrawError> {
        let Some(viewport) = self.viewport.as_ref() else {
            return Err(DrawError::NotReady);
        };
        if viewport.strong_count() == 0 {
            return Err(DrawError::Failed("viewport dropped".into()));
        }
        self.frames += 1;
        trace!("{} frame {}", self.kind, self.frames);
        Ok(())
    }

    fn kind(&self) -> SessionKind {
        self.kind
    }
}

/// Creates a [`TraceSession`] for every kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceSessionFactory;

impl SessionFactory for TraceSessionFactory {
    fn create(&self, kind: SessionKind) -> Box<dyn RenderSession> {
        Box::new(TraceSession::new(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxview_window::StandardViewport;

    fn viewport() -> SharedViewport {
        Rc::new(RefCell::new(StandardViewport::headless()))
    }

    #[tokio::test]
    async fn test_draw_requires_init() {
        let mut session = TraceSession::new(SessionKind::Mesh);
        assert!(matches!(session.draw(), Err(DrawError::NotReady)));

        let viewport = viewport();
        session
            .init(viewport.clone(), &AssetReference::new("model.obj"))
            .await
            .unwrap();
        session.draw().unwrap();
        session.draw().unwrap();
        assert_eq!(session.frames(), 2);
        assert_eq!(session.asset().map(|a| a.name()), Some("model.obj"));
    }

    #[tokio::test]
    async fn test_trailing_dot_is_load_error() {
        let mut session = TraceSession::new(SessionKind::Scene);
        let err = session
            .init(viewport(), &AssetReference::new("scene."))
            .await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn test_draw_fails_once_viewport_is_gone() {
        let mut session = TraceSessionFactory.create(SessionKind::Voxel);
        let viewport = viewport();
        session
            .init(viewport.clone(), &AssetReference::new("grid.vox"))
            .await
            .unwrap();
        drop(viewport);
        assert!(matches!(session.draw(), Err(DrawError::Failed(_))));
    }
}
