//! Render sessions: the live binding between one asset and one renderer.

use crate::viewport::SharedViewport;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;
use voxview_data::{AssetCategory, AssetReference};

/// Errors raised while a session prepares its asset.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to load asset {asset}: {reason}")]
    Load { asset: String, reason: String },

    #[error("Viewport rejected session: {0}")]
    Viewport(#[from] crate::viewport::ViewportError),
}

/// Errors raised while drawing a frame.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("Session drawn before init completed")]
    NotReady,

    #[error("Draw failed: {0}")]
    Failed(String),
}

/// The renderer families a session can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    Mesh,
    Voxel,
    SparseVoxel,
    Wireframe,
    Scene,
}

impl SessionKind {
    /// The session family that renders `category`, if any.
    pub fn for_category(category: AssetCategory) -> Option<Self> {
        match category {
            AssetCategory::Mesh => Some(SessionKind::Mesh),
            AssetCategory::Voxel => Some(SessionKind::Voxel),
            AssetCategory::SparseVoxel => Some(SessionKind::SparseVoxel),
            AssetCategory::Wireframe => Some(SessionKind::Wireframe),
            AssetCategory::Scene => Some(SessionKind::Scene),
            AssetCategory::Image | AssetCategory::Container | AssetCategory::Unsupported => None,
        }
    }

    pub fn category(self) -> AssetCategory {
        match self {
            SessionKind::Mesh => AssetCategory::Mesh,
            SessionKind::Voxel => AssetCategory::Voxel,
            SessionKind::SparseVoxel => AssetCategory::SparseVoxel,
            SessionKind::Wireframe => AssetCategory::Wireframe,
            SessionKind::Scene => AssetCategory::Scene,
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKind::Mesh => write!(f, "MeshSession"),
            SessionKind::Voxel => write!(f, "VoxelSession"),
            SessionKind::SparseVoxel => write!(f, "SparseVoxelSession"),
            SessionKind::Wireframe => write!(f, "WireframeSession"),
            SessionKind::Scene => write!(f, "SceneSession"),
        }
    }
}

/// Trait for renderer sessions. Implement this to plug a rendering engine in.
///
/// `init` must settle exactly once; `draw` is only called after `init`
/// succeeded.
#[async_trait(?Send)]
pub trait RenderSession {
    /// Load the asset and prepare to draw into `viewport`.
    async fn init(
        &mut self,
        viewport: SharedViewport,
        asset: &AssetReference,
    ) -> Result<(), SessionError>;

    /// Draw one frame.
    fn draw(&mut self) -> Result<(), DrawError>;

    fn kind(&self) -> SessionKind;
}

/// Builds a fresh session for a session kind.
pub trait SessionFactory {
    fn create(&self, kind: SessionKind) -> Box<dyn RenderSession>;
}

impl<F> SessionFactory for F
where
    F: Fn(SessionKind) -> Box<dyn RenderSession>,
{
    fn create(&self, kind: SessionKind) -> Box<dyn RenderSession> {
        self(kind)
    }
}
