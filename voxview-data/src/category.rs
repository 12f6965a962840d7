//! Asset categories and the extension table that maps names onto them.

use crate::reference::AssetReference;
use serde::Serialize;
use std::fmt;

/// The logical kind of content an asset holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    /// Dense voxel grid.
    Voxel,
    /// Sparse voxel grid.
    SparseVoxel,
    /// Triangle mesh.
    Mesh,
    /// Scene graph description.
    Scene,
    /// Line wireframe.
    Wireframe,
    /// Static 2D picture.
    Image,
    /// Wrapper whose real category is only known after inspecting its payload.
    Container,
    /// Nothing we know how to show.
    Unsupported,
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetCategory::Voxel => write!(f, "Voxel"),
            AssetCategory::SparseVoxel => write!(f, "SparseVoxel"),
            AssetCategory::Mesh => write!(f, "Mesh"),
            AssetCategory::Scene => write!(f, "Scene"),
            AssetCategory::Wireframe => write!(f, "Wireframe"),
            AssetCategory::Image => write!(f, "Image"),
            AssetCategory::Container => write!(f, "Container"),
            AssetCategory::Unsupported => write!(f, "Unsupported"),
        }
    }
}

impl AssetCategory {
    /// Get all categories.
    pub fn all() -> &'static [AssetCategory] {
        &[
            AssetCategory::Voxel,
            AssetCategory::SparseVoxel,
            AssetCategory::Mesh,
            AssetCategory::Scene,
            AssetCategory::Wireframe,
            AssetCategory::Image,
            AssetCategory::Container,
            AssetCategory::Unsupported,
        ]
    }

    /// Whether this category is shown through a viewport and render session.
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            AssetCategory::Voxel
                | AssetCategory::SparseVoxel
                | AssetCategory::Mesh
                | AssetCategory::Scene
                | AssetCategory::Wireframe
        )
    }
}

const VOXEL_EXTENSIONS: &[&str] = &["vox", "vox2", "df", "sdf", "voxnoc", "voxsis"];
const SPARSE_VOXEL_EXTENSIONS: &[&str] = &["svox", "svox2", "svoxrgb"];
const MESH_EXTENSIONS: &[&str] = &["obj", "ply"];
const SCENE_EXTENSIONS: &[&str] = &["json"];
const WIREFRAME_EXTENSIONS: &[&str] = &["wrf"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];
const CONTAINER_EXTENSIONS: &[&str] = &["pb"];

static GROUPS: [(AssetCategory, &[&str]); 7] = [
    (AssetCategory::Voxel, VOXEL_EXTENSIONS),
    (AssetCategory::SparseVoxel, SPARSE_VOXEL_EXTENSIONS),
    (AssetCategory::Mesh, MESH_EXTENSIONS),
    (AssetCategory::Scene, SCENE_EXTENSIONS),
    (AssetCategory::Wireframe, WIREFRAME_EXTENSIONS),
    (AssetCategory::Image, IMAGE_EXTENSIONS),
    (AssetCategory::Container, CONTAINER_EXTENSIONS),
];

/// Fixed extension → category membership table.
///
/// Matching is case-sensitive; `PNG` is not `png`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatTable;

impl FormatTable {
    pub fn new() -> Self {
        Self
    }

    /// Category for a bare extension, `Unsupported` when nothing matches.
    pub fn lookup(&self, extension: &str) -> AssetCategory {
        GROUPS
            .iter()
            .find(|(_, extensions)| extensions.contains(&extension))
            .map(|(category, _)| *category)
            .unwrap_or(AssetCategory::Unsupported)
    }

    /// Category hinted by a reference's extension.
    pub fn categorize(&self, reference: &AssetReference) -> AssetCategory {
        self.lookup(reference.extension())
    }

    /// Every `(extension, category)` pair in the table.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, AssetCategory)> + use<> {
        GROUPS.iter().flat_map(|(category, extensions)| {
            extensions.iter().map(move |extension| (*extension, *category))
        })
    }
}
