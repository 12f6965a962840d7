//! Decoded container messages

use std::collections::BTreeSet;

/// What a decoded container payload can tell us about itself.
pub trait PayloadContents {
    /// The payload carries a sparse voxel grid.
    fn has_sparse_voxel(&self) -> bool;

    /// The payload carries a dense voxel grid.
    fn has_voxel(&self) -> bool;
}

/// Top-level view of a `Data3` container message.
///
/// Only field presence is kept; the field bodies belong to the renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Data3Message {
    present: BTreeSet<u32>,
    voxel_field: u32,
    sparse_voxel_field: u32,
}

impl Data3Message {
    pub(crate) fn new(present: BTreeSet<u32>, voxel_field: u32, sparse_voxel_field: u32) -> Self {
        Self {
            present,
            voxel_field,
            sparse_voxel_field,
        }
    }

    /// Whether a top-level field with this number occurred at least once.
    pub fn has_field(&self, number: u32) -> bool {
        self.present.contains(&number)
    }

    /// Field numbers seen in the payload, ascending.
    pub fn fields(&self) -> impl Iterator<Item = u32> + '_ {
        self.present.iter().copied()
    }
}

impl PayloadContents for Data3Message {
    fn has_sparse_voxel(&self) -> bool {
        self.has_field(self.sparse_voxel_field)
    }

    fn has_voxel(&self) -> bool {
        self.has_field(self.voxel_field)
    }
}
