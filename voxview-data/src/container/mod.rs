//! Container payload inspection
//!
//! A container (`.pb`) wraps one of several content kinds. Which one is only
//! known after decoding the payload and asking it what it holds.

mod decoder;
mod message;

pub use decoder::{Data3Decoder, DecodeError, PayloadDecoder};
pub use message::{Data3Message, PayloadContents};

use crate::category::AssetCategory;

/// Resolve the real category of a decoded container payload.
///
/// Sparse-voxel content wins over voxel content; a payload with neither is
/// `Unsupported`.
pub fn resolve_container(contents: &dyn PayloadContents) -> AssetCategory {
    if contents.has_sparse_voxel() {
        AssetCategory::SparseVoxel
    } else if contents.has_voxel() {
        AssetCategory::Voxel
    } else {
        AssetCategory::Unsupported
    }
}
