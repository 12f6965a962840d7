//! Voxview Data Crate
//!
//! Asset naming, format classification tables and container payload decoding.
//! This crate does no IO and knows nothing about viewports or sessions; it only
//! answers "what kind of asset is this name / payload".

pub mod category;
pub mod container;
pub mod reference;

pub use category::{AssetCategory, FormatTable};
pub use container::{
    Data3Decoder, Data3Message, DecodeError, PayloadContents, PayloadDecoder, resolve_container,
};
pub use reference::AssetReference;
