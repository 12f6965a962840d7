//! Format classification.

use crate::errors::ClassifyError;
use crate::sniffer::ContainerSniffer;
use serde::Serialize;
use tracing::debug;
use voxview_data::{AssetCategory, AssetReference, FormatTable};

/// Result of classifying one asset name, as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub name: String,
    pub extension: String,
    /// Category from the extension table alone.
    pub hint: AssetCategory,
    pub category: AssetCategory,
}

/// Maps asset names to categories, sniffing containers when needed.
pub struct FormatClassifier {
    table: FormatTable,
    sniffer: ContainerSniffer,
}

impl FormatClassifier {
    pub fn new(sniffer: ContainerSniffer) -> Self {
        Self {
            table: FormatTable::new(),
            sniffer,
        }
    }

    pub fn sniffer(&self) -> &ContainerSniffer {
        &self.sniffer
    }

    /// Resolve `asset` to a single category.
    ///
    /// Only container extensions suspend; everything else resolves from the
    /// table, falling back to `Unsupported`.
    #[tracing::instrument(skip_all, fields(name = %asset))]
    pub async fn classify(&self, asset: &AssetReference) -> Result<AssetCategory, ClassifyError> {
        match self.table.categorize(asset) {
            AssetCategory::Container => self.sniffer.sniff(asset).await,
            category => {
                debug!("Extension {:?} maps to {category}", asset.extension());
                Ok(category)
            }
        }
    }

    /// Like [`FormatClassifier::classify`], keeping the table hint alongside the result.
    pub async fn describe(&self, asset: &AssetReference) -> Result<Classification, ClassifyError> {
        let category = self.classify(asset).await?;
        Ok(Classification {
            name: asset.name().to_string(),
            extension: asset.extension().to_string(),
            hint: self.table.categorize(asset),
            category,
        })
    }
}
