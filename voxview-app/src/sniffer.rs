//! Container payload sniffing.

use crate::config::ServerConfig;
use crate::errors::ClassifyError;
use crate::fetch::PayloadFetcher;
use std::rc::Rc;
use tokio::time::timeout;
use tracing::{debug, warn};
use voxview_data::{AssetCategory, AssetReference, Data3Decoder, PayloadDecoder, resolve_container};

/// Fetches a container payload and inspects it for its real category.
pub struct ContainerSniffer {
    fetcher: Rc<dyn PayloadFetcher>,
    decoder: Box<dyn PayloadDecoder>,
    server: ServerConfig,
}

impl ContainerSniffer {
    pub fn new(fetcher: Rc<dyn PayloadFetcher>, server: ServerConfig) -> Self {
        Self {
            fetcher,
            decoder: Box::new(Data3Decoder::new()),
            server,
        }
    }

    pub fn with_decoder(mut self, decoder: impl PayloadDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Resolve a container to `SparseVoxel`, `Voxel` or `Unsupported`.
    ///
    /// Exactly one fetch is issued, bounded by the configured timeout.
    #[tracing::instrument(skip_all, fields(name = %asset))]
    pub async fn sniff(&self, asset: &AssetReference) -> Result<AssetCategory, ClassifyError> {
        let url = self.server.vox_url(asset.name())?;
        let after = self.server.sniff_timeout;

        let bytes = timeout(after, self.fetcher.fetch(&url))
            .await
            .map_err(|_| ClassifyError::Timeout {
                name: asset.name().to_string(),
                after,
            })??;

        let contents = self
            .decoder
            .decode(&bytes)
            .map_err(|source| ClassifyError::Decode {
                name: asset.name().to_string(),
                source,
            })?;

        let category = resolve_container(contents.as_ref());
        if category == AssetCategory::Unsupported {
            warn!("Container {asset} holds neither sparse-voxel nor voxel content");
        } else {
            debug!("Container {asset} resolved to {category}");
        }
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FetchError;
    use crate::testing::{ScriptedFetcher, payload};
    use std::time::Duration;

    fn sniffer(fetcher: &Rc<ScriptedFetcher>) -> ContainerSniffer {
        ContainerSniffer::new(fetcher.clone(), ServerConfig::new("http://srv"))
    }

    #[tokio::test]
    async fn test_sparse_wins_over_voxel() {
        let fetcher = Rc::new(ScriptedFetcher::new());
        fetcher.respond("http://srv/download/vox/both.pb", payload::BOTH);
        let category = sniffer(&fetcher)
            .sniff(&AssetReference::new("both.pb"))
            .await
            .unwrap();
        assert_eq!(category, AssetCategory::SparseVoxel);
        assert_eq!(fetcher.calls(), vec!["http://srv/download/vox/both.pb"]);
    }

    #[tokio::test]
    async fn test_voxel_only() {
        let fetcher = Rc::new(ScriptedFetcher::new());
        fetcher.respond("http://srv/download/vox/dense.pb", payload::VOXEL);
        let category = sniffer(&fetcher)
            .sniff(&AssetReference::new("dense.pb"))
            .await
            .unwrap();
        assert_eq!(category, AssetCategory::Voxel);
    }

    #[tokio::test]
    async fn test_neither_resolves_unsupported() {
        let fetcher = Rc::new(ScriptedFetcher::new());
        fetcher.respond("http://srv/download/vox/empty.pb", payload::NEITHER);
        let category = sniffer(&fetcher)
            .sniff(&AssetReference::new("empty.pb"))
            .await
            .unwrap();
        assert_eq!(category, AssetCategory::Unsupported);
    }

    #[tokio::test]
    async fn test_custom_field_numbers() {
        let fetcher = Rc::new(ScriptedFetcher::new());
        // Only field 1 present, now configured as the sparse field.
        fetcher.respond("http://srv/download/vox/x.pb", payload::VOXEL);
        let category = sniffer(&fetcher)
            .with_decoder(Data3Decoder::new().with_fields(7, 1))
            .sniff(&AssetReference::new("x.pb"))
            .await
            .unwrap();
        assert_eq!(category, AssetCategory::SparseVoxel);
    }

    #[tokio::test]
    async fn test_name_with_reserved_characters_is_fetched_whole() {
        let fetcher = Rc::new(ScriptedFetcher::new());
        fetcher.respond("http://srv/download/vox/scan%232%20final.pb", payload::VOXEL);
        let category = sniffer(&fetcher)
            .sniff(&AssetReference::new("scan#2 final.pb"))
            .await
            .unwrap();
        assert_eq!(category, AssetCategory::Voxel);
        assert_eq!(
            fetcher.calls(),
            vec!["http://srv/download/vox/scan%232%20final.pb"]
        );
    }

    #[tokio::test]
    async fn test_invalid_server_url_is_config_error() {
        let fetcher = Rc::new(ScriptedFetcher::new());
        let sniffer = ContainerSniffer::new(fetcher.clone(), ServerConfig::new("not a url"));
        let err = sniffer
            .sniff(&AssetReference::new("a.pb"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::Config(_)));
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_payload_is_decode_error() {
        let fetcher = Rc::new(ScriptedFetcher::new());
        fetcher.respond("http://srv/download/vox/bad.pb", payload::TRUNCATED);
        let err = sniffer(&fetcher)
            .sniff(&AssetReference::new("bad.pb"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_is_classify_error() {
        let fetcher = Rc::new(ScriptedFetcher::new());
        let err = sniffer(&fetcher)
            .sniff(&AssetReference::new("missing.pb"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::Fetch(FetchError::Status { status: 404, .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_fetch_times_out() {
        let fetcher = Rc::new(ScriptedFetcher::new());
        fetcher.hang("http://srv/download/vox/slow.pb");
        let sniffer = ContainerSniffer::new(
            fetcher.clone(),
            ServerConfig::new("http://srv").with_sniff_timeout(Duration::from_millis(250)),
        );
        let err = sniffer
            .sniff(&AssetReference::new("slow.pb"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::Timeout { .. }));
    }
}
