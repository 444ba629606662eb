// GroupSwap — Verified Asset Catalog
// fetch_verified_assets, filter_assets
//
// Walks the paginated verified-asset list, then fetches every asset's details
// concurrently. Assets whose details fail to load are dropped, not fatal.

use futures::future::join_all;
use log::{info, warn};
use serde::Deserialize;
use std::time::Duration;

use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::types::{Asset, AssetKind, DeskConfig};

/// Stop following `next` links after this many pages.
const MAX_PAGES: usize = 50;

#[derive(Debug, Deserialize)]
struct VerifiedPage {
    next: Option<String>,
    results: Vec<VerifiedEntry>,
}

#[derive(Debug, Deserialize)]
struct VerifiedEntry {
    asset_id: u64,
}

#[derive(Debug, Deserialize)]
struct AssetDetails {
    #[serde(default)]
    name: String,
    #[serde(default)]
    unit_name: String,
    logo: Option<String>,
    #[serde(default)]
    verification_tier: String,
    usd_value: Option<String>,
    #[serde(default)]
    total_supply: u64,
    #[serde(default)]
    fraction_decimals: u8,
    #[serde(default)]
    is_collectible: Option<bool>,
}

impl AssetDetails {
    fn into_asset(self, id: u64) -> Asset {
        Asset {
            id,
            name: self.name,
            unit: self.unit_name,
            logo: self.logo.filter(|l| !l.is_empty()),
            decimals: self.fraction_decimals,
            total: self.total_supply,
            verified: true,
            usd_value: self.usd_value.filter(|v| !v.is_empty()),
            verification_tier: self.verification_tier,
            is_collectible: self.is_collectible.unwrap_or(false),
        }
    }
}

pub struct AssetCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl AssetCatalog {
    pub fn new(base_url: &str, timeout_secs: u64) -> EngineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(AssetCatalog { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn from_config(config: &DeskConfig) -> EngineResult<Self> {
        Self::new(&config.catalog_url(), config.request_timeout_secs)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> EngineResult<T> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(EngineError::node(status.as_u16(), format!("catalog request to {} failed", url)));
        }
        Ok(resp.json().await?)
    }

    /// Every verified asset id, following `next` links.
    pub async fn verified_asset_ids(&self) -> EngineResult<Vec<u64>> {
        let mut ids = Vec::new();
        let mut url = Some(format!("{}/verified-assets/", self.base_url));
        let mut pages = 0;
        while let Some(page_url) = url.take() {
            let page: VerifiedPage = self.get_json(&page_url).await?;
            ids.extend(page.results.into_iter().map(|r| r.asset_id));
            pages += 1;
            if pages >= MAX_PAGES {
                warn!("[catalog] Stopped after {} pages ({} ids)", pages, ids.len());
                break;
            }
            url = page.next;
        }
        Ok(ids)
    }

    pub async fn asset(&self, id: u64) -> EngineResult<Asset> {
        let details: AssetDetails = self.get_json(&format!("{}/assets/{}/", self.base_url, id)).await?;
        Ok(details.into_asset(id))
    }

    /// Verified assets with details, sorted by name.
    pub async fn fetch_verified_assets(&self) -> EngineResult<Vec<Asset>> {
        let ids = self.verified_asset_ids().await?;
        let results = join_all(ids.iter().map(|id| self.asset(*id))).await;

        let mut assets = Vec::with_capacity(results.len());
        for (id, result) in ids.iter().zip(results) {
            match result {
                Ok(asset) => assets.push(asset),
                Err(e) => warn!("[catalog] Skipping asset {}: {}", id, e),
            }
        }
        sort_by_name(&mut assets);
        info!("[catalog] Loaded {} of {} verified assets", assets.len(), ids.len());
        Ok(assets)
    }
}

fn sort_by_name(assets: &mut [Asset]) {
    assets.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()).then(a.id.cmp(&b.id)));
}

/// Narrow `assets` by kind, then by a case-insensitive match on name or unit.
pub fn filter_assets(assets: &[Asset], term: &str, kind: AssetKind) -> Vec<Asset> {
    let needle = term.trim().to_lowercase();
    assets
        .iter()
        .filter(|a| match kind {
            AssetKind::All => true,
            AssetKind::Collectibles => a.is_collectible,
            AssetKind::Tokens => !a.is_collectible,
        })
        .filter(|a| {
            needle.is_empty() || a.name.to_lowercase().contains(&needle) || a.unit.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
