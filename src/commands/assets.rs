// commands/assets.rs — Verified-asset listing for trade-leg pickers.

use crate::atoms::types::{Asset, AssetKind};
use crate::commands::state::DeskState;
use crate::engine::catalog::filter_assets;

/// Verified assets matching `term` and `kind`. The catalog is fetched on
/// first use or when `refresh` is set; later calls filter the cached list.
pub async fn desk_verified_assets(
    state: &DeskState,
    term: &str,
    kind: AssetKind,
    refresh: bool,
) -> Result<Vec<Asset>, String> {
    let cached = state.assets.lock().clone();
    let assets = if cached.is_empty() || refresh {
        let fresh = state.catalog.fetch_verified_assets().await.map_err(|e| e.to_string())?;
        *state.assets.lock() = fresh.clone();
        fresh
    } else {
        cached
    };
    Ok(filter_assets(&assets, term, kind))
}
