// commands/state.rs — Shared desk state handed to every command.

use log::info;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::atoms::error::EngineResult;
use crate::atoms::traits::{ChainClient, Signer};
use crate::atoms::types::{Asset, DeskConfig};
use crate::engine::algod::AlgodClient;
use crate::engine::book::TradeBook;
use crate::engine::catalog::AssetCatalog;

pub struct DeskState {
    pub config: DeskConfig,
    pub chain: Arc<dyn ChainClient>,
    pub signer: Arc<dyn Signer>,
    pub book: TradeBook,
    pub catalog: AssetCatalog,
    /// Last verified-asset listing, refreshed on demand.
    pub assets: Mutex<Vec<Asset>>,
}

impl DeskState {
    pub fn new(config: DeskConfig, chain: Arc<dyn ChainClient>, signer: Arc<dyn Signer>) -> EngineResult<Self> {
        let catalog = AssetCatalog::from_config(&config)?;
        Ok(DeskState {
            config,
            chain,
            signer,
            book: TradeBook::new(),
            catalog,
            assets: Mutex::new(Vec::new()),
        })
    }

    /// Desk backed by a live algod node from `config`.
    pub fn connect(config: DeskConfig, signer: Arc<dyn Signer>) -> EngineResult<Self> {
        let chain = Arc::new(AlgodClient::from_config(&config)?);
        info!("[desk] Ready on {:?}", config.network);
        Self::new(config, chain, signer)
    }
}
