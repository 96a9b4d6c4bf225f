use std::sync::Arc;

use linkout_gateway::{BlobStore, PaymentGateway};
use linkout_sheets::catalog::CatalogStore;
use linkout_sheets::links::LinkStore;
use linkout_sheets::records::RecordStore;
use linkout_sheets::Tabular;

use crate::config::ServerConfig;

/// The spreadsheet backend shared by all three stores.
pub type SharedTabular = Arc<dyn Tabular>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub catalog: Arc<CatalogStore<SharedTabular>>,
    pub links: Arc<LinkStore<SharedTabular>>,
    pub records: Arc<RecordStore<SharedTabular>>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub blob: Arc<dyn BlobStore>,
}

impl AppState {
    /// Wire all stores over a single spreadsheet backend.
    pub fn new(
        config: ServerConfig,
        sheet: SharedTabular,
        gateway: Arc<dyn PaymentGateway>,
        blob: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(CatalogStore::new(Arc::clone(&sheet))),
            links: Arc::new(LinkStore::new(Arc::clone(&sheet))),
            records: Arc::new(RecordStore::new(sheet)),
            gateway,
            blob,
        }
    }
}
