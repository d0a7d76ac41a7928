use tracing::{debug, instrument};

use crate::domain::{covers_from_rows, layers_from_rows, Cover, CoverRow, Layer, LayerRow};
use crate::error::CatalogError;
use crate::store::{CollectionClient, StoreError};

/// Read-path client over the two catalog collections, returning the
/// configurator-facing shapes.
#[derive(Clone)]
pub struct CatalogClient {
    layers: CollectionClient<LayerRow>,
    covers: CollectionClient<CoverRow>,
}

impl CatalogClient {
    pub fn new(layers: CollectionClient<LayerRow>, covers: CollectionClient<CoverRow>) -> Self {
        Self { layers, covers }
    }

    /// Layer types with their per-size price tables, read in
    /// `layer_id` order.
    #[instrument(skip(self))]
    pub async fn layers(&self) -> Result<Vec<Layer>, CatalogError> {
        debug!("Sending request");
        let mut rows = self.layers.list().await.map_err(map_store_error)?;
        rows.sort_by_key(|row| row.layer_id);
        Ok(layers_from_rows(&rows))
    }

    #[instrument(skip(self))]
    pub async fn covers(&self) -> Result<Vec<Cover>, CatalogError> {
        debug!("Sending request");
        let mut rows = self.covers.list().await.map_err(map_store_error)?;
        rows.sort_by_key(|row| row.cover_id);
        Ok(covers_from_rows(&rows))
    }

    /// Loads both collections; the runtime counterpart of the one-shot
    /// import script.
    #[instrument(
        skip(self, layers, covers),
        fields(layer_rows = layers.len(), cover_rows = covers.len())
    )]
    pub async fn seed(
        &self,
        layers: Vec<LayerRow>,
        covers: Vec<CoverRow>,
    ) -> Result<(), CatalogError> {
        for row in layers {
            self.layers.insert(row).await.map_err(map_store_error)?;
        }
        for row in covers {
            self.covers.insert(row).await.map_err(map_store_error)?;
        }
        Ok(())
    }
}

fn map_store_error(e: StoreError) -> CatalogError {
    match e {
        StoreError::Disconnected => {
            CatalogError::ActorCommunicationError("store disconnected".to_string())
        }
        other => CatalogError::DatabaseError(other.to_string()),
    }
}
