use chrono::{DateTime, Utc};

use crate::domain::{CoverRow, LayerRow};
use crate::store::{Record, StoreError};

// Catalog rows are seeded verbatim; the store only stamps the row key.

impl Record for LayerRow {
    type Id = u64;
    type Insert = LayerRow;

    fn from_insert(
        id: u64,
        _created_at: DateTime<Utc>,
        mut payload: LayerRow,
    ) -> Result<Self, StoreError> {
        payload.row_id = id;
        Ok(payload)
    }
}

impl Record for CoverRow {
    type Id = u64;
    type Insert = CoverRow;

    fn from_insert(
        id: u64,
        _created_at: DateTime<Utc>,
        mut payload: CoverRow,
    ) -> Result<Self, StoreError> {
        payload.row_id = id;
        Ok(payload)
    }
}
