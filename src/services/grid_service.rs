use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::grid::{
    CityColumn, ComplexityEntry, GridError, GridStore, Record, SparseEntry, WriteOutcome, YearRow,
};

// Snapshot DTOs (used by API)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RowMajorView {
    pub generated_at: DateTime<Utc>,
    pub cities: Vec<String>,
    pub rows: Vec<YearRow>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ColumnMajorView {
    pub generated_at: DateTime<Utc>,
    pub years: Vec<i32>,
    pub columns: Vec<CityColumn>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SparseView {
    pub generated_at: DateTime<Utc>,
    pub total_entries: usize,
    pub entries: Vec<SparseEntry>,
}

/// Shared handle onto one grid
///
/// Every operation takes the single lock for its whole duration, so a
/// traversal never observes a half-applied write.
#[derive(Clone)]
pub struct GridService {
    grid: Arc<Mutex<GridStore>>,
}

impl GridService {
    pub fn new(grid: GridStore) -> Self {
        Self {
            grid: Arc::new(Mutex::new(grid)),
        }
    }

    #[instrument(skip(self, record), fields(city = %record.city, date = %record.date))]
    pub async fn insert(&self, record: &Record) -> Result<WriteOutcome, GridError> {
        let outcome = self.grid.lock().await.insert_record(record)?;
        info!("Insert for {} on {}: {:?}", record.city, record.date, outcome);
        Ok(outcome)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, date: &str, city: &str) -> Result<WriteOutcome, GridError> {
        let outcome = self.grid.lock().await.delete(date, city)?;
        info!("Delete for {} on {}: {:?}", city, date, outcome);
        Ok(outcome)
    }

    #[instrument(skip(self))]
    pub async fn retrieve(&self, city: &str, year: i32) -> Option<f64> {
        let value = self.grid.lock().await.retrieve(city, year);
        debug!("Retrieve {} {} -> {:?}", city, year, value);
        value
    }

    #[instrument(skip(self))]
    pub async fn row_major(&self) -> RowMajorView {
        let grid = self.grid.lock().await;
        RowMajorView {
            generated_at: Utc::now(),
            cities: grid.cities().to_vec(),
            rows: grid.row_major(),
        }
    }

    #[instrument(skip(self))]
    pub async fn column_major(&self) -> ColumnMajorView {
        let grid = self.grid.lock().await;
        ColumnMajorView {
            generated_at: Utc::now(),
            years: grid.years().collect(),
            columns: grid.column_major(),
        }
    }

    #[instrument(skip(self))]
    pub async fn sparse(&self) -> SparseView {
        let entries = self.grid.lock().await.sparse();
        SparseView {
            generated_at: Utc::now(),
            total_entries: entries.len(),
            entries,
        }
    }

    pub fn complexity_report(&self) -> &'static [ComplexityEntry] {
        GridStore::complexity_report()
    }
}
