use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single reading as supplied by callers: only the year of `date` is kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Record {
    /// Date in DD/MM/YYYY format
    pub date: String,
    pub city: String,
    pub temperature: f64,
}

impl Record {
    pub fn new(date: impl Into<String>, city: impl Into<String>, temperature: f64) -> Self {
        Self {
            date: date.into(),
            city: city.into(),
            temperature,
        }
    }
}

/// Result of an insert or delete that parsed successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// The addressed cell was written or cleared
    Applied,
    /// Year or city outside the grid; nothing changed
    Ignored,
}

/// Resolved (row, column) position of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
}

// Traversal outputs (shared by the shell renderer and the HTTP API)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct YearRow {
    pub year: i32,
    /// One entry per city, in declared city order
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CityColumn {
    pub city: String,
    /// One entry per year, ascending
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SparseEntry {
    pub year: i32,
    pub city: String,
    pub temperature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ComplexityEntry {
    #[schema(value_type = String)]
    pub operation: &'static str,
    #[schema(value_type = String)]
    pub time: &'static str,
    #[schema(value_type = String)]
    pub space: &'static str,
}
