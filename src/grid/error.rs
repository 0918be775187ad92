#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("Invalid date '{0}': expected DD/MM/YYYY")]
    InvalidDate(String),

    #[error("Invalid year range: end year {end_year} is before start year {start_year}")]
    InvalidYearRange { start_year: i32, end_year: i32 },

    #[error("At least one city is required")]
    NoCities,

    #[error("Grid of {rows} years x {cities} cities exceeds the {max_cells} cell limit")]
    TooLarge {
        rows: u64,
        cities: usize,
        max_cells: usize,
    },

    #[error("Duplicate city: {0}")]
    DuplicateCity(String),

    #[error("Year {year} is outside {start_year}-{end_year}")]
    YearOutOfRange {
        year: i32,
        start_year: i32,
        end_year: i32,
    },

    #[error("Unknown city: {0}")]
    UnknownCity(String),
}
