/// Dense (year, city) grid of daily-average temperatures
///
/// Cells live in one flat row-major `Vec`, addressed by
/// `(year - start_year) * city_count + city_index`. Both traversal orders
/// read the same storage; only the loop nesting differs.
use std::ops::RangeInclusive;

use tracing::{debug, instrument};

use crate::grid::{
    extract_year, CellIndex, CityColumn, ComplexityEntry, GridError, Record, SparseEntry,
    WriteOutcome, YearRow,
};

/// Legacy "no reading" marker, for callers that signal missing data in-band
pub const NO_DATA_SENTINEL: f64 = -9999.0;

/// Records loaded by `populate_sample_data`
pub const SAMPLE_RECORDS: [(&str, &str, f64); 5] = [
    ("01/01/2022", "Delhi", 25.5),
    ("01/01/2022", "Mumbai", 30.2),
    ("01/01/2023", "Delhi", 22.4),
    ("01/01/2023", "Mumbai", 31.1),
    ("01/01/2024", "Chennai", 29.9),
];

const COMPLEXITY: [ComplexityEntry; 6] = [
    ComplexityEntry {
        operation: "Insert",
        time: "O(1)",
        space: "O(1)",
    },
    ComplexityEntry {
        operation: "Delete",
        time: "O(1)",
        space: "O(1)",
    },
    ComplexityEntry {
        operation: "Retrieve",
        time: "O(1)",
        space: "O(1)",
    },
    ComplexityEntry {
        operation: "Row-Major Traversal",
        time: "O(n*m)",
        space: "O(1)",
    },
    ComplexityEntry {
        operation: "Column-Major Traversal",
        time: "O(n*m)",
        space: "O(1)",
    },
    ComplexityEntry {
        operation: "Sparse Handling",
        time: "O(n*m)",
        space: "O(k), k = number of valid entries",
    },
];

/// Upper bound on `row_count * city_count`
pub const MAX_CELLS: usize = 4_000_000;

/// Single-char uppercase mapping; characters that expand (e.g. `ß`) stay as-is
fn upper(c: char) -> char {
    let mut mapped = c.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Leading char of the lowercase mapping (`İ` lowers to `i` + combining dot)
fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Per-character case-insensitive comparison: equal, equal uppercased, or
/// equal after lowercasing the uppercased forms
fn same_city(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| {
            if x == y {
                return true;
            }
            let (ux, uy) = (upper(x), upper(y));
            ux == uy || lower(ux) == lower(uy)
        })
}

#[derive(Debug, Clone)]
pub struct GridStore {
    cities: Vec<String>,
    start_year: i32,
    end_year: i32,
    cells: Vec<Option<f64>>,
}

impl GridStore {
    /// Allocate an empty grid for `cities` over `start_year..=end_year`
    ///
    /// Fails on an inverted year range, an empty city list, two cities whose
    /// names differ only by case, or more than `MAX_CELLS` cells.
    pub fn new<S: AsRef<str>>(
        cities: &[S],
        start_year: i32,
        end_year: i32,
    ) -> Result<Self, GridError> {
        if end_year < start_year {
            return Err(GridError::InvalidYearRange {
                start_year,
                end_year,
            });
        }
        if cities.is_empty() {
            return Err(GridError::NoCities);
        }

        let mut names: Vec<String> = Vec::with_capacity(cities.len());
        for city in cities {
            let city = city.as_ref().trim();
            if names.iter().any(|c| same_city(c, city)) {
                return Err(GridError::DuplicateCity(city.to_string()));
            }
            names.push(city.to_string());
        }

        let rows = (i64::from(end_year) - i64::from(start_year)) as u64 + 1;
        let too_large = || GridError::TooLarge {
            rows,
            cities: names.len(),
            max_cells: MAX_CELLS,
        };
        let row_count = usize::try_from(rows).map_err(|_| too_large())?;
        let cell_count = row_count
            .checked_mul(names.len())
            .filter(|&n| n <= MAX_CELLS)
            .ok_or_else(too_large)?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(cell_count)
            .map_err(|_| too_large())?;
        cells.resize(cell_count, None);
        debug!(
            "Allocated {}x{} grid for {}-{}",
            row_count,
            names.len(),
            start_year,
            end_year
        );

        Ok(Self {
            cities: names,
            start_year,
            end_year,
            cells,
        })
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }

    pub fn row_count(&self) -> usize {
        self.cells.len() / self.cities.len()
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Case-insensitive position of `city` in the declared city list
    pub fn city_index(&self, city: &str) -> Option<usize> {
        let city = city.trim();
        self.cities.iter().position(|c| same_city(c, city))
    }

    fn row_index(&self, year: i32) -> Option<usize> {
        if self.years().contains(&year) {
            Some((i64::from(year) - i64::from(self.start_year)) as usize)
        } else {
            None
        }
    }

    /// Strict cell resolution with an explicit reason when out of range
    pub fn locate(&self, city: &str, year: i32) -> Result<CellIndex, GridError> {
        let row = self.row_index(year).ok_or(GridError::YearOutOfRange {
            year,
            start_year: self.start_year,
            end_year: self.end_year,
        })?;
        let col = self
            .city_index(city)
            .ok_or_else(|| GridError::UnknownCity(city.to_string()))?;
        Ok(CellIndex { row, col })
    }

    fn offset(&self, index: CellIndex) -> usize {
        index.row * self.cities.len() + index.col
    }

    fn cell_mut(&mut self, city: &str, year: i32) -> Option<&mut Option<f64>> {
        let index = self.locate(city, year).ok()?;
        let offset = self.offset(index);
        self.cells.get_mut(offset)
    }

    /// Store `temperature` for the year of `date` and `city`
    ///
    /// An out-of-range year or unknown city leaves the grid untouched and
    /// reports `WriteOutcome::Ignored`; only an unparseable date is an error.
    #[instrument(skip(self))]
    pub fn insert(
        &mut self,
        date: &str,
        city: &str,
        temperature: f64,
    ) -> Result<WriteOutcome, GridError> {
        let year = extract_year(date)?;
        match self.cell_mut(city, year) {
            Some(cell) => {
                *cell = Some(temperature);
                debug!("Stored {} for {} in {}", temperature, city, year);
                Ok(WriteOutcome::Applied)
            }
            None => {
                debug!("Ignoring insert for {} in {}: outside grid", city, year);
                Ok(WriteOutcome::Ignored)
            }
        }
    }

    pub fn insert_record(&mut self, record: &Record) -> Result<WriteOutcome, GridError> {
        self.insert(&record.date, &record.city, record.temperature)
    }

    /// Clear the cell for the year of `date` and `city`
    ///
    /// Clearing an empty cell is still `Applied`; the outcome only says
    /// whether the address was inside the grid.
    #[instrument(skip(self))]
    pub fn delete(&mut self, date: &str, city: &str) -> Result<WriteOutcome, GridError> {
        let year = extract_year(date)?;
        match self.cell_mut(city, year) {
            Some(cell) => {
                *cell = None;
                debug!("Cleared {} in {}", city, year);
                Ok(WriteOutcome::Applied)
            }
            None => {
                debug!("Ignoring delete for {} in {}: outside grid", city, year);
                Ok(WriteOutcome::Ignored)
            }
        }
    }

    /// Stored reading, or `None` for an empty or out-of-range cell
    pub fn retrieve(&self, city: &str, year: i32) -> Option<f64> {
        let index = self.locate(city, year).ok()?;
        self.cells[self.offset(index)]
    }

    /// `retrieve` with missing data reported as `NO_DATA_SENTINEL`
    pub fn retrieve_or_sentinel(&self, city: &str, year: i32) -> f64 {
        self.retrieve(city, year).unwrap_or(NO_DATA_SENTINEL)
    }

    /// Every year ascending, each with its per-city values
    pub fn row_major(&self) -> Vec<YearRow> {
        let width = self.cities.len();
        self.years()
            .zip(self.cells.chunks(width))
            .map(|(year, row)| YearRow {
                year,
                values: row.to_vec(),
            })
            .collect()
    }

    /// Every city in declared order, each with its per-year values
    pub fn column_major(&self) -> Vec<CityColumn> {
        let width = self.cities.len();
        self.cities
            .iter()
            .enumerate()
            .map(|(col, city)| CityColumn {
                city: city.clone(),
                values: (0..self.row_count())
                    .map(|row| self.cells[row * width + col])
                    .collect(),
            })
            .collect()
    }

    /// Populated cells only, in row-major scan order
    pub fn sparse(&self) -> Vec<SparseEntry> {
        let width = self.cities.len();
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(offset, cell)| {
                cell.map(|temperature| SparseEntry {
                    year: self.start_year + (offset / width) as i32,
                    city: self.cities[offset % width].clone(),
                    temperature,
                })
            })
            .collect()
    }

    pub fn populated_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Big-O cost of each grid operation (static, independent of contents)
    pub fn complexity_report() -> &'static [ComplexityEntry] {
        &COMPLEXITY
    }

    /// Load `SAMPLE_RECORDS`; returns how many landed inside the grid
    pub fn populate_sample_data(&mut self) -> usize {
        let mut applied = 0;
        for (date, city, temperature) in SAMPLE_RECORDS {
            // Sample dates are well-formed, so only Ignored is possible here
            if let Ok(WriteOutcome::Applied) = self.insert(date, city, temperature) {
                applied += 1;
            }
        }
        debug!("Seeded {} of {} sample records", applied, SAMPLE_RECORDS.len());
        applied
    }
}
