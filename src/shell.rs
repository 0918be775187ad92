/// Interactive numbered menu over a `GridStore`
///
/// The shell owns all terminal I/O; it reads from any `BufRead` and writes to
/// any `Write`, so sessions can be scripted in tests.
use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::grid::{GridError, GridStore, WriteOutcome};
use crate::report;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

const MENU: &str = "\n=== Weather Data System Menu ===
1. Insert Record
2. Delete Record
3. Retrieve Record
4. Row-Major View
5. Column-Major View
6. Sparse Data View
7. Complexity Analysis
0. Exit
Enter your choice: ";

/// What a single menu round asks the loop to do next
enum Step {
    Continue,
    Exit,
}

pub struct Shell<R, W> {
    grid: GridStore,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(grid: GridStore, input: R, output: W) -> Self {
        Self {
            grid,
            input,
            output,
        }
    }

    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    /// Hand back the grid and output once the session is over
    pub fn into_parts(self) -> (GridStore, W) {
        (self.grid, self.output)
    }

    /// Run the menu until the user picks 0 or input ends
    pub fn run(&mut self) -> Result<(), ShellError> {
        info!("Interactive shell started");
        loop {
            match self.step()? {
                Step::Continue => continue,
                Step::Exit => break,
            }
        }
        writeln!(self.output, "Exiting...")?;
        self.output.flush()?;
        info!("Interactive shell exited");
        Ok(())
    }

    fn step(&mut self) -> Result<Step, ShellError> {
        let Some(choice) = self.prompt(MENU)? else {
            return Ok(Step::Exit);
        };
        debug!("Menu choice: {:?}", choice);

        match choice.as_str() {
            "1" => self.insert_record(),
            "2" => self.delete_record(),
            "3" => self.retrieve_record(),
            "4" => self.print(report::render_row_major(&self.grid)),
            "5" => self.print(report::render_column_major(&self.grid)),
            "6" => self.print(report::render_sparse(&self.grid)),
            "7" => self.print(report::render_complexity(GridStore::complexity_report())),
            "0" => Ok(Step::Exit),
            _ => {
                writeln!(self.output, "Invalid choice! Try again.")?;
                Ok(Step::Continue)
            }
        }
    }

    fn insert_record(&mut self) -> Result<Step, ShellError> {
        let Some(date) = self.prompt("Enter date (DD/MM/YYYY): ")? else {
            return Ok(Step::Exit);
        };
        let Some(city) = self.prompt("Enter city: ")? else {
            return Ok(Step::Exit);
        };
        let Some(raw) = self.prompt("Enter temperature: ")? else {
            return Ok(Step::Exit);
        };
        let Ok(temperature) = raw.parse::<f64>() else {
            writeln!(self.output, "Invalid number! Try again.")?;
            return Ok(Step::Continue);
        };

        let result = self.grid.insert(&date, &city, temperature);
        self.report_write(result, "Record inserted successfully!")
    }

    fn delete_record(&mut self) -> Result<Step, ShellError> {
        let Some(date) = self.prompt("Enter date (DD/MM/YYYY): ")? else {
            return Ok(Step::Exit);
        };
        let Some(city) = self.prompt("Enter city: ")? else {
            return Ok(Step::Exit);
        };

        let result = self.grid.delete(&date, &city);
        self.report_write(result, "Record deleted successfully!")
    }

    fn retrieve_record(&mut self) -> Result<Step, ShellError> {
        let Some(city) = self.prompt("Enter city: ")? else {
            return Ok(Step::Exit);
        };
        let Some(raw) = self.prompt("Enter year: ")? else {
            return Ok(Step::Exit);
        };
        let Ok(year) = raw.parse::<i32>() else {
            writeln!(self.output, "Invalid number! Try again.")?;
            return Ok(Step::Continue);
        };

        match self.grid.retrieve(&city, year) {
            Some(value) => writeln!(self.output, "Temperature: {}", format_reading(value))?,
            None => writeln!(self.output, "No data found!")?,
        }
        Ok(Step::Continue)
    }

    fn report_write(
        &mut self,
        result: Result<WriteOutcome, GridError>,
        success: &str,
    ) -> Result<Step, ShellError> {
        match result {
            Ok(WriteOutcome::Applied) => writeln!(self.output, "{success}")?,
            Ok(WriteOutcome::Ignored) => writeln!(
                self.output,
                "Record ignored: year must be {}-{} and city one of {}",
                self.grid.start_year(),
                self.grid.end_year(),
                self.grid.cities().join(", ")
            )?,
            Err(e) => {
                warn!("Rejected shell input: {}", e);
                writeln!(self.output, "{e}")?;
            }
        }
        Ok(Step::Continue)
    }

    fn print(&mut self, text: String) -> Result<Step, ShellError> {
        write!(self.output, "{text}")?;
        Ok(Step::Continue)
    }

    /// Write `label`, then read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>, ShellError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Whole numbers keep one decimal place ("30.0"), others print as-is
fn format_reading(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_session(script: &str) -> (GridStore, String) {
        let mut grid = GridStore::new(&["Delhi", "Mumbai", "Chennai"], 2022, 2024).unwrap();
        grid.populate_sample_data();

        let mut shell = Shell::new(grid, script.as_bytes(), Vec::new());
        shell.run().unwrap();
        let (grid, output) = shell.into_parts();
        (grid, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_format_reading() {
        assert_eq!(format_reading(30.0), "30.0");
        assert_eq!(format_reading(25.5), "25.5");
        assert_eq!(format_reading(-4.25), "-4.25");
    }

    #[test]
    fn test_exit_immediately() {
        let (_, output) = run_session("0\n");
        assert!(output.contains("=== Weather Data System Menu ==="));
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let (_, output) = run_session("");
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_invalid_choice() {
        let (_, output) = run_session("9\nabc\n0\n");
        assert_eq!(output.matches("Invalid choice! Try again.").count(), 2);
    }

    #[test]
    fn test_insert_then_retrieve() {
        let (grid, output) = run_session("1\n15/06/2024\nDelhi\n41\n3\ndelhi\n2024\n0\n");
        assert!(output.contains("Record inserted successfully!"));
        assert!(output.contains("Temperature: 41.0"));
        assert_eq!(grid.retrieve("Delhi", 2024), Some(41.0));
    }

    #[test]
    fn test_insert_out_of_range_is_reported() {
        let (grid, output) = run_session("1\n01/01/2030\nDelhi\n20.0\n0\n");
        assert!(output.contains("Record ignored: year must be 2022-2024"));
        assert_eq!(grid.populated_count(), 5);
    }

    #[test]
    fn test_insert_bad_temperature() {
        let (grid, output) = run_session("1\n01/01/2024\nDelhi\nhot\n0\n");
        assert!(output.contains("Invalid number! Try again."));
        assert_eq!(grid.retrieve("Delhi", 2024), None);
    }

    #[test]
    fn test_retrieve_bad_year() {
        let (_, output) = run_session("3\nDelhi\nnext\n0\n");
        assert!(output.contains("Invalid number! Try again."));
        assert!(!output.contains("Temperature:"));
        assert!(!output.contains("No data found!"));
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_insert_bad_date() {
        let (_, output) = run_session("1\n2024-01-01\nDelhi\n20\n0\n");
        assert!(output.contains("Invalid date '2024-01-01': expected DD/MM/YYYY"));
    }

    #[test]
    fn test_delete_then_retrieve() {
        let (grid, output) = run_session("2\n01/01/2022\nDelhi\n3\nDelhi\n2022\n0\n");
        assert!(output.contains("Record deleted successfully!"));
        assert!(output.contains("No data found!"));
        assert_eq!(grid.populated_count(), 4);
    }

    #[test]
    fn test_views() {
        let (_, output) = run_session("4\n5\n6\n7\n0\n");
        assert!(output.contains("--- Row-Major Access ---"));
        assert!(output.contains("--- Column-Major Access ---"));
        assert!(output.contains("--- Sparse Data (Only Valid Records) ---"));
        assert!(output.contains("--- Complexity Analysis ---"));
    }
}
