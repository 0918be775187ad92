/// Year extraction for `DD/MM/YYYY` date strings
///
/// Only the year matters to the grid, so the day and month components are
/// carried through unvalidated. The year must be the third `/`-separated
/// component and must be an integer.
use regex::Regex;
use std::sync::LazyLock;

use crate::grid::GridError;

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^/]*)/([^/]*)/\s*(-?\d{1,9})$").expect("date pattern is a valid regex")
});

/// Extract the year from a `DD/MM/YYYY` date string
///
/// # Examples
///
/// ```
/// use temperature_grid::grid::extract_year;
///
/// assert_eq!(extract_year("01/01/2022").unwrap(), 2022);
/// assert_eq!(extract_year(" 15/08/1999 ").unwrap(), 1999);
/// assert!(extract_year("2022-01-01").is_err());
/// ```
pub fn extract_year(date: &str) -> Result<i32, GridError> {
    let trimmed = date.trim();
    let captures = DATE_PATTERN
        .captures(trimmed)
        .ok_or_else(|| GridError::InvalidDate(date.to_string()))?;

    captures[3]
        .parse::<i32>()
        .map_err(|_| GridError::InvalidDate(date.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_year_standard_format() {
        assert_eq!(extract_year("01/01/2022").unwrap(), 2022);
        assert_eq!(extract_year("31/12/2024").unwrap(), 2024);
    }

    #[test]
    fn test_extract_year_ignores_day_and_month_order() {
        // MM/DD/YYYY still yields the same year
        assert_eq!(extract_year("12/31/2023").unwrap(), 2023);
    }

    #[test]
    fn test_extract_year_does_not_validate_day_or_month() {
        assert_eq!(extract_year("99/99/2023").unwrap(), 2023);
    }

    #[test]
    fn test_extract_year_short_year() {
        assert_eq!(extract_year("1/1/24").unwrap(), 24);
    }

    #[test]
    fn test_extract_year_trims_whitespace() {
        assert_eq!(extract_year("  01/01/2022\n").unwrap(), 2022);
    }

    #[test]
    fn test_extract_year_iso_format_rejected() {
        assert_eq!(
            extract_year("2022-01-01"),
            Err(GridError::InvalidDate("2022-01-01".to_string()))
        );
    }

    #[test]
    fn test_extract_year_non_numeric_year() {
        assert!(extract_year("01/01/abcd").is_err());
    }

    #[test]
    fn test_extract_year_missing_component() {
        assert!(extract_year("01/2022").is_err());
        assert!(extract_year("").is_err());
    }

    #[test]
    fn test_extract_year_too_many_components() {
        assert!(extract_year("01/01/2022/extra").is_err());
    }
}
