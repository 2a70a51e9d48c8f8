use super::entity::NewSeries;
use crate::domain::{DomainError, DomainResult};

/// Validates all NewSeries invariants
pub fn validate_series(series: &NewSeries) -> DomainResult<()> {
    validate_title(&series.title)?;
    validate_total_volumes(series.total_volumes)?;
    Ok(())
}

/// Title cannot be empty
fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Series title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// A known total is at least one volume
pub fn validate_total_volumes(total_volumes: Option<u32>) -> DomainResult<()> {
    if total_volumes == Some(0) {
        return Err(DomainError::InvariantViolation(
            "Total volumes must be at least 1 when known".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold true for Series:
///
/// 1. Title cannot be empty
/// 2. Total volumes is either unknown or >= 1
/// 3. A series can exist without any volume rows
/// 4. Deleting a series deletes its volumes

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_series() {
        let series = NewSeries::titled("Dandadan").with_total_volumes(Some(12));
        assert!(validate_series(&series).is_ok());
    }

    #[test]
    fn test_unknown_total_is_valid() {
        let series = NewSeries::titled("Dandadan");
        assert!(validate_series(&series).is_ok());
    }

    #[test]
    fn test_empty_title_fails() {
        let series = NewSeries::titled("   ");
        assert!(validate_series(&series).is_err());
    }

    #[test]
    fn test_zero_total_fails() {
        let series = NewSeries::titled("Dandadan").with_total_volumes(Some(0));
        assert!(validate_series(&series).is_err());
    }
}
