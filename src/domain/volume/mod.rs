pub mod entity;

pub use entity::Volume;

use crate::domain::{DomainError, DomainResult};

/// Volume numbers start at 1
pub fn validate_volume_number(volume_number: u32) -> DomainResult<()> {
    if volume_number == 0 {
        return Err(DomainError::InvariantViolation(
            "Volume number must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_number_bounds() {
        assert!(validate_volume_number(1).is_ok());
        assert!(validate_volume_number(0).is_err());
    }
}
