use crate::error::{DashboardError, Result};

/// Check a user-typed city name before anything is fetched.
///
/// Returns the trimmed name. Only ASCII letters, whitespace and hyphens are
/// accepted.
pub fn validate_city(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DashboardError::EmptyCity);
    }

    let valid = trimmed
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == '-');
    if !valid {
        return Err(DashboardError::InvalidCityFormat);
    }

    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_letters_spaces_and_hyphens() {
        assert_eq!(validate_city("  Quezon City ").unwrap(), "Quezon City");
        assert_eq!(validate_city("Lapu-Lapu").unwrap(), "Lapu-Lapu");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(matches!(validate_city(""), Err(DashboardError::EmptyCity)));
        assert!(matches!(validate_city("   \t"), Err(DashboardError::EmptyCity)));
    }

    #[test]
    fn rejects_digits_and_punctuation() {
        assert!(matches!(validate_city("Manila1"), Err(DashboardError::InvalidCityFormat)));
        assert!(matches!(validate_city("Manila,PH"), Err(DashboardError::InvalidCityFormat)));
        assert!(matches!(validate_city("Parañaque"), Err(DashboardError::InvalidCityFormat)));
    }
}
