//! Field validation rules
//!
//! Two deliberately distinct rule sets: name-like fields (usernames,
//! author/lender names) allow 4-20 characters, while titles, genre names
//! and library names allow 3-40. Passwords allow 4-60 on input; the stored
//! value is an opaque hash and never crosses back to callers.

use std::borrow::Cow;

use validator::ValidationError;

fn rule_error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

fn bounded(value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule_error("blank", "cannot be blank".to_string()));
    }
    let len = value.chars().count();
    if len < min || len > max {
        return Err(rule_error(
            "length",
            format!(
                "length should not be less than {} characters and no more than {}",
                min, max
            ),
        ));
    }
    Ok(())
}

/// Username, author name, lender name.
pub fn name(value: &str) -> Result<(), ValidationError> {
    bounded(value, 4, 20)
}

/// Plain-text password on signup/update input.
pub fn password(value: &str) -> Result<(), ValidationError> {
    bounded(value, 4, 60)
}

/// Book title, genre name, library name.
pub fn title(value: &str) -> Result<(), ValidationError> {
    bounded(value, 3, 40)
}

/// Every element of a list of book titles.
pub fn title_list(values: &[String]) -> Result<(), ValidationError> {
    for value in values {
        title(value)?;
    }
    Ok(())
}

/// Every element of a list of lender names.
pub fn name_list(values: &[String]) -> Result<(), ValidationError> {
    for value in values {
        name(value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_bounds() {
        assert!(name("abc").is_err());
        assert!(name("abcd").is_ok());
        assert!(name("a".repeat(20).as_str()).is_ok());
        assert!(name("a".repeat(21).as_str()).is_err());
    }

    #[test]
    fn test_name_rejects_blank() {
        assert!(name("    ").is_err());
        assert!(name("\t\n ").is_err());
    }

    #[test]
    fn test_password_bounds() {
        assert!(password("abc").is_err());
        assert!(password("abcd").is_ok());
        assert!(password("a".repeat(60).as_str()).is_ok());
        assert!(password("a".repeat(61).as_str()).is_err());
    }

    #[test]
    fn test_title_bounds() {
        assert!(title("ab").is_err());
        assert!(title("abc").is_ok());
        assert!(title("1984").is_ok());
        assert!(title("a".repeat(40).as_str()).is_ok());
        assert!(title("a".repeat(41).as_str()).is_err());
    }

    #[test]
    fn test_title_list_checks_every_element() {
        let ok = vec!["1984".to_string(), "The Great Gatsby".to_string()];
        assert!(title_list(&ok).is_ok());
        let bad = vec!["1984".to_string(), "ab".to_string()];
        assert!(title_list(&bad).is_err());
        assert!(title_list(&[]).is_ok());
    }

    #[test]
    fn test_name_list_checks_every_element() {
        let ok = vec!["Jake".to_string(), "Smith".to_string()];
        assert!(name_list(&ok).is_ok());
        let bad = vec!["Jake".to_string(), "Bob".to_string()];
        assert!(name_list(&bad).is_err());
    }
}
