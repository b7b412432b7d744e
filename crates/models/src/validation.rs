//! Field-rule helpers shared by the entity validators.

use crate::errors::ModelError;

/// Collects every failing rule of one input so the caller sees them together.
#[derive(Debug, Default)]
pub struct Violations {
    messages: Vec<String>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, result: Result<(), ModelError>) {
        if let Err(e) = result {
            self.messages.push(e.detail().to_string());
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn finish(self) -> Result<(), ModelError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(ModelError::Validation(self.messages.join("; ")))
        }
    }
}

/// Required text with a length window measured in characters.
pub fn check_required_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), ModelError> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    if len < min || len > max {
        return Err(ModelError::Validation(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(())
}

pub fn check_max_len(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.chars().count() > max {
        return Err(ModelError::Validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

pub fn check_positive_id(field: &str, id: i32) -> Result<(), ModelError> {
    if id <= 0 {
        return Err(ModelError::Validation(format!("{field} must be greater than 0")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_len_counts_chars_not_bytes() {
        assert!(check_required_len("name", "Zoë", 2, 3).is_ok());
        assert!(check_required_len("name", "   ", 1, 10).is_err());
        let e = check_required_len("town", "X", 2, 100).unwrap_err();
        assert_eq!(e.detail(), "town must be between 2 and 100 characters");
    }

    #[test]
    fn violations_join_messages() {
        let mut v = Violations::new();
        v.check(check_positive_id("worker_id", 0));
        v.check(check_positive_id("location_id", 3));
        v.push("end_time must be after start_time");
        let e = v.finish().unwrap_err();
        assert_eq!(e.detail(), "worker_id must be greater than 0; end_time must be after start_time");
    }
}
