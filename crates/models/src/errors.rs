use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
}

impl ModelError {
    /// Message without the variant prefix, for aggregation.
    pub fn detail(&self) -> &str {
        match self {
            ModelError::Validation(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_drops_prefix() {
        let e = ModelError::Validation("name is required".into());
        assert_eq!(e.to_string(), "validation error: name is required");
        assert_eq!(e.detail(), "name is required");
    }
}
