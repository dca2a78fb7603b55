use crate::domain::errors::ValidationError;

/// Opaque pagination handle issued by a storage provider.
///
/// The token is handed back verbatim on the next listing request. Nothing
/// outside the adapter that issued it may inspect or build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyContinuationToken);
        }
        Ok(Self(value))
    }

    /// Wrap a provider value, treating an empty string as "no more pages"
    pub fn from_provider(value: Option<String>) -> Option<Self> {
        value.and_then(|v| Self::new(v).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_provider_token_ends_listing() {
        assert_eq!(ContinuationToken::from_provider(None), None);
        assert_eq!(ContinuationToken::from_provider(Some(String::new())), None);

        let raw = "1ueGcxLPRx1Tr/XYExHnhbYLgveDs2J/wm36Hy4vbOwM=";
        let token = ContinuationToken::from_provider(Some(raw.to_string())).unwrap();
        assert_eq!(token.as_str(), raw);
    }
}
