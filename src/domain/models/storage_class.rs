/// Storage classes known to the price model
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageClass {
    Standard,
    StandardIa,
    OnezoneIa,
    GlacierIr,
    Glacier,
    DeepArchive,
    Custom(String),
}

impl StorageClass {
    /// The six classes that carry a built-in price
    pub const WELL_KNOWN: [StorageClass; 6] = [
        StorageClass::Standard,
        StorageClass::StandardIa,
        StorageClass::OnezoneIa,
        StorageClass::GlacierIr,
        StorageClass::Glacier,
        StorageClass::DeepArchive,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            StorageClass::Standard => "STANDARD",
            StorageClass::StandardIa => "STANDARD_IA",
            StorageClass::OnezoneIa => "ONEZONE_IA",
            StorageClass::GlacierIr => "GLACIER_IR",
            StorageClass::Glacier => "GLACIER",
            StorageClass::DeepArchive => "DEEP_ARCHIVE",
            StorageClass::Custom(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "STANDARD" => StorageClass::Standard,
            "STANDARD_IA" => StorageClass::StandardIa,
            "ONEZONE_IA" => StorageClass::OnezoneIa,
            "GLACIER_IR" => StorageClass::GlacierIr,
            "GLACIER" => StorageClass::Glacier,
            "DEEP_ARCHIVE" => StorageClass::DeepArchive,
            _ => StorageClass::Custom(s.to_string()),
        }
    }
}

impl From<&str> for StorageClass {
    fn from(s: &str) -> Self {
        StorageClass::parse(s)
    }
}

impl std::fmt::Display for StorageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_round_trip() {
        for class in StorageClass::WELL_KNOWN {
            assert_eq!(StorageClass::parse(class.as_str()), class);
        }
    }

    #[test]
    fn test_unknown_class_is_kept_verbatim() {
        let class = StorageClass::from("INTELLIGENT_TIERING");
        assert_eq!(class, StorageClass::Custom("INTELLIGENT_TIERING".to_string()));
        assert_eq!(class.as_str(), "INTELLIGENT_TIERING");
    }
}
