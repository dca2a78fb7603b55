use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use std::collections::HashMap;
use std::str::FromStr;

use super::storage_class::StorageClass;
use crate::domain::errors::ValidationError;

/// Bytes per GB used for pricing (binary gigabyte)
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Smallest billable size, in GB, so that empty objects still count
pub const MIN_BILLABLE_GB: f64 = 0.000001;

/// Monthly unit prices (AUD per GB-month) keyed by storage-class identifier.
///
/// Immutable once built. Looking up a class that has no entry yields `0.0`,
/// so unrecognised classes contribute nothing to either side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    prices: HashMap<String, f64>,
}

impl PriceTable {
    pub fn new(prices: HashMap<String, f64>) -> Result<Self, ValidationError> {
        for (class, price) in &prices {
            if !price.is_finite() || *price < 0.0 {
                return Err(ValidationError::InvalidPrice {
                    storage_class: class.clone(),
                    value: *price,
                });
            }
        }
        Ok(Self { prices })
    }

    /// Unit price for a storage-class identifier, `0.0` when unknown
    pub fn price_for(&self, storage_class: &str) -> f64 {
        self.prices.get(storage_class).copied().unwrap_or(0.0)
    }

    pub fn price_for_class(&self, storage_class: &StorageClass) -> f64 {
        self.price_for(storage_class.as_str())
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        let prices = [
            (StorageClass::Standard, 0.033),
            (StorageClass::StandardIa, 0.0198),
            (StorageClass::OnezoneIa, 0.0152),
            (StorageClass::GlacierIr, 0.0052),
            (StorageClass::Glacier, 0.0045),
            (StorageClass::DeepArchive, 0.0012),
        ]
        .into_iter()
        .map(|(class, price)| (class.as_str().to_string(), price))
        .collect();

        Self { prices }
    }
}

/// Object size in GB, floored at [`MIN_BILLABLE_GB`]
pub fn billable_gb(size_bytes: u64) -> f64 {
    (size_bytes as f64 / BYTES_PER_GB).max(MIN_BILLABLE_GB)
}

/// Round a monetary amount to cents, halves away from zero.
///
/// Rounding happens on the shortest decimal form of the value, so `1.005`
/// becomes `1.01` even though its binary value sits just below the midpoint.
pub fn round_to_cents(value: f64) -> f64 {
    BigDecimal::from_str(&value.to_string())
        .ok()
        .and_then(|d| d.with_scale_round(2, RoundingMode::HalfUp).to_f64())
        .unwrap_or_else(|| (value * 100.0).round() / 100.0)
}
