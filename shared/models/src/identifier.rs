//! Scanned identifier model.
//!
//! The result of interpreting a barcode scan or a manually typed product
//! identifier. Produced by the normalizer in `pharmreturn-utils`.

use serde::{Deserialize, Serialize};

/// Canonical `{ndc, lotNumber?, expirationDate?}` triple.
///
/// `ndc` is always present, possibly empty when nothing could be parsed.
/// When it could be normalized it is one of `XXXXX-XXXX-XX`,
/// `XXXXX-XXXX-X` or `XXXX-XXXX-X`. `expiration_date` is `YYYY-MM-DD`
/// when it was recognised, otherwise the raw text the scanner produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedIdentifier {
    pub ndc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
}

impl NormalizedIdentifier {
    pub fn from_ndc(ndc: impl Into<String>) -> Self {
        Self {
            ndc: ndc.into(),
            lot_number: None,
            expiration_date: None,
        }
    }

    pub fn with_lot(mut self, lot_number: Option<String>) -> Self {
        self.lot_number = lot_number;
        self
    }

    pub fn with_expiration(mut self, expiration_date: Option<String>) -> Self {
        self.expiration_date = expiration_date;
        self
    }

    /// True when the scan yielded no NDC at all.
    pub fn is_empty(&self) -> bool {
        self.ndc.is_empty()
    }
}
