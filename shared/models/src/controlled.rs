//! Controlled-substance line items fed into the form generator.

use serde::{Deserialize, Serialize};

/// Package size assumed when an item does not carry one. This mirrors the
/// most common size in the product catalog, not a regulatory default.
pub const DEFAULT_PACKAGE_SIZE: u32 = 100;

/// One controlled product being transferred.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ControlledLineItem {
    pub ndc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_proprietary_name: Option<String>,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub strength: String,
    #[serde(default)]
    pub dosage_form: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_size: Option<u32>,
}

impl ControlledLineItem {
    pub fn new(ndc: impl Into<String>, product_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            ndc: ndc.into(),
            product_name: product_name.into(),
            quantity,
            ..Self::default()
        }
    }

    /// Generic name when known, otherwise the product name.
    pub fn display_name(&self) -> &str {
        self.non_proprietary_name
            .as_deref()
            .unwrap_or(&self.product_name)
    }

    /// `"{name} {strength} {dosage form}"` with gaps from missing fields collapsed.
    pub fn item_name(&self) -> String {
        [self.display_name(), self.strength.as_str(), self.dosage_form.as_str()]
            .iter()
            .flat_map(|part| part.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
