//! Form 222 Generator
//!
//! Splits controlled line items into consecutive forms of at most ten
//! lines, in input order.

use chrono::{DateTime, Utc};
use tracing::info;

use pharmreturn_models::{
    ControlledLineItem, FormLineItem, FormStatus, RegistrantInfo, Registrant, RegulatedForm,
    DEFAULT_PACKAGE_SIZE, MAX_LINES_PER_FORM,
};

/// Builds draft forms for a registrant.
#[derive(Debug, Clone)]
pub struct FormGenerator {
    /// Package size printed when an item does not carry one
    default_package_size: u32,
}

impl Default for FormGenerator {
    fn default() -> Self {
        Self {
            default_package_size: DEFAULT_PACKAGE_SIZE,
        }
    }
}

impl FormGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_package_size(mut self, size: u32) -> Self {
        self.default_package_size = size;
        self
    }

    pub fn generate(&self, registrant: &Registrant, items: &[ControlledLineItem]) -> Vec<RegulatedForm> {
        self.generate_at(registrant, items, Utc::now())
    }

    /// Generate forms stamped with an explicit execution instant.
    pub fn generate_at(
        &self,
        registrant: &Registrant,
        items: &[ControlledLineItem],
        executed_at: DateTime<Utc>,
    ) -> Vec<RegulatedForm> {
        let timestamp = executed_at.timestamp_millis();
        let registrant_info = RegistrantInfo::from(registrant);

        let forms: Vec<RegulatedForm> = items
            .chunks(MAX_LINES_PER_FORM)
            .enumerate()
            .map(|(index, chunk)| RegulatedForm {
                form_number: form_number(&registrant.dea_number, timestamp, index),
                registrant_info: registrant_info.clone(),
                line_items: chunk
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.line_item(i, item))
                    .collect(),
                total_lines: chunk.len(),
                date_executed: executed_at,
                status: FormStatus::Draft,
            })
            .collect();

        info!(
            dea_number = %registrant.dea_number,
            items = items.len(),
            forms = forms.len(),
            "Generated Form 222 batch"
        );

        forms
    }

    fn line_item(&self, index: usize, item: &ControlledLineItem) -> FormLineItem {
        FormLineItem {
            line_number: (index + 1) as u32,
            name_of_item: item.item_name(),
            ndc: item.ndc.clone(),
            number_of_packages: item.quantity,
            size_of_package: item
                .package_size
                .unwrap_or(self.default_package_size)
                .to_string(),
            date_received: None,
            packages_received: None,
        }
    }
}

/// `{dea}-{epoch millis}-{1-based position in batch}`
pub fn form_number(dea_number: &str, timestamp_millis: i64, index: usize) -> String {
    format!("{}-{}-{}", dea_number, timestamp_millis, index + 1)
}

/// Generate draft forms with the default package size.
pub fn generate_forms(registrant: &Registrant, items: &[ControlledLineItem]) -> Vec<RegulatedForm> {
    FormGenerator::default().generate(registrant, items)
}

pub fn generate_forms_at(
    registrant: &Registrant,
    items: &[ControlledLineItem],
    executed_at: DateTime<Utc>,
) -> Vec<RegulatedForm> {
    FormGenerator::default().generate_at(registrant, items, executed_at)
}
