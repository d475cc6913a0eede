//! Form 222 Validation
//!
//! Field-presence and format checks a form must pass before it can be
//! downloaded or submitted. Every violation is reported, not just the first.

use serde::Serialize;

use pharmreturn_models::{RegulatedForm, MAX_LINES_PER_FORM};

use crate::validation::is_valid_dea_number;

/// Human-readable violations; empty means the form is usable.
pub fn validate_form(form: &RegulatedForm) -> Vec<String> {
    let mut violations = Vec::new();
    let dea_number = &form.registrant_info.dea_number;

    // An empty DEA number reports both messages.
    if dea_number.trim().is_empty() {
        violations.push("DEA number is required".to_string());
    }
    if !is_valid_dea_number(dea_number) {
        violations.push("Invalid DEA number format".to_string());
    }

    if form.line_items.is_empty() {
        violations.push("At least one line item is required.".to_string());
    }
    if form.line_items.len() > MAX_LINES_PER_FORM {
        violations.push(format!("Maximum {} line items per form", MAX_LINES_PER_FORM));
    }

    for (index, line) in form.line_items.iter().enumerate() {
        let n = index + 1;
        if line.ndc.trim().is_empty() {
            violations.push(format!("Line {}: NDC is required", n));
        }
        if line.name_of_item.trim().is_empty() {
            violations.push(format!("Line {}: Item name is required", n));
        }
        if line.number_of_packages == 0 {
            violations.push(format!("Line {}: Number of packages must be greater than 0", n));
        }
    }

    violations
}

/// Validation outcome for one form of a batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValidation {
    pub form_number: String,
    pub is_valid: bool,
    pub violations: Vec<String>,
}

/// Validate every form of a batch, in order.
pub fn validate_batch(forms: &[RegulatedForm]) -> Vec<FormValidation> {
    forms
        .iter()
        .map(|form| {
            let violations = validate_form(form);
            if !violations.is_empty() {
                tracing::debug!(
                    form_number = %form.form_number,
                    violations = violations.len(),
                    "Form failed validation"
                );
            }
            FormValidation {
                form_number: form.form_number.clone(),
                is_valid: violations.is_empty(),
                violations,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pharmreturn_models::{FormLineItem, FormStatus, RegistrantInfo};

    fn line(line_number: u32) -> FormLineItem {
        FormLineItem {
            line_number,
            name_of_item: "Oxycodone HCl 5 mg Tablet".to_string(),
            ndc: "00406-0552-01".to_string(),
            number_of_packages: 1,
            size_of_package: "100".to_string(),
            date_received: None,
            packages_received: None,
        }
    }

    fn form(dea_number: &str, lines: Vec<FormLineItem>) -> RegulatedForm {
        RegulatedForm {
            form_number: format!("{}-0-1", dea_number),
            registrant_info: RegistrantInfo {
                name: "HealthCare Pharmacy".to_string(),
                dea_number: dea_number.to_string(),
                ..Default::default()
            },
            total_lines: lines.len(),
            line_items: lines,
            date_executed: Utc::now(),
            status: FormStatus::Draft,
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(validate_form(&form("AB1234567", vec![line(1)])).is_empty());
    }

    #[test]
    fn test_wrong_dea_format() {
        let violations = validate_form(&form("123456789", vec![line(1)]));
        assert_eq!(violations, vec!["Invalid DEA number format".to_string()]);
    }

    #[test]
    fn test_empty_dea_reports_both_messages() {
        let violations = validate_form(&form("", vec![line(1)]));
        assert_eq!(
            violations,
            vec![
                "DEA number is required".to_string(),
                "Invalid DEA number format".to_string(),
            ]
        );
    }

    #[test]
    fn test_non_ascii_digit_dea_number() {
        let violations = validate_form(&form("AB١٢٣٤٥٦٧", vec![line(1)]));
        assert_eq!(violations, vec!["Invalid DEA number format".to_string()]);
    }

    #[test]
    fn test_no_line_items() {
        let violations = validate_form(&form("AB1234567", vec![]));
        assert_eq!(violations, vec!["At least one line item is required.".to_string()]);
    }

    #[test]
    fn test_eleven_line_items_rejected() {
        let lines = (1..=11).map(line).collect();
        let violations = validate_form(&form("AB1234567", lines));
        assert!(violations.iter().any(|v| v.contains("Maximum 10 line items")));
    }

    #[test]
    fn test_line_violations_are_collected() {
        let mut bad = line(2);
        bad.ndc = String::new();
        bad.name_of_item = "  ".to_string();
        bad.number_of_packages = 0;

        let violations = validate_form(&form("", vec![line(1), bad]));
        assert_eq!(violations.len(), 5);
        assert!(violations.contains(&"Line 2: NDC is required".to_string()));
        assert!(violations.contains(&"Line 2: Item name is required".to_string()));
        assert!(violations.contains(&"Line 2: Number of packages must be greater than 0".to_string()));
    }

    #[test]
    fn test_validate_batch() {
        let results = validate_batch(&[form("AB1234567", vec![line(1)]), form("bad", vec![])]);
        assert!(results[0].is_valid);
        assert!(!results[1].is_valid);
        assert_eq!(results[1].violations.len(), 2);
    }
}
