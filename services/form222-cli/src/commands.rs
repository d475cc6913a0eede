//! Subcommand implementations.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, warn};

use pharmreturn_models::{ControlledLineItem, Registrant, RegulatedForm};
use pharmreturn_utils::{
    dea_check_digit_matches, is_valid_ndc_format, normalize_ndc, validate_batch,
    validate_registrant, AppConfig, ComplianceError, FormExporter, FormGenerator,
    FormValidation, IdentifierParser,
};

use crate::cli::{GenerateArgs, NdcArgs, ScanArgs, ValidateArgs};

/// Input document of `generate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInput {
    #[serde(default)]
    pub registrant: Option<Registrant>,
    pub items: Vec<ControlledLineItem>,
}

pub fn run_scan(args: &ScanArgs, json: bool) -> Result<i32> {
    let parser = IdentifierParser::new();
    let mut out = io::stdout().lock();

    for raw in &args.raw {
        let scan = parser.parse_detailed(raw);
        let valid = is_valid_ndc_format(&scan.identifier.ndc);

        if json {
            let line = serde_json::json!({ "input": raw, "scan": scan, "validNdc": valid });
            writeln!(out, "{}", line)?;
        } else {
            let id = &scan.identifier;
            writeln!(
                out,
                "{:<14} ndc={} lot={} exp={}{}",
                scan.format,
                id.ndc,
                id.lot_number.as_deref().unwrap_or("-"),
                id.expiration_date.as_deref().unwrap_or("-"),
                if valid { "" } else { "  (check NDC)" }
            )?;
        }
    }

    Ok(0)
}

pub fn run_ndc(args: &NdcArgs, json: bool) -> Result<i32> {
    let normalized = normalize_ndc(args.ndc.trim());
    let valid = is_valid_ndc_format(&normalized);

    if json {
        println!(
            "{}",
            serde_json::json!({ "input": args.ndc, "ndc": normalized, "valid": valid })
        );
    } else {
        println!("{}{}", normalized, if valid { "" } else { "  (invalid format)" });
    }

    Ok(if valid { 0 } else { 1 })
}

pub fn run_generate(args: &GenerateArgs, config: &AppConfig, json: bool) -> Result<i32> {
    let input: GenerateInput = read_json(&args.input)?;
    let registrant = resolve_registrant(input.registrant, config)?;
    check_registrant(&registrant);

    if input.items.is_empty() {
        warn!("No controlled substances found in {}", args.input.display());
        if json {
            println!("[]");
        }
        return Ok(0);
    }

    let forms = FormGenerator::new()
        .with_default_package_size(config.forms.default_package_size)
        .generate(&registrant, &input.items);
    let results = validate_batch(&forms);

    let format = args.format.unwrap_or(config.forms.export_format);
    let exporter = FormExporter::new()?;

    // Files always use the export format. On stdout `--json` prints forms
    // and validation results as one document instead.
    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir)
            .map_err(ComplianceError::from)
            .with_context(|| format!("creating {}", dir.display()))?;

        for form in &forms {
            let path = dir.join(format!("{}.{}", form.form_number, format.extension()));
            fs::write(&path, exporter.export(form, format)?)
                .map_err(ComplianceError::from)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "Wrote form");
        }

        if json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    } else if json {
        println!("{}", serde_json::to_string_pretty(&generation_report(&forms, &results))?);
    } else {
        let mut out = io::stdout().lock();
        for form in &forms {
            out.write_all(&exporter.export(form, format)?)?;
            writeln!(out)?;
        }
    }

    report_violations(&results);
    Ok(exit_code_for(&results))
}

pub fn run_validate(args: &ValidateArgs, json: bool) -> Result<i32> {
    let forms: Vec<RegulatedForm> = read_json(&args.input)?;
    let results = validate_batch(&forms);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            if result.is_valid {
                println!("{}: OK", result.form_number);
            } else {
                println!("{}: {} violation(s)", result.form_number, result.violations.len());
                for violation in &result.violations {
                    println!("  - {}", violation);
                }
            }
        }
    }

    Ok(exit_code_for(&results))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .map_err(ComplianceError::from)
        .with_context(|| format!("reading {}", path.display()))?;

    let value = serde_json::from_str(&raw)
        .map_err(ComplianceError::from)
        .with_context(|| format!("parsing {}", path.display()))?;

    Ok(value)
}

/// Registrant from the input document, else the configured one.
pub fn resolve_registrant(
    from_input: Option<Registrant>,
    config: &AppConfig,
) -> Result<Registrant, ComplianceError> {
    from_input
        .or_else(|| config.registrant.clone())
        .ok_or_else(|| {
            ComplianceError::validation(
                "registrant",
                "No registrant in the input document or configuration",
            )
        })
}

// Registrant problems are warnings here; validate_form decides usability.
fn check_registrant(registrant: &Registrant) {
    if let Err(error) = validate_registrant(registrant) {
        warn!(error = %error, "Registrant profile is incomplete");
    }
    if !dea_check_digit_matches(&registrant.dea_number) {
        warn!(
            dea_number = %registrant.dea_number,
            "DEA number check digit does not match"
        );
    }
}

/// `--json` stdout document of `generate`.
fn generation_report(forms: &[RegulatedForm], results: &[FormValidation]) -> serde_json::Value {
    serde_json::json!({ "forms": forms, "validation": results })
}

fn report_violations(results: &[FormValidation]) {
    for result in results.iter().filter(|r| !r.is_valid) {
        for violation in &result.violations {
            eprintln!("{}: {}", result.form_number, violation);
        }
    }
}

fn exit_code_for(results: &[FormValidation]) -> i32 {
    if results.iter().all(|r| r.is_valid) {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registrant(name: &str) -> Registrant {
        Registrant {
            business_name: name.to_string(),
            dea_number: "AB1234563".to_string(),
            address: "100 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip: "62701".to_string(),
        }
    }

    #[test]
    fn test_input_registrant_wins_over_config() {
        let config = AppConfig {
            registrant: Some(registrant("Configured")),
            ..AppConfig::default()
        };

        let chosen = resolve_registrant(Some(registrant("From input")), &config).unwrap();
        assert_eq!(chosen.business_name, "From input");

        let chosen = resolve_registrant(None, &config).unwrap();
        assert_eq!(chosen.business_name, "Configured");
    }

    #[test]
    fn test_missing_registrant_is_an_error() {
        let err = resolve_registrant(None, &AppConfig::default()).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_generate_input_parses_ui_payload() {
        let input: GenerateInput = serde_json::from_str(
            r#"{
                "registrant": {
                    "businessName": "HealthCare Pharmacy",
                    "deaNumber": "AB1234567",
                    "address": "100 Main St",
                    "city": "Springfield",
                    "state": "IL",
                    "zip": "62701"
                },
                "items": [
                    {"ndc": "00406-0552-01", "productName": "Roxicodone", "strength": "5 mg",
                     "dosageForm": "Tablet", "quantity": 2, "packageSize": 30}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(input.registrant.unwrap().dea_number, "AB1234567");
        assert_eq!(input.items[0].package_size, Some(30));
    }

    #[test]
    fn test_exit_code_for_results() {
        let ok = FormValidation {
            form_number: "a".to_string(),
            is_valid: true,
            violations: vec![],
        };
        let bad = FormValidation {
            form_number: "b".to_string(),
            is_valid: false,
            violations: vec!["Invalid DEA number format".to_string()],
        };
        assert_eq!(exit_code_for(&[ok.clone()]), 0);
        assert_eq!(exit_code_for(&[ok, bad]), 1);
    }

    #[test]
    fn test_generation_report_carries_forms_and_validation() {
        let forms = pharmreturn_utils::generate_forms(
            &registrant("HealthCare Pharmacy"),
            &[ControlledLineItem::new("00406-0552-01", "Roxicodone", 2)],
        );
        let results = validate_batch(&forms);

        let report = generation_report(&forms, &results);
        assert_eq!(report["forms"][0]["formNumber"], forms[0].form_number.as_str());
        assert_eq!(report["forms"][0]["lineItems"][0]["ndc"], "00406-0552-01");
        assert_eq!(report["validation"][0]["isValid"], true);
    }

    #[test]
    fn test_registrant_check_tolerates_non_ascii_digits() {
        let mut malformed = registrant("HealthCare Pharmacy");
        malformed.dea_number = "AB١٢٣٤٥٦٧".to_string();
        check_registrant(&malformed);

        let forms = pharmreturn_utils::generate_forms(
            &malformed,
            &[ControlledLineItem::new("00406-0552-01", "Roxicodone", 2)],
        );
        let results = validate_batch(&forms);
        assert_eq!(exit_code_for(&results), 1);
        assert_eq!(results[0].violations, vec!["Invalid DEA number format".to_string()]);
    }
}
