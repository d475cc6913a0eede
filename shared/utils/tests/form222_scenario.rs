//! End-to-end Form 222 scenarios: scan, generate, validate, export.

use chrono::{TimeZone, Utc};
use pharmreturn_models::{ControlledLineItem, FormStatus, Registrant, RegulatedForm};
use pharmreturn_utils::{
    generate_forms, generate_forms_at, is_valid_ndc_format, parse_identifier, validate_form,
    ExportFormat, FormExporter,
};

fn healthcare_pharmacy() -> Registrant {
    Registrant {
        business_name: "HealthCare Pharmacy".to_string(),
        dea_number: "AB1234567".to_string(),
        address: "100 Main St".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip: "62701".to_string(),
    }
}

fn controlled_items(count: u32) -> Vec<ControlledLineItem> {
    (1..=count)
        .map(|i| ControlledLineItem {
            ndc: format!("00406-{:04}-01", i),
            non_proprietary_name: Some("Hydrocodone Bitartrate".to_string()),
            product_name: "Hysingla ER".to_string(),
            strength: "20 mg".to_string(),
            dosage_form: "Tablet".to_string(),
            quantity: i,
            package_size: None,
        })
        .collect()
}

#[test]
fn fifteen_items_produce_two_valid_forms() {
    let forms = generate_forms(&healthcare_pharmacy(), &controlled_items(15));

    assert_eq!(forms.len(), 2);
    assert_eq!(forms[0].line_items.len(), 10);
    assert_eq!(forms[1].line_items.len(), 5);
    assert_eq!(forms[1].line_items[4].number_of_packages, 15);
    assert_eq!(forms[1].line_items[4].line_number, 5);

    for form in &forms {
        assert_eq!(validate_form(form), Vec::<String>::new());
        assert_eq!(form.status, FormStatus::Draft);
        assert_eq!(form.registrant_info.name, "HealthCare Pharmacy");
    }
}

#[test]
fn scanned_identifiers_feed_the_generator() {
    let scans = [
        "00071-0156-23|LOT123|2024-12-31",
        "00406055201:LOTX9Z1:2025/01/31",
        "Roxicodone NDC 59011041010 LOT 4417A EXP 2026-02-28",
    ];

    let items: Vec<ControlledLineItem> = scans
        .iter()
        .map(|scan| parse_identifier(scan))
        .inspect(|id| assert!(is_valid_ndc_format(&id.ndc), "unexpected ndc {}", id.ndc))
        .map(|id| ControlledLineItem::new(id.ndc, "Controlled product", 1))
        .collect();

    let forms = generate_forms(&healthcare_pharmacy(), &items);
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0].line_items[0].ndc, "00071-0156-23");
    assert_eq!(forms[0].line_items[1].ndc, "00406-0552-01");
    assert_eq!(forms[0].line_items[2].ndc, "59011-0410-10");
    assert!(validate_form(&forms[0]).is_empty());
}

fn sample_form() -> RegulatedForm {
    let executed_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    generate_forms_at(&healthcare_pharmacy(), &controlled_items(2), executed_at).remove(0)
}

/// Positions of each needle in order; panics when one is missing.
fn positions(haystack: &str, needles: &[&str]) -> Vec<usize> {
    let mut from = 0;
    needles
        .iter()
        .map(|needle| {
            let found = haystack[from..]
                .find(needle)
                .unwrap_or_else(|| panic!("'{}' missing or out of order", needle));
            from += found + needle.len();
            from
        })
        .collect()
}

fn content_contract(form: &RegulatedForm) -> Vec<String> {
    let mut needles = vec![
        form.form_number.clone(),
        "HealthCare Pharmacy".to_string(),
        "AB1234567".to_string(),
        "100 Main St".to_string(),
        "Springfield".to_string(),
        "IL".to_string(),
        "62701".to_string(),
    ];
    for line in &form.line_items {
        needles.push(line.line_number.to_string());
        needles.push(line.name_of_item.clone());
        needles.push(line.ndc.clone());
        needles.push(line.number_of_packages.to_string());
        needles.push(line.size_of_package.clone());
    }
    needles.push("2024-03-01".to_string());
    needles
}

#[test]
fn every_export_format_keeps_content_order() {
    let form = sample_form();
    let exporter = FormExporter::new().unwrap();
    let contract = content_contract(&form);
    let needles: Vec<&str> = contract.iter().map(String::as_str).collect();

    for format in [ExportFormat::Text, ExportFormat::Json, ExportFormat::Csv] {
        let bytes = exporter.export(&form, format).unwrap();
        let content = String::from_utf8(bytes).unwrap();
        let found = positions(&content, &needles);
        assert_eq!(found.len(), needles.len(), "format {:?}", format);
    }
}

#[test]
fn json_export_reads_back_as_the_same_form() {
    let form = sample_form();
    let bytes = FormExporter::new()
        .unwrap()
        .export(&form, ExportFormat::Json)
        .unwrap();
    let parsed: RegulatedForm = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed, form);
}
