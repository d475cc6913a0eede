//! Form 222 Export
//!
//! Serializes a form as text, JSON or CSV. Every format carries the same
//! content in the same order: form number, registrant block, each line
//! (number, item name, NDC, package count, package size) and finally the
//! execution date.

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use pharmreturn_models::RegulatedForm;

use crate::error::{ComplianceError, ComplianceResult};

const TEXT_TEMPLATE_NAME: &str = "form222_text";

const TEXT_TEMPLATE: &str = r#"DEA FORM 222 - U.S. OFFICIAL ORDER FORM FOR SCHEDULE I & II CONTROLLED SUBSTANCES
Form Number: {{form_number}}

REGISTRANT
Name: {{registrant.name}}
DEA Number: {{registrant.dea_number}}
Address: {{registrant.address}}
{{registrant.city}}, {{registrant.state}} {{registrant.zip}}

LINE ITEMS
{{#each lines}}
Line {{line_number}}: {{name_of_item}}
  NDC: {{ndc}}
  Packages: {{number_of_packages}}
  Package Size: {{size_of_package}}
{{/each}}

Total Lines: {{total_lines}}
Date Executed: {{date_executed}}
Status: {{status}}
"#;

/// Output format of an exported form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ComplianceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ComplianceError::validation(
                "export_format",
                format!("Unknown export format '{}'. Expected text, json or csv", other),
            )),
        }
    }
}

/// Renders forms in any [`ExportFormat`].
pub struct FormExporter {
    handlebars: Handlebars<'static>,
}

impl FormExporter {
    pub fn new() -> ComplianceResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_template_string(TEXT_TEMPLATE_NAME, TEXT_TEMPLATE)?;

        Ok(Self { handlebars })
    }

    pub fn export(&self, form: &RegulatedForm, format: ExportFormat) -> ComplianceResult<Vec<u8>> {
        match format {
            ExportFormat::Text => self.render_text(form).map(String::into_bytes),
            ExportFormat::Json => Ok(serde_json::to_vec_pretty(form)?),
            ExportFormat::Csv => render_csv(form),
        }
    }

    pub fn render_text(&self, form: &RegulatedForm) -> ComplianceResult<String> {
        let registrant = &form.registrant_info;
        let context = serde_json::json!({
            "form_number": form.form_number,
            "registrant": {
                "name": registrant.name,
                "dea_number": registrant.dea_number,
                "address": registrant.address,
                "city": registrant.city,
                "state": registrant.state,
                "zip": registrant.zip,
            },
            "lines": form.line_items.iter().map(|line| serde_json::json!({
                "line_number": line.line_number,
                "name_of_item": line.name_of_item,
                "ndc": line.ndc,
                "number_of_packages": line.number_of_packages,
                "size_of_package": line.size_of_package,
            })).collect::<Vec<_>>(),
            "total_lines": form.total_lines,
            "date_executed": form.date_executed.format("%Y-%m-%d").to_string(),
            "status": form.status.as_str(),
        });

        Ok(self.handlebars.render(TEXT_TEMPLATE_NAME, &context)?)
    }
}

fn render_csv(form: &RegulatedForm) -> ComplianceResult<Vec<u8>> {
    let registrant = &form.registrant_info;
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(["form_number", form.form_number.as_str()])?;
    writer.write_record(["registrant_name", registrant.name.as_str()])?;
    writer.write_record(["dea_number", registrant.dea_number.as_str()])?;
    writer.write_record(["address", registrant.address.as_str()])?;
    writer.write_record(["city", registrant.city.as_str()])?;
    writer.write_record(["state", registrant.state.as_str()])?;
    writer.write_record(["zip", registrant.zip.as_str()])?;

    writer.write_record([
        "line_number",
        "name_of_item",
        "ndc",
        "number_of_packages",
        "size_of_package",
    ])?;
    for line in &form.line_items {
        writer.write_record([
            line.line_number.to_string(),
            line.name_of_item.clone(),
            line.ndc.clone(),
            line.number_of_packages.to_string(),
            line.size_of_package.clone(),
        ])?;
    }

    let date_executed = form.date_executed.format("%Y-%m-%d").to_string();
    writer.write_record(["date_executed", date_executed.as_str()])?;

    writer
        .into_inner()
        .map_err(|e| ComplianceError::export(e.to_string()))
}

/// Default export of a form (plain text).
pub fn export_form(form: &RegulatedForm) -> ComplianceResult<Vec<u8>> {
    FormExporter::new()?.export(form, ExportFormat::Text)
}
