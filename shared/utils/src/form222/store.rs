//! Form Store
//!
//! In-memory store of generated forms keyed by form number. Generation
//! stays a pure function; the store owns the status lifecycle and the
//! receiving fields that are filled in after a form is submitted.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::info;

use pharmreturn_models::{ControlledLineItem, FormStatus, Registrant, RegulatedForm};

use super::generator::FormGenerator;
use super::validate::validate_form;
use crate::error::{ComplianceError, ComplianceResult};

#[derive(Debug, Default)]
pub struct FormStore {
    generator: FormGenerator,
    forms: BTreeMap<String, RegulatedForm>,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generator(generator: FormGenerator) -> Self {
        Self {
            generator,
            forms: BTreeMap::new(),
        }
    }

    /// Generate a batch and keep it. Returns the new form numbers in batch order.
    pub fn generate_and_store(
        &mut self,
        registrant: &Registrant,
        items: &[ControlledLineItem],
    ) -> ComplianceResult<Vec<String>> {
        let forms = self.generator.generate(registrant, items);
        let mut numbers = Vec::with_capacity(forms.len());
        for form in forms {
            numbers.push(form.form_number.clone());
            self.insert(form)?;
        }
        Ok(numbers)
    }

    pub fn insert(&mut self, form: RegulatedForm) -> ComplianceResult<()> {
        if self.forms.contains_key(&form.form_number) {
            return Err(ComplianceError::validation(
                "form_number",
                format!("Form {} already exists", form.form_number),
            ));
        }
        self.forms.insert(form.form_number.clone(), form);
        Ok(())
    }

    pub fn get(&self, form_number: &str) -> Option<&RegulatedForm> {
        self.forms.get(form_number)
    }

    /// Stored forms ordered by form number.
    pub fn list(&self) -> impl Iterator<Item = &RegulatedForm> {
        self.forms.values()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Move a form one step forward. Leaving `Draft` requires a form with no
    /// validation violations.
    pub fn advance_status(&mut self, form_number: &str, target: FormStatus) -> ComplianceResult<()> {
        let form = self.form_mut(form_number)?;

        if !form.status.can_transition_to(target) {
            return Err(ComplianceError::invalid_transition(form.status, target));
        }

        if form.status == FormStatus::Draft {
            let violations = validate_form(form);
            if !violations.is_empty() {
                return Err(ComplianceError::validation("form", violations.join("; ")));
            }
        }

        info!(form_number, from = %form.status, to = %target, "Form status changed");
        form.status = target;
        Ok(())
    }

    /// Record what arrived for one line of a submitted form.
    pub fn record_receipt(
        &mut self,
        form_number: &str,
        line_number: u32,
        date_received: NaiveDate,
        packages_received: u32,
    ) -> ComplianceResult<()> {
        let form = self.form_mut(form_number)?;

        if form.status != FormStatus::Submitted {
            return Err(ComplianceError::validation(
                "status",
                format!("Form {} is {}, receipts require SUBMITTED", form_number, form.status),
            ));
        }

        let line = form.line_mut(line_number).ok_or_else(|| {
            ComplianceError::validation(
                "line_number",
                format!("Form {} has no line {}", form_number, line_number),
            )
        })?;

        if packages_received > line.number_of_packages {
            return Err(ComplianceError::validation(
                "packages_received",
                format!(
                    "Line {}: received {} packages but only {} were ordered",
                    line_number, packages_received, line.number_of_packages
                ),
            ));
        }

        line.date_received = Some(date_received);
        line.packages_received = Some(packages_received);
        Ok(())
    }

    fn form_mut(&mut self, form_number: &str) -> ComplianceResult<&mut RegulatedForm> {
        self.forms
            .get_mut(form_number)
            .ok_or_else(|| ComplianceError::not_found(format!("form {}", form_number)))
    }
}
