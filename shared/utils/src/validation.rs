use crate::error::{ComplianceError, ComplianceResult};
use crate::ndc::is_valid_ndc_format;
use pharmreturn_models::{Registrant, DEA_NUMBER_REGEX};
use validator::{Validate, ValidationErrors};

pub fn validate_model<T: Validate>(model: &T) -> ComplianceResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_messages = format_validation_errors(&errors);
            Err(ComplianceError::validation("model", error_messages))
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    let mut messages = Vec::new();
    for (field, field_errors) in fields {
        for error in field_errors {
            let message = match (&error.message, error.code.as_ref()) {
                (Some(message), _) => message.to_string(),
                (None, "invalid_dea_format") => "Invalid DEA number format".to_string(),
                (None, "length") => format!("Length validation failed for field '{}'", field),
                (None, "required") => format!("Field '{}' is required", field),
                (None, code) => format!("Validation failed for field '{}': {}", field, code),
            };
            messages.push(message);
        }
    }

    messages.join(", ")
}

pub fn validate_registrant(registrant: &Registrant) -> ComplianceResult<()> {
    validate_model(registrant)
}

pub fn is_valid_dea_number(dea_number: &str) -> bool {
    DEA_NUMBER_REGEX.is_match(dea_number)
}

/// DEA registration check digit: `(d1 + d3 + d5) + 2 * (d2 + d4 + d6)`,
/// whose last digit must equal `d7`. Advisory only.
pub fn dea_check_digit_matches(dea_number: &str) -> bool {
    if !is_valid_dea_number(dea_number) {
        return false;
    }

    let digits: Vec<u32> = dea_number
        .bytes()
        .skip(2)
        .map(|b| u32::from(b.wrapping_sub(b'0')))
        .collect();
    match *digits.as_slice() {
        [d1, d2, d3, d4, d5, d6, d7] => ((d1 + d3 + d5) + 2 * (d2 + d4 + d6)) % 10 == d7,
        _ => false,
    }
}

pub fn validate_ndc_format(ndc: &str) -> ComplianceResult<()> {
    if !is_valid_ndc_format(ndc) {
        return Err(ComplianceError::validation(
            "ndc",
            format!("Invalid NDC format '{}'. Expected 5-4-2, 4-4-2 or 5-3-2", ndc),
        ));
    }

    Ok(())
}
