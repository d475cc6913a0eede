//! Registrant domain models.
//!
//! A registrant is the DEA-registered pharmacy that executes a transfer
//! order. The caller supplies it explicitly for every generation run.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Two uppercase letters followed by seven ASCII digits.
pub static DEA_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}[0-9]{7}$").expect("DEA number pattern compiles"));

/// Registrant as supplied by the pharmacy profile.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Registrant {
    // snake_case aliases accept keys from config files and the environment
    #[serde(alias = "business_name")]
    #[validate(length(min = 1, max = 255, message = "Business name is required"))]
    pub business_name: String,
    #[serde(alias = "dea_number")]
    #[validate(custom = "validate_dea_number")]
    pub dea_number: String,
    #[validate(length(min = 1, max = 255, message = "Street address is required"))]
    pub address: String,
    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,
    #[validate(length(equal = 2, message = "State must be a 2-letter code"))]
    pub state: String,
    #[validate(length(min = 5, max = 10, message = "ZIP code must be 5 to 10 characters"))]
    pub zip: String,
}

/// Registrant block printed on every form of a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrantInfo {
    pub name: String,
    pub dea_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl From<&Registrant> for RegistrantInfo {
    fn from(registrant: &Registrant) -> Self {
        Self {
            name: registrant.business_name.clone(),
            dea_number: registrant.dea_number.clone(),
            address: registrant.address.clone(),
            city: registrant.city.clone(),
            state: registrant.state.clone(),
            zip: registrant.zip.clone(),
        }
    }
}

impl RegistrantInfo {
    /// `City, ST ZIP` line of the address block.
    pub fn city_line(&self) -> String {
        format!("{}, {} {}", self.city, self.state, self.zip)
    }
}

fn validate_dea_number(dea_number: &str) -> Result<(), ValidationError> {
    if !DEA_NUMBER_REGEX.is_match(dea_number) {
        return Err(ValidationError::new("invalid_dea_format"));
    }

    Ok(())
}
