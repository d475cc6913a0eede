//! DEA Form 222 domain models.
//!
//! A Form 222 is the paper order used to transfer Schedule I/II controlled
//! substances between registrants. Each form holds at most ten lines.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::RegistrantInfo;

/// Regulatory maximum number of lines on one form.
pub const MAX_LINES_PER_FORM: usize = 10;

/// One numbered line of a form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormLineItem {
    /// 1-based, restarts on every form.
    pub line_number: u32,
    pub name_of_item: String,
    pub ndc: String,
    pub number_of_packages: u32,
    pub size_of_package: String,
    /// Filled in by the receiving workflow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_received: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages_received: Option<u32>,
}

impl FormLineItem {
    pub fn is_received(&self) -> bool {
        self.date_received.is_some() && self.packages_received.is_some()
    }
}

/// A generated transfer order.
///
/// Field order is the order of the printed content: form number, registrant
/// block, lines, then the execution date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegulatedForm {
    pub form_number: String,
    pub registrant_info: RegistrantInfo,
    pub line_items: Vec<FormLineItem>,
    pub total_lines: usize,
    pub date_executed: DateTime<Utc>,
    pub status: FormStatus,
}

impl RegulatedForm {
    /// Mutable access to a line by its 1-based number.
    pub fn line_mut(&mut self, line_number: u32) -> Option<&mut FormLineItem> {
        self.line_items
            .iter_mut()
            .find(|line| line.line_number == line_number)
    }

    /// Every line has its receiving fields filled in.
    pub fn is_fully_received(&self) -> bool {
        !self.line_items.is_empty() && self.line_items.iter().all(FormLineItem::is_received)
    }
}

/// Form lifecycle. Forms are created as `Draft`; the rest is driven by the
/// submission and receiving workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormStatus {
    /// Generated, not yet signed off
    #[default]
    Draft,
    /// Signed and awaiting submission to the supplier
    Pending,
    /// Sent to the supplier
    Submitted,
    /// Goods received and recorded
    Completed,
}

impl FormStatus {
    /// Only a single step forward is allowed.
    pub fn can_transition_to(&self, target: FormStatus) -> bool {
        self.next() == Some(target)
    }

    pub fn next(&self) -> Option<FormStatus> {
        use FormStatus::*;

        match self {
            Draft => Some(Pending),
            Pending => Some(Submitted),
            Submitted => Some(Completed),
            Completed => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, FormStatus::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Pending => "PENDING",
            Self::Submitted => "SUBMITTED",
            Self::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for FormStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown form status: {0}")]
pub struct UnknownFormStatus(pub String);

impl FromStr for FormStatus {
    type Err = UnknownFormStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "PENDING" => Ok(Self::Pending),
            "SUBMITTED" => Ok(Self::Submitted),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(UnknownFormStatus(s.to_string())),
        }
    }
}
