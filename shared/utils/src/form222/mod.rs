//! DEA Form 222 Module
//!
//! Partitions controlled-substance line items into regulation-sized forms,
//! validates them for submission, exports them and tracks their lifecycle.

pub mod generator;
pub mod validate;
pub mod export;
pub mod store;

pub use self::generator::{form_number, generate_forms, generate_forms_at, FormGenerator};
pub use self::validate::{validate_batch, validate_form, FormValidation};
pub use self::export::{export_form, ExportFormat, FormExporter};
pub use self::store::FormStore;
