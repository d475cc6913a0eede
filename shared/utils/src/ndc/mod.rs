//! NDC Identifier Normalization Module
//!
//! Best-effort interpretation of barcode scans and manually typed product
//! identifiers. Supports pipe- and colon-delimited payloads, long numeric
//! (GS1-style) payloads, free text with an embedded NDC and bare NDCs.
//! Nothing in this module fails: unparseable input degrades to the raw
//! text so the user can correct it.

pub mod normalize;
pub mod parser;

pub use self::normalize::{is_valid_ndc_format, normalize_date, normalize_ndc};
pub use self::parser::{parse_identifier, BarcodeFormat, IdentifierParser, ParsedScan};
