//! Scan Parser
//!
//! Detects the layout of a scanned or typed identifier and extracts the
//! NDC, lot number and expiration date from it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use pharmreturn_models::NormalizedIdentifier;

use super::normalize::{normalize_date, normalize_ndc};

/// Whole-string NDC grouping, dashes optional. Digit count is checked
/// separately by [`is_ndc_shaped`].
static NDC_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4,5}-?[0-9]{3,4}-?[0-9]{1,2}$").expect("NDC shape pattern compiles")
});

static EMBEDDED_NDC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{5,11}-?[0-9]{3,4}-?[0-9]{1,2}").expect("embedded NDC pattern compiles")
});

static LONG_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{14,}$").expect("numeric payload pattern compiles"));

static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{5,11}").expect("digit run pattern compiles"));

static DATE_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}[-/][0-9]{2}[-/][0-9]{2}$").expect("date part pattern compiles")
});

static DATE_IN_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{4}[-/][0-9]{2}[-/][0-9]{2}").expect("date pattern compiles")
});

static LOT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^LOT[\s#:.-]*").expect("lot prefix pattern compiles"));

static LOT_IN_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bLOT[\s#:.-]*([A-Z0-9]+)").expect("lot token pattern compiles")
});

static ALNUM_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{4,}$").expect("token pattern compiles"));

/// Recognised scan layouts, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarcodeFormat {
    /// `NDC|LOT|EXPIRATION`
    Pipe,
    /// Colon separated fields in any order
    Colon,
    /// Long numeric payload. Only the NDC is recovered; GS1 application
    /// identifiers (01/10/17) are not decoded.
    Gs1Numeric,
    /// Free text with an NDC somewhere inside it
    EmbeddedNdc,
    /// The whole input is an NDC
    BareNdc,
    /// Nothing recognised; the input is kept as the NDC
    Raw,
}

impl BarcodeFormat {
    pub const ALL: [BarcodeFormat; 6] = [
        Self::Pipe,
        Self::Colon,
        Self::Gs1Numeric,
        Self::EmbeddedNdc,
        Self::BareNdc,
        Self::Raw,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pipe => "pipe",
            Self::Colon => "colon",
            Self::Gs1Numeric => "gs1_numeric",
            Self::EmbeddedNdc => "embedded_ndc",
            Self::BareNdc => "bare_ndc",
            Self::Raw => "raw",
        }
    }

    /// First format in priority order that accepts the (trimmed) input.
    pub fn detect(input: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|format| format.matches(input))
            .unwrap_or(Self::Raw)
    }

    pub fn matches(&self, input: &str) -> bool {
        match self {
            Self::Pipe => input.contains('|'),
            Self::Colon => input.contains(':'),
            Self::Gs1Numeric => LONG_NUMERIC.is_match(input),
            Self::EmbeddedNdc => EMBEDDED_NDC
                .find(input)
                .is_some_and(|m| m.start() > 0 || m.end() < input.len()),
            Self::BareNdc => is_ndc_shaped(input),
            Self::Raw => true,
        }
    }

    /// Extract an identifier from input this format accepts.
    pub fn extract(&self, input: &str) -> NormalizedIdentifier {
        match self {
            Self::Pipe => extract_pipe(input),
            Self::Colon => extract_colon(input),
            Self::Gs1Numeric => extract_gs1_numeric(input),
            Self::EmbeddedNdc => extract_embedded(input),
            Self::BareNdc => NormalizedIdentifier::from_ndc(normalize_ndc(input)),
            Self::Raw => NormalizedIdentifier::from_ndc(input),
        }
    }
}

impl std::fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parsed identifier together with the layout it was read as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedScan {
    pub format: BarcodeFormat,
    #[serde(flatten)]
    pub identifier: NormalizedIdentifier,
}

/// Ordered list of scan formats tried first-match-wins.
#[derive(Debug, Clone)]
pub struct IdentifierParser {
    formats: Vec<BarcodeFormat>,
}

impl Default for IdentifierParser {
    fn default() -> Self {
        Self {
            formats: BarcodeFormat::ALL.to_vec(),
        }
    }
}

impl IdentifierParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict or reorder the formats tried. `Raw` is always the implicit
    /// last resort.
    pub fn with_formats(mut self, formats: impl IntoIterator<Item = BarcodeFormat>) -> Self {
        self.formats = formats.into_iter().collect();
        self
    }

    pub fn parse(&self, raw: &str) -> NormalizedIdentifier {
        self.parse_detailed(raw).identifier
    }

    pub fn parse_detailed(&self, raw: &str) -> ParsedScan {
        let input = raw.trim();
        if input.is_empty() {
            return ParsedScan {
                format: BarcodeFormat::Raw,
                identifier: NormalizedIdentifier::default(),
            };
        }

        let format = self
            .formats
            .iter()
            .copied()
            .find(|format| format.matches(input))
            .unwrap_or(BarcodeFormat::Raw);

        let identifier = format.extract(input);
        tracing::trace!(format = format.name(), ndc = %identifier.ndc, "Parsed scanned identifier");

        ParsedScan { format, identifier }
    }
}

/// Parse a scanned or typed identifier with the default format order.
pub fn parse_identifier(raw: &str) -> NormalizedIdentifier {
    IdentifierParser::default().parse(raw)
}

/// 9 to 11 digits in a 4-5 / 3-4 / 1-2 grouping.
fn is_ndc_shaped(value: &str) -> bool {
    let digits = value.bytes().filter(u8::is_ascii_digit).count();
    (9..=11).contains(&digits) && NDC_SHAPE.is_match(value)
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn extract_pipe(input: &str) -> NormalizedIdentifier {
    let mut parts = input.split('|');
    let ndc = parts.next().map(str::trim).unwrap_or_default();
    let lot = parts.next().and_then(non_empty);
    let expiration = parts.next().and_then(non_empty).map(|d| normalize_date(&d));

    NormalizedIdentifier::from_ndc(normalize_ndc(ndc))
        .with_lot(lot)
        .with_expiration(expiration)
}

fn extract_colon(input: &str) -> NormalizedIdentifier {
    let parts: Vec<&str> = input.split(':').map(str::trim).collect();

    let ndc_idx = parts.iter().position(|p| is_ndc_shaped(p));
    let date_idx = parts.iter().position(|p| DATE_PART.is_match(p));

    let prefixed_lot = parts.iter().find_map(|p| {
        LOT_PREFIX
            .find(p)
            .and_then(|m| non_empty(&p[m.end()..]))
    });
    let lot = prefixed_lot.or_else(|| {
        parts
            .iter()
            .enumerate()
            .find(|(i, p)| Some(*i) != ndc_idx && Some(*i) != date_idx && ALNUM_TOKEN.is_match(p))
            .map(|(_, p)| p.to_string())
    });

    NormalizedIdentifier::from_ndc(ndc_idx.map(|i| normalize_ndc(parts[i])).unwrap_or_default())
        .with_lot(lot)
        .with_expiration(date_idx.map(|i| normalize_date(parts[i])))
}

fn extract_gs1_numeric(input: &str) -> NormalizedIdentifier {
    let ndc = DIGIT_RUN
        .find(input)
        .map(|m| normalize_ndc(m.as_str()))
        .unwrap_or_default();

    NormalizedIdentifier::from_ndc(ndc)
}

fn extract_embedded(input: &str) -> NormalizedIdentifier {
    let Some(m) = EMBEDDED_NDC.find(input) else {
        return NormalizedIdentifier::from_ndc(input);
    };

    let remaining = format!("{} {}", &input[..m.start()], &input[m.end()..]);
    let lot = LOT_IN_TEXT
        .captures(&remaining)
        .map(|caps| caps[1].to_string());
    let expiration = DATE_IN_TEXT
        .find(&remaining)
        .map(|d| normalize_date(d.as_str()));

    NormalizedIdentifier::from_ndc(normalize_ndc(m.as_str()))
        .with_lot(lot)
        .with_expiration(expiration)
}
