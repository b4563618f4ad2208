//! Declarative request schemas

use super::page_range::parse_page_ranges;

/// Constraints on the uploaded files of a tool
#[derive(Debug, Clone, Copy)]
pub struct FileRule {
    /// Minimum number of files (at least 1)
    pub min: usize,
    /// Maximum number of files
    pub max: usize,
    /// Accepted declared MIME types
    pub mime_types: &'static [&'static str],
    /// Code when no file was sent
    pub missing: &'static str,
    /// Code when fewer than `min` files were sent
    pub too_few: &'static str,
    /// Code when more than `max` files were sent
    pub too_many: &'static str,
    /// Code when a file's declared type is not accepted
    pub wrong_type: &'static str,
}

impl FileRule {
    /// Rule for tools taking between one and `max` files.
    pub const fn up_to(
        max: usize,
        mime_types: &'static [&'static str],
        missing: &'static str,
        too_many: &'static str,
        wrong_type: &'static str,
    ) -> Self {
        Self {
            min: 1,
            max,
            mime_types,
            missing,
            too_few: missing,
            too_many,
            wrong_type,
        }
    }
}

/// Encryption precondition checked after the file rule passes
#[derive(Debug, Clone, Copy)]
pub enum EncryptionRule {
    /// Reject documents that are already password-protected
    MustBeUnencrypted { code: &'static str },
    /// Reject documents that are not password-protected
    MustBeEncrypted { code: &'static str },
}

/// How a single text field is checked
#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// Required, must equal one of the listed values
    OneOf(&'static [&'static str]),
    /// May be absent (then `default` applies); if present must be listed
    OptionalOneOf {
        values: &'static [&'static str],
        default: &'static str,
    },
    /// Required, integer that must be one of the listed values
    NumberIn(&'static [u32]),
    /// Required, integer greater than zero
    PositiveInteger,
    /// Required, at least one character (whitespace counts)
    NonEmpty,
    /// More than `min` characters (a missing field counts as empty)
    MinChars(usize),
    /// `#RGB` or `#RRGGBB`
    HexColor,
    /// Page range expression such as `1,3,5-7`
    PageRanges,
}

/// One field and the code reported when it fails
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub check: Check,
    pub code: &'static str,
}

impl FieldRule {
    pub const fn new(name: &'static str, check: Check, code: &'static str) -> Self {
        Self { name, check, code }
    }
}

/// Everything a tool demands of a request, in check order
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub files: FileRule,
    pub encryption: Option<EncryptionRule>,
    pub fields: &'static [FieldRule],
}

impl Check {
    /// Apply the check to a raw value.
    ///
    /// Returns the normalized value to keep, or `None` when the check fails.
    pub(crate) fn apply(&self, raw: Option<&str>) -> Option<String> {
        match *self {
            Check::OneOf(values) => {
                let value = raw?;
                values.contains(&value).then(|| value.to_string())
            }
            Check::OptionalOneOf { values, default } => match raw {
                None | Some("") => Some(default.to_string()),
                Some(value) => values.contains(&value).then(|| value.to_string()),
            },
            Check::NumberIn(values) => {
                let number = parse_integer(raw?)?;
                values.contains(&number).then(|| number.to_string())
            }
            Check::PositiveInteger => {
                let number = parse_integer(raw?)?;
                (number > 0).then(|| number.to_string())
            }
            Check::NonEmpty => {
                let value = raw?;
                (!value.is_empty()).then(|| value.to_string())
            }
            Check::MinChars(min) => {
                let value = raw.unwrap_or("");
                (value.chars().count() > min).then(|| value.to_string())
            }
            Check::HexColor => {
                let value = raw?.trim();
                is_hex_color(value).then(|| value.to_string())
            }
            Check::PageRanges => {
                let value = raw?.trim();
                parse_page_ranges(value).ok().map(|_| value.to_string())
            }
        }
    }
}

fn parse_integer(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}
