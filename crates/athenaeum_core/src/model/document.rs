//! Classification of `coverUrl` / `fileUrl` references.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel stored in `fileUrl` when a book carries no document.
pub const NO_DOCUMENT: &str = "#";

/// MIME type accepted for embedded book documents.
pub const PDF_MIME: &str = "application/pdf";

static DATA_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:([A-Za-z0-9][A-Za-z0-9!#$&^_.+-]*/[A-Za-z0-9!#$&^_.+-]+)?(?:;[^;,]*)*,")
        .expect("valid data url regex")
});
static REMOTE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://\S+$").expect("valid remote url regex"));

/// Parsed shape of a stored reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentRef<'a> {
    /// Empty value or the `#` sentinel.
    None,
    /// `http`/`https` URL.
    Remote(&'a str),
    /// Inline `data:` payload.
    Embedded { mime: Option<&'a str> },
    /// Anything else (relative paths, unknown schemes).
    Other(&'a str),
}

impl<'a> DocumentRef<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let value = raw.trim();
        if value.is_empty() || value == NO_DOCUMENT {
            return Self::None;
        }
        if let Some(caps) = DATA_URL_RE.captures(value) {
            let mime = caps.get(1).map(|m| m.as_str());
            return Self::Embedded { mime };
        }
        if REMOTE_URL_RE.is_match(value) {
            return Self::Remote(value);
        }
        Self::Other(value)
    }

    /// Whether this reference may be stored as a book's document.
    pub fn is_acceptable_document(&self) -> bool {
        match self {
            Self::None | Self::Remote(_) => true,
            Self::Embedded { mime } => {
                mime.is_some_and(|mime| mime.eq_ignore_ascii_case(PDF_MIME))
            }
            Self::Other(_) => false,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Builds an inline `data:` URL from a MIME type and base64 payload.
pub fn embedded_data_url(mime: &str, base64_data: &str) -> String {
    format!("data:{mime};base64,{base64_data}")
}
