//! Media reference classification.

use crate::extension_for_mime;
use base64::{Engine, engine::general_purpose::STANDARD};
use derive_getters::Getters;
use folio_error::{PayloadError, PayloadErrorKind};

/// Scheme tag that marks an inline payload.
pub const DATA_SCHEME: &str = "data:";

const BASE64_MARKER: &str = ";base64";

/// A media reference supplied by the editor.
///
/// Raw strings are classified once with [`MediaReference::classify`]; downstream code
/// matches on the variant instead of re-inspecting the string.
///
/// # Examples
///
/// ```
/// use folio_core::MediaReference;
///
/// let external = MediaReference::classify("https://cdn.example/a.png").unwrap();
/// assert!(matches!(external, MediaReference::External(_)));
///
/// let inline = MediaReference::classify("data:image/png;base64,iVBORw0KGgo=").unwrap();
/// assert!(matches!(inline, MediaReference::Inline(_)));
///
/// assert!(MediaReference::classify("data:image/png,not-base64").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaReference {
    /// Bytes embedded in the reference, still to be uploaded
    Inline(InlinePayload),
    /// Already-hosted URL, passed through unchanged
    External(String),
}

impl MediaReference {
    /// Classify a raw reference.
    ///
    /// Anything carrying the `data:` scheme must parse as an inline payload;
    /// everything else is an external URL.
    pub fn classify(raw: &str) -> Result<Self, PayloadError> {
        if Self::looks_inline(raw) {
            InlinePayload::parse(raw).map(MediaReference::Inline)
        } else {
            Ok(MediaReference::External(raw.to_string()))
        }
    }

    /// Whether `raw` carries the `data:` scheme (ASCII case-insensitive).
    pub fn looks_inline(raw: &str) -> bool {
        strip_scheme(raw).is_some()
    }

    /// Whether this reference still needs uploading.
    pub fn is_inline(&self) -> bool {
        matches!(self, MediaReference::Inline(_))
    }
}

/// Decoded contents of a `data:<mime>;base64,<body>` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct InlinePayload {
    /// Declared MIME type, lowercased, without parameters
    mime_type: String,
    /// Decoded body
    bytes: Vec<u8>,
}

impl InlinePayload {
    /// Create a payload from already-decoded parts.
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Parse an inline payload descriptor.
    ///
    /// MIME parameters between the type and the `;base64` marker
    /// (e.g. `;name=photo.png`) are accepted and dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`PayloadError`] when the scheme, marker, MIME type or body is malformed,
    /// or when the body decodes to zero bytes.
    pub fn parse(descriptor: &str) -> Result<Self, PayloadError> {
        let rest = strip_scheme(descriptor)
            .ok_or_else(|| PayloadError::new(PayloadErrorKind::MissingScheme))?;

        let (header, body) = rest
            .split_once(',')
            .ok_or_else(|| PayloadError::new(PayloadErrorKind::MissingBase64Marker))?;

        let params = header
            .strip_suffix(BASE64_MARKER)
            .ok_or_else(|| PayloadError::new(PayloadErrorKind::MissingBase64Marker))?;

        let mime_type = params.split_once(';').map_or(params, |(mime, _)| mime).trim();
        if mime_type.is_empty() || !is_type_subtype(mime_type) {
            return Err(PayloadError::new(PayloadErrorKind::InvalidMimeType(
                mime_type.to_string(),
            )));
        }

        let bytes = STANDARD
            .decode(body)
            .map_err(|e| PayloadError::new(PayloadErrorKind::InvalidBase64(e.to_string())))?;
        if bytes.is_empty() {
            return Err(PayloadError::new(PayloadErrorKind::EmptyBody));
        }

        Ok(Self {
            mime_type: mime_type.to_ascii_lowercase(),
            bytes,
        })
    }

    /// Object name extension for the declared MIME type, if well known.
    pub fn extension(&self) -> Option<&'static str> {
        extension_for_mime(&self.mime_type)
    }

    /// Number of decoded bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn strip_scheme(raw: &str) -> Option<&str> {
    let scheme = raw.get(..DATA_SCHEME.len())?;
    if scheme.eq_ignore_ascii_case(DATA_SCHEME) {
        Some(&raw[DATA_SCHEME.len()..])
    } else {
        None
    }
}

fn is_type_subtype(mime_type: &str) -> bool {
    match mime_type.split_once('/') {
        Some((kind, subtype)) => !kind.is_empty() && !subtype.is_empty() && !subtype.contains('/'),
        None => false,
    }
}
