//! Document content codec.
//!
//! # Responsibility
//! - Convert uploaded file bytes into the storable string representation
//!   (raw text for textual sources, `data:<mime>;base64,<payload>` for
//!   everything else).
//! - Reconstruct a downloadable blob from the stored string.
//!
//! # Invariants
//! - Binary round trips are byte-exact: `decode(encode(bytes)) == bytes`.
//! - `taille` equals the source byte length at creation time.
//! - A corrupt embedded-binary string yields a typed error and no
//!   partial output.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::id::generate_id;
use crate::model::marche::Document;

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";
const FALLBACK_MIME: &str = "application/octet-stream";

/// File extensions treated as structured text even when the uploader
/// supplies no usable MIME type.
const TEXT_EXTENSIONS: &[&str] = &[".json", ".md", ".txt"];

/// Reconstructed download payload for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadBlob {
    /// Stored text served as-is under the declared MIME type.
    Text { mime: String, contenu: String },
    /// Base64 payload decoded back to the original bytes.
    Binary { mime: String, bytes: Vec<u8> },
}

impl DownloadBlob {
    /// Raw bytes of the blob regardless of variant.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text { contenu, .. } => contenu.as_bytes(),
            Self::Binary { bytes, .. } => bytes,
        }
    }

    pub fn mime(&self) -> &str {
        match self {
            Self::Text { mime, .. } | Self::Binary { mime, .. } => mime,
        }
    }
}

/// Decode-side failure on the download path.
#[derive(Debug)]
pub enum CodecError {
    /// The document carries no stored content.
    MissingContent { document_id: String },
    /// The content starts with `data:` but lacks the `;base64,` header.
    MalformedDataUrl { document_id: String },
    /// The base64 payload does not decode.
    InvalidBase64 {
        document_id: String,
        source: base64::DecodeError,
    },
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingContent { document_id } => {
                write!(f, "document {document_id} has no stored content")
            }
            Self::MalformedDataUrl { document_id } => {
                write!(f, "document {document_id} has a malformed data URL header")
            }
            Self::InvalidBase64 {
                document_id,
                source,
            } => write!(
                f,
                "document {document_id} carries invalid base64 content: {source}"
            ),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidBase64 { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Returns whether a source should be stored as raw text.
///
/// Textual means a `text/*` MIME type or a recognized structured-text
/// file extension.
pub fn is_textual(mime: &str, nom: &str) -> bool {
    if mime.starts_with("text/") {
        return true;
    }
    let lower = nom.to_lowercase();
    TEXT_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Encodes uploaded file bytes into a storable [`Document`].
///
/// Returns `None` for an empty source: no document entry is produced.
/// Textual sources are stored as decoded UTF-8 (invalid sequences are
/// replaced, mirroring how the historical upload surface read text);
/// all other sources are stored as a self-describing embedded-binary
/// string.
pub fn encode_document(nom: impl Into<String>, mime: &str, bytes: &[u8]) -> Option<Document> {
    if bytes.is_empty() {
        return None;
    }

    let nom = nom.into();
    let mime = if mime.is_empty() { FALLBACK_MIME } else { mime };

    let contenu = if is_textual(mime, &nom) {
        String::from_utf8_lossy(bytes).into_owned()
    } else {
        format!(
            "{DATA_URL_PREFIX}{mime}{BASE64_MARKER}{}",
            BASE64.encode(bytes)
        )
    };

    Some(Document {
        id: generate_id(),
        nom,
        mime: mime.to_string(),
        taille: bytes.len() as u64,
        date_ajout: Utc::now(),
        contenu: Some(contenu),
    })
}

/// Reconstructs the downloadable blob for a stored document.
///
/// Embedded-binary content is detected by its `data:` header and decoded
/// back to the original bytes; anything else is served as text. The
/// declared document MIME type wins over the MIME embedded in the header.
pub fn decode_document(document: &Document) -> Result<DownloadBlob, CodecError> {
    let contenu = match document.contenu.as_deref() {
        Some(contenu) if !contenu.is_empty() => contenu,
        _ => {
            return Err(CodecError::MissingContent {
                document_id: document.id.clone(),
            })
        }
    };

    if !contenu.starts_with(DATA_URL_PREFIX) {
        return Ok(DownloadBlob::Text {
            mime: document.mime.clone(),
            contenu: contenu.to_string(),
        });
    }

    let payload = contenu
        .split_once(BASE64_MARKER)
        .map(|(_, payload)| payload)
        .ok_or_else(|| CodecError::MalformedDataUrl {
            document_id: document.id.clone(),
        })?;

    let bytes = BASE64
        .decode(payload)
        .map_err(|source| CodecError::InvalidBase64 {
            document_id: document.id.clone(),
            source,
        })?;

    Ok(DownloadBlob::Binary {
        mime: document.mime.clone(),
        bytes,
    })
}
