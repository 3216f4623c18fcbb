//! Character encodings of documents as stored.
//!
//! Documents are decoded to text when read and encoded back into the
//! encoding their declaration names when written, so the bytes on disk
//! always agree with the declared label.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use tracing::{debug, warn};

use crate::document::XmlDeclaration;
use crate::error::{Error, Result};

const UTF_8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Document text decoded from its stored bytes.
#[derive(Debug)]
pub(crate) struct Decoded {
    pub text: String,
    pub byte_order_mark: bool,
}

/// Decodes a stored document.
///
/// A byte order mark decides the encoding; otherwise the `encoding` label of
/// the declaration does, and a document without one is UTF-8.
pub(crate) fn decode(bytes: &[u8]) -> Result<Decoded> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        debug!(encoding = encoding.name(), "decoding document with byte order mark");
        return Ok(Decoded {
            text: decode_with(encoding, &bytes[bom_len..])?,
            byte_order_mark: true,
        });
    }

    let encoding = match declared_label(bytes) {
        // The declaration just read as ASCII, so the bytes cannot be UTF-16
        Some(label) => match for_label(&label)? {
            encoding if is_utf_16(encoding) => UTF_8,
            encoding => encoding,
        },
        None => UTF_8,
    };
    debug!(encoding = encoding.name(), "decoding document");
    Ok(Decoded {
        text: decode_with(encoding, bytes)?,
        byte_order_mark: false,
    })
}

/// Encodes document text for storage under the given declaration label.
///
/// Without a label the output is UTF-8. Characters the encoding cannot
/// represent are written as numeric character references.
pub(crate) fn encode(text: &str, label: Option<&str>, byte_order_mark: bool) -> Result<Vec<u8>> {
    let encoding = match label {
        Some(label) => for_label(label)?,
        None => UTF_8,
    };

    if is_utf_16(encoding) {
        // UTF-16 documents always start with a byte order mark
        let little_endian = encoding == UTF_16LE;
        let mut bytes = Vec::with_capacity((text.len() + 1) * 2);
        for unit in std::iter::once(0xFEFF).chain(text.encode_utf16()) {
            if little_endian {
                bytes.extend_from_slice(&unit.to_le_bytes());
            } else {
                bytes.extend_from_slice(&unit.to_be_bytes());
            }
        }
        return Ok(bytes);
    }

    let (encoded, used, unmappable) = encoding.encode(text);
    if used != encoding {
        return Err(Error::Encoding(format!(
            "documents cannot be written as {}",
            encoding.name()
        )));
    }
    if unmappable {
        warn!(
            encoding = encoding.name(),
            "characters outside the encoding written as character references"
        );
    }

    let mut bytes = Vec::with_capacity(encoded.len() + UTF_8_BOM.len());
    if byte_order_mark && encoding == UTF_8 {
        bytes.extend_from_slice(UTF_8_BOM);
    }
    bytes.extend_from_slice(&encoded);
    Ok(bytes)
}

fn for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::Encoding(format!("unknown encoding `{}`", label)))
}

fn is_utf_16(encoding: &'static Encoding) -> bool {
    encoding == UTF_16LE || encoding == UTF_16BE
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> Result<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| Error::Encoding(format!("document is not valid {}", encoding.name())))
}

/// The `encoding` label of a leading `<?xml ...?>` declaration.
fn declared_label(bytes: &[u8]) -> Option<String> {
    let is_declaration =
        bytes.starts_with(b"<?xml") && bytes.get(5).is_some_and(u8::is_ascii_whitespace);
    if !is_declaration {
        return None;
    }
    let end = bytes.windows(2).position(|w| w == b"?>")?;
    let raw = String::from_utf8_lossy(&bytes[..end + 2]);
    XmlDeclaration::from_raw(&raw).encoding().map(str::to_string)
}
