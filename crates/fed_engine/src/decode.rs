use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::FetchOutput;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("bytes are not valid {encoding}")]
    Malformed { encoding: String },
}

/// Decodes a fetched page into UTF-8 text.
pub fn decode_page(output: &FetchOutput) -> Result<String, DecodeError> {
    decode_html(&output.bytes, output.metadata.content_type.as_deref())
}

/// Decode order: BOM, then the Content-Type charset, then detection.
///
/// Older archive pages are served as windows-1252 without a declared
/// charset, which is what the detector fallback is for.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> Result<String, DecodeError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(enc, _)| enc)
        .or_else(|| {
            content_type
                .and_then(charset_label)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(text.into_owned())
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}
