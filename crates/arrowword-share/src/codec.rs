/// Error returned when a payload cannot be decompressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("payload could not be decompressed")]
pub struct CodecError;

/// Reversible text compression used for share links.
///
/// The output must be safe to place in a URL fragment without escaping.
pub trait Codec {
    /// Compresses `input`.
    fn encode(&self, input: &str) -> String;

    /// Decompresses `input`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if `input` is not a valid payload.
    fn decode(&self, input: &str) -> Result<String, CodecError>;
}

/// LZ-string compression with the URI-component alphabet.
///
/// # Examples
///
/// ```
/// use arrowword_share::{Codec, LzStringCodec};
///
/// let encoded = LzStringCodec.encode(r#"{"grid":[]}"#);
/// assert!(encoded.chars().all(|c| c.is_ascii_alphanumeric() || "+-$".contains(c)));
/// assert_eq!(LzStringCodec.decode(&encoded).unwrap(), r#"{"grid":[]}"#);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LzStringCodec;

impl Codec for LzStringCodec {
    fn encode(&self, input: &str) -> String {
        lz_str::compress_to_encoded_uri_component(input)
    }

    fn decode(&self, input: &str) -> Result<String, CodecError> {
        // form decoding turns '+' into ' '
        let input = input.replace(' ', "+");
        let wide = lz_str::decompress_from_encoded_uri_component(input.as_str()).ok_or(CodecError)?;
        let text = String::from_utf16(&wide).map_err(|_| CodecError)?;
        if text.is_empty() {
            return Err(CodecError);
        }
        Ok(text)
    }
}
