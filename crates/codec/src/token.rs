use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use rapport_assessment::Catalog;
use rapport_protocol::SharablePayload;

use crate::error::{CodecError, Result};

/// Largest payload JSON accepted in either direction. Sixty packed answers
/// per partner leave room for names of several thousand characters.
const MAX_PAYLOAD_JSON_BYTES: usize = 48 * 1024;
/// Padded base64 length of a maximal payload, so every token `try_encode`
/// emits also passes the decode-side length check.
const MAX_TOKEN_CHARS: usize = (MAX_PAYLOAD_JSON_BYTES + 2) / 3 * 4;

/// Standard alphabet, padding optional on input. Tokens are always emitted
/// padded.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn try_encode(payload: &SharablePayload) -> Result<String> {
    let bytes = serde_json::to_vec(payload)?;
    if bytes.len() > MAX_PAYLOAD_JSON_BYTES {
        return Err(CodecError::PayloadTooLarge(bytes.len()));
    }
    Ok(STANDARD.encode(bytes))
}

/// JSON -> UTF-8 -> standard base64. Returns an empty token if the payload
/// cannot be encoded; use [`try_encode`] where that must be reported.
pub fn encode(payload: &SharablePayload) -> String {
    match try_encode(payload) {
        Ok(token) => token,
        Err(err) => {
            log::error!("Encoding share token failed: {err}");
            String::new()
        }
    }
}

pub fn try_decode(token: &str) -> Result<SharablePayload> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CodecError::EmptyToken);
    }
    if token.len() > MAX_TOKEN_CHARS {
        return Err(CodecError::TokenTooLong(token.len()));
    }
    // A '+' that went through form decoding arrives as a space.
    let token = token.replace(' ', "+");
    let bytes = STANDARD_LENIENT.decode(token.as_bytes())?;
    if bytes.len() > MAX_PAYLOAD_JSON_BYTES {
        return Err(CodecError::PayloadTooLarge(bytes.len()));
    }
    let json = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&json)?)
}

/// Decode an untrusted token. Anything malformed yields `None`.
pub fn decode(token: &str) -> Option<SharablePayload> {
    match try_decode(token) {
        Ok(payload) => Some(payload),
        Err(err) => {
            log::debug!("Rejected share token: {err}");
            None
        }
    }
}

fn check_len(partner: u8, packed: &str, expected: usize) -> Result<()> {
    let actual = packed.chars().count();
    if actual == expected {
        Ok(())
    } else {
        Err(CodecError::AnswerLength {
            partner,
            expected,
            actual,
        })
    }
}

/// Like [`try_decode`], additionally requiring every packed answer string to
/// cover the whole catalog.
pub fn try_decode_for(catalog: &Catalog, token: &str) -> Result<SharablePayload> {
    let payload = try_decode(token)?;
    check_len(1, &payload.partner1.answers, catalog.len())?;
    if let Some(partner2) = &payload.partner2 {
        check_len(2, &partner2.answers, catalog.len())?;
    }
    Ok(payload)
}

pub fn decode_for(catalog: &Catalog, token: &str) -> Option<SharablePayload> {
    match try_decode_for(catalog, token) {
        Ok(payload) => Some(payload),
        Err(err) => {
            log::debug!("Rejected share token: {err}");
            None
        }
    }
}
