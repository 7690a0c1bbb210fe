use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Token must not be empty")]
    EmptyToken,

    #[error("Token too long ({0} chars)")]
    TokenTooLong(usize),

    #[error("Token payload too large ({0} bytes)")]
    PayloadTooLarge(usize),

    #[error("Token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Token payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Token payload has the wrong shape: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Partner {partner} answers have {actual} entries, catalog has {expected}")]
    AnswerLength {
        partner: u8,
        expected: usize,
        actual: usize,
    },
}
