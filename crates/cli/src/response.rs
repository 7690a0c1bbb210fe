use rapport_protocol::ErrorEnvelope;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ResponseStatus {
    Ok,
    Error,
}

/// Stable machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidToken,
    InvalidAnswers,
    IncompleteAnswers,
    InvalidConfig,
    Internal,
}

impl ErrorCode {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidToken => "invalid_token",
            ErrorCode::InvalidAnswers => "invalid_answers",
            ErrorCode::IncompleteAnswers => "incomplete_answers",
            ErrorCode::InvalidConfig => "invalid_config",
            ErrorCode::Internal => "internal",
        }
    }
}

#[derive(Debug)]
pub(crate) struct CommandError {
    code: ErrorCode,
    source: anyhow::Error,
    hint: Option<String>,
}

impl CommandError {
    pub(crate) fn new(code: ErrorCode, source: impl Into<anyhow::Error>) -> Self {
        Self {
            code,
            source: source.into(),
            hint: None,
        }
    }

    #[must_use]
    pub(crate) fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub(crate) fn code(&self) -> ErrorCode {
        self.code
    }

    pub(crate) fn into_envelope(self) -> ErrorEnvelope {
        let envelope = ErrorEnvelope::new(self.code.as_str(), format!("{:#}", self.source));
        match self.hint {
            Some(hint) => envelope.with_hint(hint),
            None => envelope,
        }
    }
}

impl From<anyhow::Error> for CommandError {
    fn from(source: anyhow::Error) -> Self {
        Self::new(ErrorCode::Internal, source)
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(source: serde_json::Error) -> Self {
        Self::new(ErrorCode::Internal, source)
    }
}

pub(crate) type CommandResult<T> = std::result::Result<T, CommandError>;

/// Attach an [`ErrorCode`] to any error convertible into `anyhow::Error`.
pub(crate) trait WithCode<T> {
    fn with_code(self, code: ErrorCode) -> CommandResult<T>;
}

impl<T, E: Into<anyhow::Error>> WithCode<T> for std::result::Result<T, E> {
    fn with_code(self, code: ErrorCode) -> CommandResult<T> {
        self.map_err(|err| CommandError::new(code, err))
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CliResponse {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl CliResponse {
    pub(crate) fn ok(data: Value) -> Self {
        Self {
            status: ResponseStatus::Ok,
            error: None,
            data,
        }
    }

    pub(crate) fn error(error: CommandError) -> Self {
        Self {
            status: ResponseStatus::Error,
            error: Some(error.into_envelope()),
            data: Value::Null,
        }
    }

    pub(crate) fn is_error(&self) -> bool {
        matches!(self.status, ResponseStatus::Error)
    }
}
