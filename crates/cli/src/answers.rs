use anyhow::{anyhow, Context};
use rapport_assessment::{AnswerSet, Catalog};
use rapport_codec::{is_packed_alphabet, unpack};

use crate::response::{CommandError, CommandResult, ErrorCode, WithCode};

const ANSWERS_HINT: &str =
    "Pass a JSON array (null, 1-10 or a Likert label per question) or a packed answer string";

/// Answers given on the command line: a JSON array or a packed string.
pub(crate) fn parse_answers(raw: &str) -> CommandResult<AnswerSet> {
    let raw = raw.trim();
    if raw.starts_with('[') {
        return AnswerSet::from_json(raw)
            .context("Answers are not a valid JSON answer array")
            .with_code(ErrorCode::InvalidAnswers)
            .map_err(|err| err.with_hint(ANSWERS_HINT));
    }
    if is_packed_alphabet(raw) {
        return Ok(unpack(raw));
    }
    Err(CommandError::new(
        ErrorCode::InvalidAnswers,
        anyhow!("Answers are neither a JSON array nor a packed answer string"),
    )
    .with_hint(ANSWERS_HINT))
}

/// One answer per catalog question.
pub(crate) fn require_len(catalog: &Catalog, answers: &AnswerSet, who: &str) -> CommandResult<()> {
    answers
        .ensure_len(catalog)
        .with_context(|| format!("{who} answers do not match the questionnaire"))
        .with_code(ErrorCode::InvalidAnswers)
}

/// Every question answered; names the first open category otherwise.
pub(crate) fn require_complete(
    catalog: &Catalog,
    answers: &AnswerSet,
    who: &str,
) -> CommandResult<()> {
    require_len(catalog, answers, who)?;
    match answers.first_incomplete_category(catalog) {
        None => Ok(()),
        Some(category) => Err(CommandError::new(
            ErrorCode::IncompleteAnswers,
            anyhow!("{who} has unanswered questions in {category}"),
        )
        .with_hint(format!("Answer every question in \"{category}\" before sharing"))),
    }
}
