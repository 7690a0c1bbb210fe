use serde::Serialize;

use crate::answer::Answer;
use crate::catalog::Question;

const SCALE_MIN: i32 = 1;
const SCALE_MAX: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NormalizeStatus {
    Scored,
    Unanswered,
    /// Scale answer outside 1..=10; the score uses the clamped value.
    ClampedOutOfRange { raw: i32 },
    UnknownLabel,
}

/// Score on the common 0..=5 scale plus how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Normalized {
    pub score: f64,
    pub status: NormalizeStatus,
}

/// Map one answer onto the common 0..=5 scale.
///
/// Scale answers are halved (after clamping to 1..=10), Likert labels score
/// 1..=5 and anything unanswered or unrecognized scores 0. The question is
/// accepted for symmetry with the catalog; answers are scored by their own
/// shape.
pub fn normalize_checked(answer: &Answer, question: &Question) -> Normalized {
    match answer {
        Answer::Unanswered => Normalized {
            score: 0.0,
            status: NormalizeStatus::Unanswered,
        },
        Answer::Scale(raw) => {
            let clamped = (*raw).clamp(SCALE_MIN, SCALE_MAX);
            let status = if clamped == *raw {
                NormalizeStatus::Scored
            } else {
                log::debug!(
                    "question {}: scale answer {raw} clamped to {clamped}",
                    question.index
                );
                NormalizeStatus::ClampedOutOfRange { raw: *raw }
            };
            Normalized {
                score: f64::from(clamped) / 2.0,
                status,
            }
        }
        Answer::Choice(likert) => Normalized {
            score: f64::from(likert.score()),
            status: NormalizeStatus::Scored,
        },
        Answer::Unrecognized(label) => {
            log::debug!("question {}: unknown label {label:?}", question.index);
            Normalized {
                score: 0.0,
                status: NormalizeStatus::UnknownLabel,
            }
        }
    }
}

pub fn normalize(answer: &Answer, question: &Question) -> f64 {
    normalize_checked(answer, question).score
}
