use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::catalog::Catalog;
use crate::category::Category;
use crate::error::{AssessmentError, Result};

/// Five-point agreement scale used by multiple-choice questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Likert {
    StronglyDisagree,
    Disagree,
    Neutral,
    Agree,
    StronglyAgree,
}

impl Likert {
    pub const ALL: [Likert; 5] = [
        Likert::StronglyDisagree,
        Likert::Disagree,
        Likert::Neutral,
        Likert::Agree,
        Likert::StronglyAgree,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Likert::StronglyDisagree => "Strongly Disagree",
            Likert::Disagree => "Disagree",
            Likert::Neutral => "Neutral",
            Likert::Agree => "Agree",
            Likert::StronglyAgree => "Strongly Agree",
        }
    }

    /// 1 (strongly disagree) through 5 (strongly agree).
    pub const fn score(self) -> u8 {
        match self {
            Likert::StronglyDisagree => 1,
            Likert::Disagree => 2,
            Likert::Neutral => 3,
            Likert::Agree => 4,
            Likert::StronglyAgree => 5,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.label() == label)
    }

    pub fn from_score(score: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.score() == score)
    }
}

impl fmt::Display for Likert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single response to one catalog question.
///
/// JSON form is `null`, an integer (scale answers) or a label string.
/// Strings that are not one of the five Likert labels are kept as
/// `Unrecognized` so they score as zero instead of failing the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Answer {
    #[default]
    Unanswered,
    Scale(i32),
    Choice(Likert),
    Unrecognized(String),
}

impl Answer {
    pub fn is_answered(&self) -> bool {
        !matches!(self, Answer::Unanswered)
    }

    pub fn from_label(label: &str) -> Self {
        match Likert::from_label(label) {
            Some(likert) => Answer::Choice(likert),
            None => Answer::Unrecognized(label.to_string()),
        }
    }
}

impl From<Likert> for Answer {
    fn from(value: Likert) -> Self {
        Answer::Choice(value)
    }
}

impl From<i32> for Answer {
    fn from(value: i32) -> Self {
        Answer::Scale(value)
    }
}

impl Serialize for Answer {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Answer::Unanswered => serializer.serialize_none(),
            Answer::Scale(n) => serializer.serialize_i32(*n),
            Answer::Choice(likert) => serializer.serialize_str(likert.label()),
            Answer::Unrecognized(label) => serializer.serialize_str(label),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnswer {
    Number(i64),
    Label(String),
}

impl<'de> Deserialize<'de> for Answer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match Option::<RawAnswer>::deserialize(deserializer)? {
            None => Answer::Unanswered,
            Some(RawAnswer::Number(n)) => {
                Answer::Scale(n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
            }
            Some(RawAnswer::Label(label)) => Answer::from_label(&label),
        })
    }
}

/// One partner's answers, positionally aligned with the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(Vec<Answer>);

impl AnswerSet {
    /// A fresh set with every position unanswered.
    pub fn empty(catalog: &Catalog) -> Self {
        Self(vec![Answer::Unanswered; catalog.len()])
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Answer] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Answer> {
        self.0
    }

    /// Answer at `index`; positions past the end read as unanswered.
    pub fn get(&self, index: usize) -> &Answer {
        static UNANSWERED: Answer = Answer::Unanswered;
        self.0.get(index).unwrap_or(&UNANSWERED)
    }

    /// Record an answer, growing the set with unanswered slots if needed.
    pub fn set(&mut self, index: usize, answer: Answer) {
        if index >= self.0.len() {
            self.0.resize(index + 1, Answer::Unanswered);
        }
        self.0[index] = answer;
    }

    pub fn ensure_len(&self, catalog: &Catalog) -> Result<()> {
        if self.len() == catalog.len() {
            Ok(())
        } else {
            Err(AssessmentError::LengthMismatch {
                expected: catalog.len(),
                actual: self.len(),
            })
        }
    }

    pub fn is_category_complete(&self, catalog: &Catalog, category: Category) -> bool {
        catalog
            .questions_in(category)
            .all(|q| self.get(q.index).is_answered())
    }

    /// First category, in questionnaire order, that still has an open question.
    pub fn first_incomplete_category(&self, catalog: &Catalog) -> Option<Category> {
        catalog
            .categories()
            .iter()
            .copied()
            .find(|&category| !self.is_category_complete(catalog, category))
    }

    pub fn is_complete(&self, catalog: &Catalog) -> bool {
        self.first_incomplete_category(catalog).is_none()
    }
}

impl From<Vec<Answer>> for AnswerSet {
    fn from(value: Vec<Answer>) -> Self {
        Self(value)
    }
}

impl FromIterator<Answer> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = Answer>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_mixed_json_answers() {
        let set = AnswerSet::from_json(r#"[null, 7, "Agree", "Maybe"]"#).unwrap();
        assert_eq!(
            set.as_slice(),
            &[
                Answer::Unanswered,
                Answer::Scale(7),
                Answer::Choice(Likert::Agree),
                Answer::Unrecognized("Maybe".to_string()),
            ]
        );
    }

    #[test]
    fn serializes_back_to_mixed_json() {
        let set: AnswerSet = vec![
            Answer::Unanswered,
            Answer::Scale(10),
            Answer::Choice(Likert::StronglyDisagree),
        ]
        .into();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"[null,10,"Strongly Disagree"]"#);
    }

    #[test]
    fn rejects_non_array_json() {
        let err = AnswerSet::from_json(r#"{"a":1}"#).unwrap_err();
        assert!(matches!(err, AssessmentError::InvalidAnswers(_)));
    }

    #[test]
    fn out_of_bounds_reads_unanswered() {
        let set: AnswerSet = vec![Answer::Scale(3)].into();
        assert_eq!(set.get(0), &Answer::Scale(3));
        assert_eq!(set.get(99), &Answer::Unanswered);
    }

    #[test]
    fn completion_tracks_categories_in_order() {
        let catalog = Catalog::standard();
        let mut set = AnswerSet::empty(catalog);
        assert_eq!(
            set.first_incomplete_category(catalog),
            Some(Category::OverallSatisfaction)
        );

        for q in catalog.questions_in(Category::OverallSatisfaction) {
            set.set(q.index, Answer::Choice(Likert::Agree));
        }
        assert!(set.is_category_complete(catalog, Category::OverallSatisfaction));
        assert_eq!(
            set.first_incomplete_category(catalog),
            Some(Category::Communication)
        );

        for q in catalog.questions() {
            set.set(q.index, Answer::Scale(5));
        }
        assert!(set.is_complete(catalog));
        assert!(set.ensure_len(catalog).is_ok());
    }

    #[test]
    fn length_mismatch_is_reported() {
        let catalog = Catalog::standard();
        let set: AnswerSet = vec![Answer::Unanswered; 3].into();
        let err = set.ensure_len(catalog).unwrap_err();
        assert!(matches!(
            err,
            AssessmentError::LengthMismatch { actual: 3, .. }
        ));
    }
}
