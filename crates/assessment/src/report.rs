use serde::Serialize;

use crate::aggregate::{aggregate, round2, CategoryScore};
use crate::answer::AnswerSet;
use crate::catalog::Catalog;
use crate::summary::{summarize, Summary};

/// Mean of each partner's category scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverallScore {
    pub partner1: f64,
    pub partner2: f64,
}

/// Everything the report screen shows for a couple.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub partner1: String,
    pub partner2: String,
    pub scores: Vec<CategoryScore>,
    pub summary: Summary,
}

impl Report {
    pub fn build(
        catalog: &Catalog,
        partner1: impl Into<String>,
        p1: &AnswerSet,
        partner2: impl Into<String>,
        p2: &AnswerSet,
    ) -> Self {
        let scores = aggregate(catalog, p1, p2);
        let summary = summarize(&scores);
        Self {
            partner1: partner1.into(),
            partner2: partner2.into(),
            scores,
            summary,
        }
    }

    pub fn overall(&self) -> OverallScore {
        let count = self.scores.len().max(1) as f64;
        let (sum1, sum2) = self
            .scores
            .iter()
            .fold((0.0, 0.0), |(a, b), s| (a + s.partner1_score, b + s.partner2_score));
        OverallScore {
            partner1: round2(sum1 / count),
            partner2: round2(sum2 / count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::{Answer, Likert};
    use crate::catalog::QuestionKind;

    fn answers(catalog: &Catalog, likert: Likert) -> AnswerSet {
        catalog
            .questions()
            .iter()
            .map(|q| match q.kind {
                QuestionKind::Scale => Answer::Scale(i32::from(likert.score()) * 2),
                QuestionKind::MultipleChoice => Answer::Choice(likert),
            })
            .collect()
    }

    #[test]
    fn opposite_partners_make_every_category_a_threat() {
        let catalog = Catalog::standard();
        let report = Report::build(
            catalog,
            "Ana",
            &answers(catalog, Likert::StronglyAgree),
            "Ben",
            &answers(catalog, Likert::StronglyDisagree),
        );
        assert_eq!(report.summary.buckets.threats.len(), 12);
        assert!(report.summary.buckets.strengths.is_empty());
        assert_eq!(report.overall(), OverallScore { partner1: 5.0, partner2: 1.0 });
    }

    #[test]
    fn empty_report_has_zero_overall() {
        let catalog = Catalog::standard();
        let empty = AnswerSet::empty(catalog);
        let report = Report::build(catalog, "A", &empty, "B", &empty);
        assert_eq!(report.overall(), OverallScore { partner1: 0.0, partner2: 0.0 });
        assert_eq!(report.summary.buckets.weaknesses.len(), 12);
    }
}
