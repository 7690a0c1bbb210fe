use serde::{Deserialize, Serialize};

use crate::answer::AnswerSet;
use crate::catalog::Catalog;
use crate::category::Category;
use crate::insight::Insight;
use crate::normalize::normalize;

/// Largest partner gap still considered aligned.
pub(crate) const ALIGNED_MAX_GAP: f64 = 0.6;
/// Largest partner gap still considered only slightly misaligned.
pub(crate) const SLIGHT_MAX_GAP: f64 = 1.4;

/// Slack for float noise when comparing averages against band edges. Real
/// averages are small sums of halves over a handful of questions, so their
/// distinct values are far more than this apart.
const EDGE_TOLERANCE: f64 = 1e-9;

/// `value > limit`, treating values within float noise of `limit` as equal.
pub(crate) fn exceeds(value: f64, limit: f64) -> bool {
    value > limit + EDGE_TOLERANCE
}

/// `value >= limit`, treating values within float noise of `limit` as equal.
pub(crate) fn reaches(value: f64, limit: f64) -> bool {
    value >= limit - EDGE_TOLERANCE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Aligned,
    #[serde(rename = "Slightly Misaligned")]
    SlightlyMisaligned,
    Misaligned,
}

impl Alignment {
    pub fn classify(s1: f64, s2: f64) -> Self {
        Self::from_gap((s1 - s2).abs())
    }

    pub fn from_gap(gap: f64) -> Self {
        if !exceeds(gap, ALIGNED_MAX_GAP) {
            Alignment::Aligned
        } else if !exceeds(gap, SLIGHT_MAX_GAP) {
            Alignment::SlightlyMisaligned
        } else {
            Alignment::Misaligned
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Alignment::Aligned => "Aligned",
            Alignment::SlightlyMisaligned => "Slightly Misaligned",
            Alignment::Misaligned => "Misaligned",
        }
    }
}

/// Per-category comparison of the two partners.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: Category,
    /// Partner 1 average, rounded to two decimals.
    pub partner1_score: f64,
    /// Partner 2 average, rounded to two decimals.
    pub partner2_score: f64,
    pub alignment: Alignment,
    pub insight: Insight,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Average one partner's normalized answers over a category's questions.
///
/// Unanswered questions score 0 and still count towards the denominator. A
/// category without questions averages to 0.
fn category_average(catalog: &Catalog, answers: &AnswerSet, category: Category) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for question in catalog.questions_in(category) {
        total += normalize(answers.get(question.index), question);
        count += 1;
    }
    total / count.max(1) as f64
}

/// Score both partners category by category, in catalog order.
///
/// Alignment and insight are derived from the unrounded averages; rounding is
/// applied only to the reported scores.
pub fn aggregate(catalog: &Catalog, p1: &AnswerSet, p2: &AnswerSet) -> Vec<CategoryScore> {
    catalog
        .categories()
        .iter()
        .map(|&category| {
            let s1 = category_average(catalog, p1, category);
            let s2 = category_average(catalog, p2, category);
            CategoryScore {
                category,
                partner1_score: round2(s1),
                partner2_score: round2(s2),
                alignment: Alignment::classify(s1, s2),
                insight: category.insight(s1, s2),
            }
        })
        .collect()
}
