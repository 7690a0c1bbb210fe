use serde::Serialize;

use crate::aggregate::{Alignment, CategoryScore};
use crate::category::Category;
use crate::insight::STRENGTH_MIN_AVERAGE;

const WEAKNESS_MAX_SCORE: f64 = 3.2;
const OPPORTUNITY_MAX_SCORE: f64 = 4.0;

const CLOSING: &str = "By addressing these dynamics together, you can transform these insights into a roadmap for a deeper, more enduring partnership.";

/// Categories sorted into the four narrative buckets, in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SwotBuckets {
    pub strengths: Vec<Category>,
    pub weaknesses: Vec<Category>,
    pub opportunities: Vec<Category>,
    pub threats: Vec<Category>,
}

impl SwotBuckets {
    /// Bucket membership is decided on the reported (rounded) scores.
    pub fn from_scores(scores: &[CategoryScore]) -> Self {
        let select = |pred: fn(&CategoryScore) -> bool| -> Vec<Category> {
            scores
                .iter()
                .filter(|s| pred(s))
                .map(|s| s.category)
                .collect()
        };
        Self {
            strengths: select(|s| {
                s.partner1_score >= STRENGTH_MIN_AVERAGE
                    && s.partner2_score >= STRENGTH_MIN_AVERAGE
                    && s.alignment == Alignment::Aligned
            }),
            weaknesses: select(|s| {
                s.partner1_score < WEAKNESS_MAX_SCORE
                    && s.partner2_score < WEAKNESS_MAX_SCORE
                    && s.alignment == Alignment::Aligned
            }),
            opportunities: select(|s| {
                s.alignment == Alignment::SlightlyMisaligned
                    || (s.alignment == Alignment::Aligned
                        && s.partner1_score < OPPORTUNITY_MAX_SCORE)
            }),
            threats: select(|s| s.alignment == Alignment::Misaligned),
        }
    }
}

/// Four-part narrative over a whole report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub buckets: SwotBuckets,
    pub strengths: String,
    pub weaknesses: String,
    pub opportunity: String,
    pub threat: String,
    pub closing: String,
}

impl Summary {
    /// Paragraph 1 covers strengths and weaknesses, paragraph 2 the
    /// opportunity and threat.
    pub fn paragraphs(&self) -> [String; 2] {
        [
            format!("{} {}", self.strengths, self.weaknesses),
            format!("{} {}", self.opportunity, self.threat),
        ]
    }

    /// Flat form with `PARAGRAPH_1: ` / ` PARAGRAPH_2: ` markers.
    pub fn to_legacy_string(&self) -> String {
        let [first, second] = self.paragraphs();
        format!("PARAGRAPH_1: {first} PARAGRAPH_2: {second} {}", self.closing)
    }
}

fn names(categories: &[Category], limit: usize) -> String {
    categories
        .iter()
        .take(limit)
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(" and ")
}

pub fn summarize(scores: &[CategoryScore]) -> Summary {
    let buckets = SwotBuckets::from_scores(scores);

    let strengths = if buckets.strengths.is_empty() {
        "Your foundation is built on a shared commitment to growth, even as you navigate current challenges.".to_string()
    } else {
        format!(
            "Your relationship's core strengths are rooted in {}, providing a resilient foundation of shared fulfillment.",
            names(&buckets.strengths, 2)
        )
    };

    let weaknesses = if buckets.weaknesses.is_empty() {
        "While you lack major shared weaknesses, keeping your connection intentional is vital to preventing stagnation.".to_string()
    } else {
        format!(
            "However, common weaknesses in {} suggest that daily stresses may be dampening your connection in these areas.",
            names(&buckets.weaknesses, 2)
        )
    };

    let opportunity = match buckets.opportunities.first() {
        Some(category) => format!(
            "A significant opportunity exists to lean into {category}, where small, intentional shifts in curiosity can yield high rewards for your bond."
        ),
        None => "Your greatest opportunity lies in rediscovering shared play and new experiences to refresh your dynamic.".to_string(),
    };

    let threat = match buckets.threats.first() {
        Some(category) => format!(
            "The primary threat to your long-term harmony is the current misalignment in {category}, which requires non-judgmental dialogue to bridge your differing perspectives."
        ),
        None => "With no major misalignments, your main challenge is to guard against the 'drift' that comes from a busy, routine-focused life.".to_string(),
    };

    Summary {
        buckets,
        strengths,
        weaknesses,
        opportunity,
        threat,
        closing: CLOSING.to_string(),
    }
}
