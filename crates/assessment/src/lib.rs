//! # Rapport Assessment
//!
//! Scoring core of the two-partner relationship assessment.
//!
//! ## Pipeline
//!
//! ```text
//! Answer[] (partner 1)     Answer[] (partner 2)
//!     │                          │
//!     └──────────┬───────────────┘
//!                │
//!                ├──> Normalizer (answer -> 0..5)
//!                │
//!                ├──> Aggregator (per-category averages, Catalog order)
//!                │      └─ Alignment from the unrounded averages
//!                │
//!                ├──> Insight (strength / growth / misaligned template)
//!                │
//!                └──> Summary (strengths, weaknesses, opportunity, threat)
//! ```
//!
//! Every operation here is pure and total: malformed answers degrade to a
//! score of zero instead of failing.

mod aggregate;
mod answer;
mod catalog;
mod category;
mod error;
mod insight;
mod normalize;
mod report;
mod summary;

pub use aggregate::{aggregate, round2, Alignment, CategoryScore};
pub use answer::{Answer, AnswerSet, Likert};
pub use catalog::{Catalog, Question, QuestionKind};
pub use category::Category;
pub use error::{AssessmentError, Result};
pub use insight::{insight_for, Insight, InsightKind};
pub use normalize::{normalize, normalize_checked, NormalizeStatus, Normalized};
pub use report::{OverallScore, Report};
pub use summary::{summarize, Summary, SwotBuckets};
