use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::AssessmentError;

/// One of the twelve fixed assessment topics, in questionnaire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    OverallSatisfaction,
    Communication,
    ConflictRepair,
    EmotionalSafety,
    ValueImportance,
    Intimacy,
    SpiritualAlignment,
    Finances,
    Parenting,
    Household,
    SharedVision,
    FriendshipFun,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::OverallSatisfaction,
        Category::Communication,
        Category::ConflictRepair,
        Category::EmotionalSafety,
        Category::ValueImportance,
        Category::Intimacy,
        Category::SpiritualAlignment,
        Category::Finances,
        Category::Parenting,
        Category::Household,
        Category::SharedVision,
        Category::FriendshipFun,
    ];

    /// Canonical name, also used as the wire/JSON representation.
    pub const fn name(self) -> &'static str {
        match self {
            Category::OverallSatisfaction => "Overall Relationship Satisfaction",
            Category::Communication => "Communication & Understanding",
            Category::ConflictRepair => "Conflict & Repair",
            Category::EmotionalSafety => "Emotional Safety & Trust",
            Category::ValueImportance => "Value & Importance",
            Category::Intimacy => "Sexual Intimacy & Connection",
            Category::SpiritualAlignment => "Spiritual & Faith Alignment",
            Category::Finances => "Financial Partnership",
            Category::Parenting => "Parenting & Family Life",
            Category::Household => "Household Responsibilities",
            Category::SharedVision => "Long-Term Vision & Shared Goals",
            Category::FriendshipFun => "Friendship, Fun & Laughter",
        }
    }

    /// Short heading for report cards and charts.
    pub const fn title(self) -> &'static str {
        match self {
            Category::OverallSatisfaction => "Overall Satisfaction",
            Category::Communication => "Communication",
            Category::ConflictRepair => "Conflict & Repair",
            Category::EmotionalSafety => "Emotional Safety & Trust",
            Category::ValueImportance => "Value & Importance",
            Category::Intimacy => "Intimacy & Connection",
            Category::SpiritualAlignment => "Spiritual Alignment",
            Category::Finances => "Financial Partnership",
            Category::Parenting => "Parenting & Family",
            Category::Household => "Household Teamwork",
            Category::SharedVision => "Shared Goals & Vision",
            Category::FriendshipFun => "Friendship & Fun",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Category::OverallSatisfaction => {
                "A look at your general happiness and fulfillment in the relationship."
            }
            Category::Communication => "How you express yourselves and listen to one another.",
            Category::ConflictRepair => "How you navigate disagreements and reconnect afterwards.",
            Category::EmotionalSafety => {
                "The level of security, trust, and mutual support you feel."
            }
            Category::ValueImportance => {
                "Feeling prioritized, appreciated, and desired by your partner."
            }
            Category::Intimacy => "Your satisfaction with physical and emotional intimacy.",
            Category::SpiritualAlignment => {
                "Your shared values, beliefs, and spiritual connection."
            }
            Category::Finances => "How you work together as a team on financial matters.",
            Category::Parenting => "Your alignment and teamwork in parenting and family life.",
            Category::Household => {
                "The fairness and partnership in managing household responsibilities."
            }
            Category::SharedVision => "Your alignment on future plans and long-term dreams.",
            Category::FriendshipFun => {
                "The quality of your friendship, shared enjoyment, and laughter."
            }
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| AssessmentError::UnknownCategory(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
