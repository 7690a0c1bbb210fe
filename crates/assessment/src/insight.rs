use serde::Serialize;
use std::fmt;

use crate::aggregate::{exceeds, reaches, SLIGHT_MAX_GAP};
use crate::category::Category;

/// Average at or above which an aligned category reads as a strength.
pub(crate) const STRENGTH_MIN_AVERAGE: f64 = 3.8;

/// Separator used by the flat text form of an insight.
const LEGACY_SEPARATOR: &str = " Recommendation: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Strength,
    Growth,
    Misaligned,
}

/// Reflection on a category plus an optional concrete next step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub reflection: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Insight {
    /// `"<reflection> Recommendation: <action>"`, or just the reflection.
    pub fn to_legacy_string(&self) -> String {
        self.to_string()
    }

    /// Split a flat insight string into reflection and action.
    pub fn parse_legacy(kind: InsightKind, text: &str) -> Self {
        match text.split_once(LEGACY_SEPARATOR) {
            Some((reflection, action)) => Self {
                kind,
                reflection: reflection.to_string(),
                action: Some(action.to_string()),
            },
            None => Self {
                kind,
                reflection: text.to_string(),
                action: None,
            },
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            Some(action) => write!(f, "{}{LEGACY_SEPARATOR}{action}", self.reflection),
            None => f.write_str(&self.reflection),
        }
    }
}

struct Template {
    reflection: &'static str,
    action: Option<&'static str>,
}

struct Templates {
    strength: Template,
    growth: Template,
    misaligned: Template,
}

impl Templates {
    fn pick(&self, kind: InsightKind) -> &Template {
        match kind {
            InsightKind::Strength => &self.strength,
            InsightKind::Growth => &self.growth,
            InsightKind::Misaligned => &self.misaligned,
        }
    }
}

macro_rules! t {
    ($reflection:expr) => {
        Template {
            reflection: $reflection,
            action: None,
        }
    };
    ($reflection:expr, $action:expr) => {
        Template {
            reflection: $reflection,
            action: Some($action),
        }
    };
}

/// Strength / growth / misaligned selection; the gap rule wins over the
/// average rule.
fn select_kind(s1: f64, s2: f64) -> InsightKind {
    if exceeds((s1 - s2).abs(), SLIGHT_MAX_GAP) {
        InsightKind::Misaligned
    } else if reaches((s1 + s2) / 2.0, STRENGTH_MIN_AVERAGE) {
        InsightKind::Strength
    } else {
        InsightKind::Growth
    }
}

fn build(templates: &Templates, s1: f64, s2: f64) -> Insight {
    let kind = select_kind(s1, s2);
    let template = templates.pick(kind);
    Insight {
        kind,
        reflection: template.reflection.to_string(),
        action: template.action.map(str::to_string),
    }
}

impl Category {
    pub fn insight(self, s1: f64, s2: f64) -> Insight {
        build(templates_for(self), s1, s2)
    }
}

/// Insight for a category given by name; unknown names get generic wording.
pub fn insight_for(category: &str, s1: f64, s2: f64) -> Insight {
    match Category::from_name(category) {
        Some(category) => category.insight(s1, s2),
        None => build(&GENERIC, s1, s2),
    }
}

const GENERIC: Templates = Templates {
    strength: t!("You have a solid foundation here."),
    growth: t!("There is an opportunity to connect deeper in this area."),
    misaligned: t!("Differing perspectives here offer a chance for growth."),
};

fn templates_for(category: Category) -> &'static Templates {
    match category {
        Category::OverallSatisfaction => &OVERALL,
        Category::Communication => &COMMUNICATION,
        Category::ConflictRepair => &CONFLICT,
        Category::EmotionalSafety => &SAFETY,
        Category::ValueImportance => &VALUE,
        Category::Intimacy => &INTIMACY,
        Category::SpiritualAlignment => &SPIRITUAL,
        Category::Finances => &FINANCES,
        Category::Parenting => &PARENTING,
        Category::Household => &HOUSEHOLD,
        Category::SharedVision => &VISION,
        Category::FriendshipFun => &FRIENDSHIP,
    }
}

static OVERALL: Templates = Templates {
    strength: t!(
        "You both feel a deep sense of fulfillment.",
        "Celebrate this foundation by sharing one thing you specifically admire about your partner today."
    ),
    growth: t!(
        "You are both feeling a pull for more connection.",
        "Schedule a 'State of the Union' talk to discuss what a '10/10' day looks like for each of you."
    ),
    misaligned: t!(
        "One partner is feeling more satisfied than the other.",
        "The more satisfied partner should lean in with curiosity: 'What can I do this week to make you feel more loved?'"
    ),
};

static COMMUNICATION: Templates = Templates {
    strength: t!(
        "Your communication is a superpower.",
        "Keep it sharp by practicing 'Daily 20'\u{2014}20 minutes of talk with no screens and no talk of logistics/kids."
    ),
    growth: t!(
        "Communication feels a bit strained lately.",
        "Try the 'Speaker-Listener Technique.' One person holds a 'floor' object and speaks while the other only listens and summarizes back."
    ),
    misaligned: t!(
        "There's a gap in how heard you each feel.",
        "Practice 'The Gentle Startup'\u{2014}start requests with 'I feel...' instead of 'You always...'"
    ),
};

static CONFLICT: Templates = Templates {
    strength: t!(
        "You navigate disagreements with grace.",
        "Notice your 'Repair Attempts' (like a joke or a touch during a fight) and keep rewarding them."
    ),
    growth: t!(
        "Arguments may feel circular or draining.",
        "Agree on a 'Time Out' signal. If things get too heated, take 20 minutes apart to soothe before returning to the topic."
    ),
    misaligned: t!(
        "You have different styles of handling conflict.",
        "Discuss your 'Conflict History.' How did your parents argue? Understanding your blueprints helps build empathy."
    ),
};

static SAFETY: Templates = Templates {
    strength: t!(
        "Your trust is a fortress.",
        "Continue being each other's 'Safe Harbor' by being the first person you share good or bad news with."
    ),
    growth: t!(
        "Safety feels a bit fragile right now.",
        "Build trust through 'Micro-Commitments'\u{2014}small promises kept consistently (like being on time or doing a promised chore)."
    ),
    misaligned: t!(
        "Vulnerability levels differ between you.",
        "Share one 'Soft' feeling today (e.g., 'I felt lonely' vs 'I am annoyed') to invite the other in."
    ),
};

static VALUE: Templates = Templates {
    strength: t!(
        "You both feel highly prioritized.",
        "Keep the 'Appreciation Jar' going\u{2014}write down one thing you're grateful for about your partner every day."
    ),
    growth: t!(
        "You may feel like you've moved to the back burner.",
        "Use the '3x3 Rule'\u{2014}three compliments a day for three weeks to reset the culture of appreciation."
    ),
    misaligned: t!(
        "One of you is feeling less valued than the other.",
        "Discuss your 'Love Languages.' You might be showing love in a way your partner doesn't 'translate' as value."
    ),
};

static INTIMACY: Templates = Templates {
    strength: t!(
        "Your physical connection is thriving.",
        "Keep prioritizing 'Physical Touch' as a non-verbal way to stay bonded throughout the day."
    ),
    growth: t!(
        "Intimacy has taken a backseat to life's busyness.",
        "Focus on 'Sensate Focus'\u{2014}start with non-sexual touch like a long hug or a foot rub to rebuild the bridge."
    ),
    misaligned: t!(
        "Your needs or drives are currently out of sync.",
        "Have a 'Curiosity Date' to talk about desires and barriers without the pressure of immediate action."
    ),
};

static SPIRITUAL: Templates = Templates {
    strength: t!(
        "Your shared values provide a strong compass.",
        "Find a way to serve your community together this month to put those values into shared action."
    ),
    growth: t!(
        "You've lost touch with your shared 'Why.'",
        "Spend an evening discussing your 'Legacy'\u{2014}what do you want your marriage to be remembered for?"
    ),
    misaligned: t!(
        "Your individual journeys are heading in different directions.",
        "Look for the 'Overlapping Circles'\u{2014}find the 3 core values you still share and build from there."
    ),
};

static FINANCES: Templates = Templates {
    strength: t!(
        "You are an excellent financial team.",
        "Set a 'Dream Goal'\u{2014}something fun to save for together that isn't a bill or a necessity."
    ),
    growth: t!(
        "Money is creating friction.",
        "Hold a 'Budget Peace' meeting. Focus on shared goals first, then look at the numbers as a team vs. the problem."
    ),
    misaligned: t!(
        "You have different 'Money Personalities' (e.g., Saver vs. Spender).",
        "Assign 'Fun Money' to each partner that can be spent without any input from the other."
    ),
};

static PARENTING: Templates = Templates {
    strength: t!(
        "You are a united front in parenting.",
        "Make sure to 'Date the Spouse'\u{2014}remember you were a couple before you were parents."
    ),
    growth: t!(
        "Parenting is feeling overwhelming.",
        "Create a 'Unified Discipline' plan for the top 3 recurring kid issues to reduce daily decision fatigue."
    ),
    misaligned: t!(
        "You feel like you're pulling in different directions with the kids.",
        "Go for a walk (without kids) and share your 'Ideal Parenting Day' to find middle ground."
    ),
};

static HOUSEHOLD: Templates = Templates {
    strength: t!(
        "You manage your home as true partners.",
        "Take turns 'Taking the Lead' on a major household project to keep the skills balanced."
    ),
    growth: t!(
        "The 'Mental Load' feels unbalanced.",
        "Use a 'Fair Play' approach. List every task and decide who 'Owns' it from conception to completion."
    ),
    misaligned: t!(
        "One partner feels they are doing significantly more.",
        "Conduct a 'Resentment Audit.' What one chore is most draining? See if you can outsource or trade it."
    ),
};

static VISION: Templates = Templates {
    strength: t!(
        "Your futures are beautifully aligned.",
        "Create a 'Marriage Vision Board' to visualize the adventures you have planned."
    ),
    growth: t!(
        "You're living day-to-day but lost the 'Big Picture.'",
        "Take a weekend away to dream. Where do you want to be in 5 years? What steps do you take today?"
    ),
    misaligned: t!(
        "Your individual dreams seem to compete.",
        "Find the 'Dream within the Dream.' If one wants a city and one a farm, maybe the shared dream is 'Adventure' or 'Peace'."
    ),
};

static FRIENDSHIP: Templates = Templates {
    strength: t!(
        "Your friendship is the heart of your marriage.",
        "Try a 'New First'\u{2014}something neither of you has ever done before to create a fresh memory."
    ),
    growth: t!(
        "Life has become all work and no play.",
        "Revisit your 'Dating History.' Go back to a place you loved when you first met to trigger that early fun."
    ),
    misaligned: t!(
        "One partner is craving more play while the other is focused on duty.",
        "The 'serious' partner picks the activity this week\u{2014}choose something low-stakes and silly."
    ),
};
