use once_cell::sync::Lazy;
use serde::Serialize;

use crate::answer::Likert;
use crate::category::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// 1-10 rating.
    Scale,
    /// One of the five Likert labels.
    MultipleChoice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Stable position in the catalog; answer sets are indexed by it.
    pub index: usize,
    pub category: Category,
    pub kind: QuestionKind,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// Ordered, immutable question battery.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Vec<Question>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog over all twelve categories. Indices are assigned in
    /// the order the entries are given.
    pub fn new<S: Into<String>>(
        entries: impl IntoIterator<Item = (Category, QuestionKind, S)>,
    ) -> Self {
        Self::with_categories(Category::ALL.to_vec(), entries)
    }

    pub fn with_categories<S: Into<String>>(
        categories: Vec<Category>,
        entries: impl IntoIterator<Item = (Category, QuestionKind, S)>,
    ) -> Self {
        let questions = entries
            .into_iter()
            .enumerate()
            .map(|(index, (category, kind, text))| Question {
                index,
                category,
                kind,
                text: text.into(),
                options: match kind {
                    QuestionKind::Scale => Vec::new(),
                    QuestionKind::MultipleChoice => {
                        Likert::ALL.iter().map(|l| l.label().to_string()).collect()
                    }
                },
            })
            .collect();
        Self {
            questions,
            categories,
        }
    }

    /// The built-in sixty-question battery.
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Categories in report order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn questions_in(&self, category: Category) -> impl Iterator<Item = &Question> + '_ {
        self.questions
            .iter()
            .filter(move |q| q.category == category)
    }
}

static STANDARD: Lazy<Catalog> =
    Lazy::new(|| Catalog::new(standard::QUESTIONS.iter().copied()));

mod standard {
    use super::QuestionKind::{self, MultipleChoice as Mc, Scale};
    use crate::category::Category::{self, *};

    pub(super) const QUESTIONS: &[(Category, QuestionKind, &str)] = &[
        (OverallSatisfaction, Scale, "On a scale of 1-10, how would you rate your relationship today?"),
        (OverallSatisfaction, Mc, "I feel genuinely happy and fulfilled in my marriage."),
        (OverallSatisfaction, Mc, "I would choose my spouse again if I had to do it all over."),
        (OverallSatisfaction, Mc, "My relationship consistently brings out the best in me."),
        (OverallSatisfaction, Mc, "I feel optimistic and excited about our future together."),
        (Communication, Mc, "My spouse is an attentive listener when I am speaking."),
        (Communication, Mc, "I feel safe and comfortable expressing my true feelings to my spouse."),
        (Communication, Mc, "We are good at discussing important topics without it escalating into an argument."),
        (Communication, Mc, "I feel heard and understood after we have a conversation."),
        (Communication, Mc, "My spouse communicates appreciation for me regularly."),
        (ConflictRepair, Mc, "We can disagree on important matters and still respect each other's perspective."),
        (ConflictRepair, Mc, "When we argue, we tend to fight fairly (no name-calling, yelling, etc.)."),
        (ConflictRepair, Mc, "We are quick to apologize and make amends after a disagreement."),
        (ConflictRepair, Mc, "I feel we are effective at finding compromises that work for both of us."),
        (ConflictRepair, Mc, "We can discuss \"hot button\" topics without it damaging our connection."),
        (EmotionalSafety, Mc, "I trust my spouse completely, without any reservations."),
        (EmotionalSafety, Mc, "My spouse makes me feel emotionally safe, even when I am vulnerable."),
        (EmotionalSafety, Mc, "I know my spouse has my back, no matter what."),
        (EmotionalSafety, Mc, "My spouse is my biggest supporter and cheerleader."),
        (EmotionalSafety, Mc, "I never worry about my spouse being unfaithful."),
        (ValueImportance, Mc, "I feel like a top priority in my spouse's life."),
        (ValueImportance, Mc, "My spouse regularly makes me feel desired and wanted."),
        (ValueImportance, Mc, "I feel seen and appreciated for who I am by my spouse."),
        (ValueImportance, Mc, "My contributions to our life together are acknowledged and valued."),
        (ValueImportance, Mc, "My spouse shows they are thinking of me through small gestures."),
        (Intimacy, Mc, "I am satisfied with the quality of our sexual intimacy."),
        (Intimacy, Mc, "I am satisfied with the frequency of our sexual intimacy."),
        (Intimacy, Mc, "We are able to openly talk about our sexual desires and preferences."),
        (Intimacy, Mc, "I feel a strong sense of emotional connection during physical intimacy."),
        (Intimacy, Mc, "My spouse initiates physical affection (hugs, kisses, etc.) outside of sex."),
        (SpiritualAlignment, Mc, "My spouse and I share similar core spiritual or moral values."),
        (SpiritualAlignment, Mc, "We support each other's spiritual or personal growth journeys."),
        (SpiritualAlignment, Mc, "Our shared faith or values strengthen our marital bond."),
        (SpiritualAlignment, Mc, "We can discuss our beliefs respectfully, even when they differ."),
        (SpiritualAlignment, Mc, "Our spiritual connection is an important part of our relationship."),
        (Finances, Mc, "My spouse and I are aligned on our financial goals and priorities."),
        (Finances, Mc, "We communicate openly and honestly about our spending and saving habits."),
        (Finances, Mc, "I feel we work as a team when it comes to managing our finances."),
        (Finances, Mc, "I am comfortable with the way we make major financial decisions together."),
        (Finances, Mc, "Money is not a major source of stress or conflict in our relationship."),
        (Parenting, Mc, "My spouse and I share a consistent and united parenting philosophy."),
        (Parenting, Mc, "I feel supported by my spouse in my parenting role."),
        (Parenting, Mc, "We make a great team in handling the challenges of raising children."),
        (Parenting, Mc, "We effectively balance our roles as partners and as parents."),
        (Parenting, Mc, "We agree on what is most important to teach our children."),
        (Household, Mc, "Household chores and responsibilities are divided fairly between us."),
        (Household, Mc, "I feel my contributions to the household are recognized and appreciated."),
        (Household, Mc, "We work together effectively to manage our home."),
        (Household, Mc, "I am satisfied with how we manage the \"mental load\" of running our household."),
        (Household, Mc, "We have a system for household tasks that works well for both of us."),
        (SharedVision, Mc, "My spouse and I share a similar vision for our future."),
        (SharedVision, Mc, "We are actively working towards shared dreams and goals."),
        (SharedVision, Mc, "I feel my personal goals are supported by my spouse."),
        (SharedVision, Mc, "We regularly talk about our plans for the next 5, 10, or 20 years."),
        (SharedVision, Mc, "Our individual paths feel aligned and complementary."),
        (FriendshipFun, Mc, "My spouse is one of my best friends."),
        (FriendshipFun, Mc, "We make time to have fun and laugh together regularly."),
        (FriendshipFun, Mc, "I enjoy the time we spend together just hanging out."),
        (FriendshipFun, Mc, "We have shared hobbies and interests that we enjoy together."),
        (FriendshipFun, Mc, "Our relationship is filled with playfulness and spontaneity."),
    ];
}
