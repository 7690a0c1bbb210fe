use rapport_assessment::{Answer, AnswerSet, Likert};

const UNANSWERED: char = '0';

fn pack_one(answer: &Answer) -> char {
    match answer {
        Answer::Unanswered => UNANSWERED,
        // 1..=10 -> 'a'..='j'
        Answer::Scale(n @ 1..=10) => char::from(b'a' + (*n as u8 - 1)),
        Answer::Choice(likert) => char::from(b'0' + likert.score()),
        Answer::Scale(_) | Answer::Unrecognized(_) => UNANSWERED,
    }
}

fn unpack_one(symbol: char) -> Answer {
    match symbol {
        'a'..='j' => Answer::Scale(i32::from(symbol as u8 - b'a') + 1),
        '1'..='5' => Likert::from_score(symbol as u8 - b'0')
            .map(Answer::Choice)
            .unwrap_or_default(),
        _ => Answer::Unanswered,
    }
}

/// One character per answer: `'0'` unanswered, `'a'..'j'` scale 1..10,
/// `'1'..'5'` Likert labels. Answers with no symbol pack as `'0'`.
pub fn pack(answers: &[Answer]) -> String {
    answers.iter().map(pack_one).collect()
}

/// Inverse of [`pack`]; unknown symbols read as unanswered.
pub fn unpack(packed: &str) -> AnswerSet {
    packed.chars().map(unpack_one).collect()
}

pub fn is_packed_alphabet(packed: &str) -> bool {
    packed
        .chars()
        .all(|c| matches!(c, '0'..='5' | 'a'..='j'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn packs_mixed_answers() {
        let answers = vec![
            Answer::Unanswered,
            Answer::Scale(7),
            Answer::Choice(Likert::Agree),
        ];
        assert_eq!(pack(&answers), "0g4");
        assert_eq!(unpack("0g4").into_vec(), answers);
    }

    #[test]
    fn scale_edges_map_to_a_and_j() {
        assert_eq!(pack(&[Answer::Scale(1), Answer::Scale(10)]), "aj");
    }

    #[test]
    fn unpackable_answers_become_zero() {
        let answers = vec![
            Answer::Scale(0),
            Answer::Scale(11),
            Answer::Scale(-4),
            Answer::Unrecognized("Sometimes".into()),
        ];
        assert_eq!(pack(&answers), "0000");
    }

    #[test]
    fn unknown_symbols_unpack_as_unanswered() {
        let set = unpack("6kZ!é3");
        assert_eq!(
            set.into_vec(),
            vec![
                Answer::Unanswered,
                Answer::Unanswered,
                Answer::Unanswered,
                Answer::Unanswered,
                Answer::Unanswered,
                Answer::Choice(Likert::Neutral),
            ]
        );
    }

    #[test]
    fn alphabet_check() {
        assert!(is_packed_alphabet("012345abcdefghij"));
        assert!(is_packed_alphabet(""));
        assert!(!is_packed_alphabet("6"));
        assert!(!is_packed_alphabet("k"));
    }

    fn answer_strategy() -> impl Strategy<Value = Answer> {
        prop_oneof![
            Just(Answer::Unanswered),
            (1i32..=10).prop_map(Answer::Scale),
            (0usize..5).prop_map(|i| Answer::Choice(Likert::ALL[i])),
        ]
    }

    proptest! {
        #[test]
        fn well_formed_answers_roundtrip(answers in prop::collection::vec(answer_strategy(), 0..80)) {
            let packed = pack(&answers);
            prop_assert_eq!(packed.chars().count(), answers.len());
            prop_assert!(is_packed_alphabet(&packed));
            prop_assert_eq!(unpack(&packed).into_vec(), answers);
        }

        #[test]
        fn unpack_never_changes_length(s in "\\PC{0,80}") {
            prop_assert_eq!(unpack(&s).len(), s.chars().count());
        }
    }
}
