use pretty_assertions::assert_eq;
use rapport_assessment::{Alignment, Answer, AnswerSet, Catalog, Category, Likert, QuestionKind};
use rapport_codec::{
    decode, encode, invite_url, pack, parse_shared_state, report_url, unpack, SharedState,
};
use rapport_protocol::{SharablePayload, SharedPartner};

fn answers_with(catalog: &Catalog, scale: i32, choice: Likert) -> AnswerSet {
    catalog
        .questions()
        .iter()
        .map(|q| match q.kind {
            QuestionKind::Scale => Answer::Scale(scale),
            QuestionKind::MultipleChoice => Answer::Choice(choice),
        })
        .collect()
}

#[test]
fn invite_respond_report_flow() {
    let catalog = Catalog::standard();
    let base = "https://rapport.example/app";

    // Partner 1 answers and shares an invitation.
    let p1 = answers_with(catalog, 9, Likert::StronglyAgree);
    let invite = invite_url(base, SharedPartner::new("Ana", pack(p1.as_slice())))
        .expect("invite link");

    // Partner 2 opens it.
    let state = parse_shared_state(catalog, &invite);
    let payload = match state {
        SharedState::Invite(payload) => payload,
        other => panic!("expected invite, got {other:?}"),
    };
    assert_eq!(payload.partner1.name, "Ana");
    assert_eq!(unpack(&payload.partner1.answers), p1);

    // Partner 2 answers and produces the report link.
    let p2 = answers_with(catalog, 8, Likert::Agree);
    let report = report_url(
        base,
        payload.partner1,
        SharedPartner::new("Ben", pack(p2.as_slice())),
    )
    .expect("report link");
    assert!(report.starts_with("https://rapport.example/app?report="));

    let state = parse_shared_state(catalog, &report);
    let built = state.report(catalog).expect("report state");
    assert_eq!(built.partner1, "Ana");
    assert_eq!(built.partner2, "Ben");
    assert_eq!(built.scores.len(), Category::ALL.len());

    let communication = built
        .scores
        .iter()
        .find(|s| s.category == Category::Communication)
        .expect("communication score");
    assert_eq!(communication.partner1_score, 5.0);
    assert_eq!(communication.partner2_score, 4.0);
    assert_eq!(communication.alignment, Alignment::SlightlyMisaligned);
}

#[test]
fn packed_answers_survive_a_token_roundtrip() {
    let answers = vec![
        Answer::Unanswered,
        Answer::Scale(7),
        Answer::Choice(Likert::Agree),
    ];
    let packed = pack(&answers);
    assert_eq!(packed, "0g4");

    let payload = SharablePayload::invite(SharedPartner::new("Ana", packed));
    let decoded = decode(&encode(&payload)).expect("decodes");
    assert_eq!(unpack(&decoded.partner1.answers).into_vec(), answers);
}

#[test]
fn long_names_survive_the_whole_flow() {
    let catalog = Catalog::standard();
    let answers = "4".repeat(catalog.len());
    let invite = invite_url(
        "https://rapport.example/",
        SharedPartner::new("Zoë 💛".repeat(600), answers.clone()),
    )
    .expect("invite link");
    let SharedState::Invite(payload) = parse_shared_state(catalog, &invite) else {
        panic!("long-name invitation did not decode");
    };
    let report = report_url(
        "https://rapport.example/",
        payload.partner1,
        SharedPartner::new("Łukasz ".repeat(400), answers),
    )
    .expect("report link");
    let built = parse_shared_state(catalog, &report)
        .report(catalog)
        .expect("report state");
    assert_eq!(built.partner1, "Zoë 💛".repeat(600));
}

#[test]
fn tampered_links_start_fresh() {
    let catalog = Catalog::standard();
    let url = invite_url(
        "https://rapport.example/",
        SharedPartner::new("Ana", "3".repeat(catalog.len())),
    )
    .expect("invite link");
    let tampered = format!("{}x", &url[..url.len() - 6]);
    assert_eq!(parse_shared_state(catalog, &tampered), SharedState::Fresh);
    assert_eq!(
        parse_shared_state(catalog, "https://rapport.example/?report="),
        SharedState::Fresh
    );
}
