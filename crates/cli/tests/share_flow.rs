use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

const QUESTIONS: usize = 60;

#[allow(deprecated)]
fn rapport() -> Command {
    let mut cmd = Command::cargo_bin("rapport").expect("binary");
    cmd.env_remove("RAPPORT_BASE_URL")
        .env_remove("RAPPORT_PRETTY")
        .env_remove("RUST_LOG");
    cmd
}

fn run_ok(args: &[&str]) -> Value {
    let output = rapport().args(args).output().expect("command run");
    assert!(
        output.status.success(),
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["status"], "ok");
    body["data"].clone()
}

fn run_err(args: &[&str]) -> Value {
    let output = rapport().args(args).output().expect("command run");
    assert!(!output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["status"], "error");
    body["error"].clone()
}

#[test]
fn questions_lists_the_catalog() {
    let data = run_ok(&["questions"]);
    assert_eq!(data["count"], QUESTIONS);
    let questions = data["questions"].as_array().expect("questions array");
    assert_eq!(questions[0]["index"], 0);
    assert_eq!(questions[0]["kind"], "scale");
    assert_eq!(questions[0]["category"], "Overall Relationship Satisfaction");
    assert_eq!(questions[1]["kind"], "multiple_choice");
    assert_eq!(questions[1]["options"].as_array().unwrap().len(), 5);
}

#[test]
fn categories_have_titles_and_counts() {
    let data = run_ok(&["categories"]);
    let categories = data["categories"].as_array().expect("categories");
    assert_eq!(categories.len(), 12);
    assert!(categories.iter().all(|c| c["questions"] == 5));
    assert_eq!(categories[7]["name"], "Financial Partnership");
}

#[test]
fn pack_and_unpack() {
    let data = run_ok(&["pack", "--answers", r#"[null, 7, "Agree"]"#]);
    assert_eq!(data["packed"], "0g4");

    let data = run_ok(&["unpack", "0g4"]);
    assert_eq!(data["answers"], serde_json::json!([null, 7, "Agree"]));
}

#[test]
fn invite_respond_report() {
    let p1 = "j".to_string() + &"5".repeat(QUESTIONS - 1);
    let p2 = "h".to_string() + &"4".repeat(QUESTIONS - 1);

    let invite = run_ok(&[
        "--base-url",
        "https://rapport.example/app?stale=1",
        "invite",
        "--name",
        "Ana",
        "--answers",
        &p1,
    ]);
    assert_eq!(invite["kind"], "invite");
    assert_eq!(invite["sharable"], true);
    let url = invite["url"].as_str().expect("url");
    assert!(url.starts_with("https://rapport.example/app?data="));

    let parsed = run_ok(&["parse-url", url]);
    assert_eq!(parsed["state"], "invite");
    assert_eq!(parsed["payload"]["p1n"], "Ana");

    let respond = run_ok(&["respond", "--invite", url, "--name", "Ben", "--answers", &p2]);
    assert_eq!(respond["kind"], "report");
    let token = respond["token"].as_str().expect("token");

    let report = run_ok(&["report", token]);
    assert_eq!(report["format"], "json");
    assert_eq!(report["report"]["partner1"], "Ana");
    assert_eq!(report["report"]["partner2"], "Ben");
    let scores = report["report"]["scores"].as_array().expect("scores");
    assert_eq!(scores.len(), 12);
    assert_eq!(scores[1]["alignment"], "Slightly Misaligned");
    assert_eq!(report["overall"]["partner2"], 4.0);

    let md = run_ok(&["report", respond["url"].as_str().unwrap(), "--format", "markdown"]);
    let markdown = md["markdown"].as_str().expect("markdown");
    assert!(markdown.starts_with("# Rapport report: Ana & Ben"));
}

#[test]
fn incomplete_invite_names_the_open_category() {
    let mut answers = "5".repeat(QUESTIONS);
    answers.replace_range(12..13, "0");
    let error = run_err(&["invite", "--name", "Ana", "--answers", &answers]);
    assert_eq!(error["code"], "incomplete_answers");
    assert!(error["message"].as_str().unwrap().contains("Conflict & Repair"));
    assert!(error["hint"].is_string());
}

#[test]
fn garbage_token_is_an_error_envelope() {
    let error = run_err(&["decode", "not-valid-base64!!"]);
    assert_eq!(error["code"], "invalid_token");

    let error = run_err(&["report", "not-valid-base64!!"]);
    assert_eq!(error["code"], "invalid_token");
}

#[test]
fn invitation_token_is_not_a_report() {
    let invite = run_ok(&["encode", "--p1-name", "Ana", "--p1-answers", &"3".repeat(QUESTIONS)]);
    let error = run_err(&["report", invite["token"].as_str().unwrap()]);
    assert_eq!(error["code"], "invalid_token");
    assert!(error["message"].as_str().unwrap().contains("partner 2"));
}

#[test]
fn parse_url_falls_back_to_fresh() {
    let data = run_ok(&["parse-url", "https://rapport.example/?report=garbage"]);
    assert_eq!(data["state"], "fresh");
    assert!(data.get("payload").is_none());
}

#[test]
fn score_without_names() {
    let data = run_ok(&[
        "score",
        "--p1-answers",
        &("j".to_string() + &"5".repeat(QUESTIONS - 1)),
        "--p2-answers",
        &("b".to_string() + &"1".repeat(QUESTIONS - 1)),
    ]);
    assert_eq!(data["overall"]["partner1"], 5.0);
    assert_eq!(data["overall"]["partner2"], 1.0);
    assert!(data["summary_text"]
        .as_str()
        .unwrap()
        .starts_with("PARAGRAPH_1: "));

    let error = run_err(&["score", "--p1-answers", "555", "--p2-answers", "555"]);
    assert_eq!(error["code"], "invalid_answers");
}

#[test]
fn invalid_answers_are_rejected() {
    rapport()
        .args(["pack", "--answers", "{not json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""code":"invalid_answers""#));
}

#[test]
fn long_names_round_trip_and_oversized_names_fail() {
    let answers = "3".repeat(QUESTIONS);
    let name = "Zoë 💛".repeat(600);
    let invite = run_ok(&["invite", "--name", &name, "--answers", &answers]);
    let parsed = run_ok(&["parse-url", invite["url"].as_str().unwrap()]);
    assert_eq!(parsed["state"], "invite");
    assert_eq!(parsed["payload"]["p1n"], name.as_str());

    let error = run_err(&["invite", "--name", &"x".repeat(60_000), "--answers", &answers]);
    assert_eq!(error["code"], "invalid_answers");
    assert!(error["message"].as_str().unwrap().contains("too large"));
}
