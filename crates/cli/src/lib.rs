use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use rapport_assessment::{AnswerSet, Catalog, Category, Report};
use rapport_codec::{
    is_environment_sharable, pack, parse_shared_state, rebuild_report, share_url, try_decode,
    try_decode_for, unpack, SharedState,
};
use rapport_protocol::{serialize_json, serialize_json_pretty, SharablePayload, SharedPartner};
use serde_json::{json, Value};
use std::io;
use std::path::PathBuf;

use crate::answers::{parse_answers, require_complete, require_len};
use crate::config::{ConfigFlags, Settings};
use crate::flags::ReportFormat;
use crate::response::{CliResponse, CommandError, CommandResult, ErrorCode, WithCode};

mod answers;
mod config;
mod flags;
mod report;
mod response;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "rapport")]
#[command(about = "Two-partner relationship assessment: questions, share links and reports", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (JSON or TOML) with `base_url` / `pretty`
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL share links point at (overrides RAPPORT_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Pretty-print JSON output (overrides RAPPORT_PRETTY)
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the questionnaire in order
    Questions,

    /// List the assessment categories
    Categories,

    /// Pack a JSON answer array into the compact share form
    Pack(PackArgs),

    /// Expand a packed answer string back into answers
    Unpack(UnpackArgs),

    /// Build a share token from names and answers
    Encode(EncodeArgs),

    /// Decode a share token
    Decode(DecodeArgs),

    /// Create an invitation link for partner 2
    Invite(InviteArgs),

    /// Answer an invitation and create the report link
    Respond(RespondArgs),

    /// Show the report behind a report token or link
    Report(ReportArgs),

    /// Score two answer sets without names or tokens
    Score(ScoreArgs),

    /// Classify a landing URL as fresh, invite or report
    #[command(name = "parse-url")]
    ParseUrl(ParseUrlArgs),
}

#[derive(Args)]
struct PackArgs {
    /// JSON array, one entry per question
    #[arg(long)]
    answers: String,
}

#[derive(Args)]
struct UnpackArgs {
    /// Packed answer string
    packed: String,
}

#[derive(Args)]
struct EncodeArgs {
    #[arg(long)]
    p1_name: String,

    /// JSON array or packed answer string
    #[arg(long)]
    p1_answers: String,

    #[arg(long, requires = "p2_answers")]
    p2_name: Option<String>,

    #[arg(long, requires = "p2_name")]
    p2_answers: Option<String>,
}

#[derive(Args)]
struct DecodeArgs {
    token: String,
}

#[derive(Args)]
struct InviteArgs {
    /// Partner 1 display name
    #[arg(long)]
    name: String,

    /// JSON array or packed answer string
    #[arg(long)]
    answers: String,
}

#[derive(Args)]
struct RespondArgs {
    /// Invitation token or link
    #[arg(long)]
    invite: String,

    /// Partner 2 display name
    #[arg(long)]
    name: String,

    /// JSON array or packed answer string
    #[arg(long)]
    answers: String,
}

#[derive(Args)]
struct ReportArgs {
    /// Report token or link
    source: String,

    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    format: ReportFormat,
}

#[derive(Args)]
struct ScoreArgs {
    #[arg(long)]
    p1_answers: String,

    #[arg(long)]
    p2_answers: String,
}

#[derive(Args)]
struct ParseUrlArgs {
    url: String,
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let flags = ConfigFlags {
        config: cli.config.as_deref(),
        base_url: cli.base_url.as_deref(),
        pretty: cli.pretty,
    };
    let (pretty, outcome) = match Settings::from_env(&flags) {
        Ok(settings) => (settings.pretty, run(cli.command, &settings)),
        Err(err) => (
            cli.pretty,
            Err(CommandError::new(ErrorCode::InvalidConfig, err)),
        ),
    };

    let response = match outcome {
        Ok(data) => CliResponse::ok(data),
        Err(err) => {
            log::debug!("Command failed ({}): {err:?}", err.code().as_str());
            CliResponse::error(err)
        }
    };

    let output = if pretty {
        serialize_json_pretty(&response)?
    } else {
        serialize_json(&response)?
    };
    print_stdout(&output)?;

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn run(command: Commands, settings: &Settings) -> CommandResult<Value> {
    let catalog = Catalog::standard();
    match command {
        Commands::Questions => run_questions(catalog),
        Commands::Categories => run_categories(catalog),
        Commands::Pack(args) => run_pack(args),
        Commands::Unpack(args) => run_unpack(args),
        Commands::Encode(args) => run_encode(args, settings),
        Commands::Decode(args) => run_decode(args),
        Commands::Invite(args) => run_invite(catalog, args, settings),
        Commands::Respond(args) => run_respond(catalog, args, settings),
        Commands::Report(args) => run_report(catalog, args),
        Commands::Score(args) => run_score(catalog, args),
        Commands::ParseUrl(args) => run_parse_url(catalog, args),
    }
}

fn run_questions(catalog: &Catalog) -> CommandResult<Value> {
    Ok(json!({
        "count": catalog.len(),
        "questions": catalog.questions(),
    }))
}

fn run_categories(catalog: &Catalog) -> CommandResult<Value> {
    let categories: Vec<Value> = catalog
        .categories()
        .iter()
        .map(|&category: &Category| {
            json!({
                "name": category.name(),
                "title": category.title(),
                "description": category.description(),
                "questions": catalog.questions_in(category).count(),
            })
        })
        .collect();
    Ok(json!({ "categories": categories }))
}

fn run_pack(args: PackArgs) -> CommandResult<Value> {
    let answers = AnswerSet::from_json(&args.answers)
        .context("Answers are not a valid JSON answer array")
        .with_code(ErrorCode::InvalidAnswers)?;
    let packed = pack(answers.as_slice());
    Ok(json!({ "packed": packed, "length": answers.len() }))
}

fn run_unpack(args: UnpackArgs) -> CommandResult<Value> {
    if !rapport_codec::is_packed_alphabet(&args.packed) {
        log::warn!("Packed string has symbols outside 0-5/a-j; they read as unanswered");
    }
    let answers = unpack(&args.packed);
    Ok(json!({ "answers": answers, "length": answers.len() }))
}

fn partner(name: String, raw_answers: &str) -> CommandResult<SharedPartner> {
    let answers = parse_answers(raw_answers)?;
    Ok(SharedPartner::new(name, pack(answers.as_slice())))
}

fn share_response(payload: &SharablePayload, settings: &Settings) -> CommandResult<Value> {
    let too_large = |err: rapport_codec::CodecError| {
        CommandError::new(ErrorCode::InvalidAnswers, err).with_hint("Use shorter names")
    };
    let token = rapport_codec::try_encode(payload).map_err(too_large)?;
    let url = share_url(&settings.base_url, payload).map_err(too_large)?;
    let sharable = is_environment_sharable(&settings.base_url);
    if !sharable {
        log::warn!(
            "Base URL {} is local; links will not open on another device",
            settings.base_url
        );
    }
    Ok(json!({
        "kind": payload.kind(),
        "token": token,
        "url": url,
        "sharable": sharable,
    }))
}

fn run_encode(args: EncodeArgs, settings: &Settings) -> CommandResult<Value> {
    let partner1 = partner(args.p1_name, &args.p1_answers)?;
    let payload = match (args.p2_name, args.p2_answers) {
        (Some(name), Some(answers)) => SharablePayload::report(partner1, partner(name, &answers)?),
        _ => SharablePayload::invite(partner1),
    };
    share_response(&payload, settings)
}

fn run_decode(args: DecodeArgs) -> CommandResult<Value> {
    let payload = try_decode(&args.token)
        .context("Share token could not be decoded")
        .with_code(ErrorCode::InvalidToken)?;
    Ok(json!({ "kind": payload.kind(), "payload": payload }))
}

fn run_invite(catalog: &Catalog, args: InviteArgs, settings: &Settings) -> CommandResult<Value> {
    let answers = parse_answers(&args.answers)?;
    require_complete(catalog, &answers, &args.name)?;
    let payload = SharablePayload::invite(SharedPartner::new(args.name, pack(answers.as_slice())));
    log::info!("Created invitation for {}", payload.partner1.name);
    share_response(&payload, settings)
}

fn looks_like_url(source: &str) -> bool {
    source.contains('?') || source.contains("://")
}

/// Accepts a bare token or a full share link.
fn load_payload(catalog: &Catalog, source: &str) -> CommandResult<SharablePayload> {
    if looks_like_url(source) {
        return match parse_shared_state(catalog, source) {
            SharedState::Invite(payload) | SharedState::Report(payload) => Ok(payload),
            SharedState::Fresh => Err(CommandError::new(
                ErrorCode::InvalidToken,
                anyhow!("Link carries no usable share token"),
            )),
        };
    }
    try_decode_for(catalog, source)
        .context("Share token could not be decoded")
        .with_code(ErrorCode::InvalidToken)
}

fn run_respond(catalog: &Catalog, args: RespondArgs, settings: &Settings) -> CommandResult<Value> {
    let invitation = load_payload(catalog, &args.invite)?;
    if invitation.partner2.is_some() {
        return Err(CommandError::new(
            ErrorCode::InvalidToken,
            anyhow!("Token is already a report; both partners have answered"),
        )
        .with_hint("Use `rapport report` to view it"));
    }
    let answers = parse_answers(&args.answers)?;
    require_complete(catalog, &answers, &args.name)?;

    let payload =
        invitation.with_partner2(SharedPartner::new(args.name, pack(answers.as_slice())));
    share_response(&payload, settings)
}

fn build_report(catalog: &Catalog, payload: &SharablePayload) -> CommandResult<Report> {
    rebuild_report(catalog, payload).ok_or_else(|| {
        CommandError::new(
            ErrorCode::InvalidToken,
            anyhow!("Token is an invitation; partner 2 has not answered yet"),
        )
        .with_hint("Use `rapport respond` to complete it")
    })
}

fn run_report(catalog: &Catalog, args: ReportArgs) -> CommandResult<Value> {
    let payload = load_payload(catalog, &args.source)?;
    let report = build_report(catalog, &payload)?;
    match args.format {
        ReportFormat::Json => Ok(json!({
            "format": args.format.as_str(),
            "overall": report.overall(),
            "report": report,
        })),
        ReportFormat::Markdown => Ok(json!({
            "format": args.format.as_str(),
            "markdown": report::render_markdown_report(&report),
        })),
    }
}

fn run_score(catalog: &Catalog, args: ScoreArgs) -> CommandResult<Value> {
    let p1 = parse_answers(&args.p1_answers)?;
    let p2 = parse_answers(&args.p2_answers)?;
    require_len(catalog, &p1, "Partner 1")?;
    require_len(catalog, &p2, "Partner 2")?;

    let report = Report::build(catalog, "", &p1, "", &p2);
    Ok(json!({
        "overall": report.overall(),
        "scores": report.scores,
        "summary": report.summary,
        "summary_text": report.summary.to_legacy_string(),
    }))
}

fn run_parse_url(catalog: &Catalog, args: ParseUrlArgs) -> CommandResult<Value> {
    let state = parse_shared_state(catalog, &args.url);
    let mut data = json!({ "state": state.as_str() });
    if let Some(payload) = state.payload() {
        data["payload"] = serde_json::to_value(payload)?;
    }
    Ok(data)
}
