use crate::infra::InMemoryGiveawayStore;
use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use giveaway::config::{AppConfig, GiveawayConfig};
use giveaway::error::AppError;
use giveaway::workflows::campaign::{
    DrawPreview, DrawScope, GiveawayService, ImportMode, ImportSummary, ServiceError,
};
use giveaway::workflows::draw::{DrawHistory, DrawPhase, DrawResult};
use giveaway::workflows::entries::{EligibilityConfigPatch, Entry, EntryStatus, RawEntry};
use giveaway::workflows::import::{write_entries_csv, CommentImporter, SheetImporter};

#[derive(Args, Debug)]
#[command(group(
    clap::ArgGroup::new("input")
        .required(true)
        .args(["sheet", "comments"])
))]
pub(crate) struct SourceArgs {
    /// Sheet export (CSV): name, comment, tagged friend, liked page, shared post
    #[arg(long)]
    pub(crate) sheet: Option<PathBuf>,
    /// Comments dump (Graph API JSON page)
    #[arg(long)]
    pub(crate) comments: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) rules: RuleArgs,
}

/// Per-run overrides on top of the GIVEAWAY_* settings.
#[derive(Args, Debug, Default)]
pub(crate) struct RuleArgs {
    /// Required hashtag, e.g. #AngThongMusicLove
    #[arg(long)]
    pub(crate) hashtag: Option<String>,
    /// Minimum number of tagged friends
    #[arg(long)]
    pub(crate) min_friends: Option<usize>,
    /// Minimum reason length in characters (hashtags, mentions and spaces excluded)
    #[arg(long)]
    pub(crate) min_length: Option<usize>,
    /// Skip the hashtag rule
    #[arg(long)]
    pub(crate) no_hashtag: bool,
    /// Skip the tagged-friend rule
    #[arg(long)]
    pub(crate) no_tag: bool,
    /// Skip the length rule
    #[arg(long)]
    pub(crate) no_length: bool,
}

impl RuleArgs {
    pub(crate) fn patch(&self) -> EligibilityConfigPatch {
        EligibilityConfigPatch {
            enable_hashtag: self.no_hashtag.then_some(false),
            required_hashtag: self.hashtag.clone(),
            enable_tag: self.no_tag.then_some(false),
            min_tagged_friends: self.min_friends,
            enable_min_length: self.no_length.then_some(false),
            min_text_length: self.min_length,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Print the validated entries as JSON instead of a listing
    #[arg(long)]
    pub(crate) json: bool,
    /// Only list entries that failed validation
    #[arg(long)]
    pub(crate) failed_only: bool,
    /// Also write the validated entries to a CSV file
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ScopeArg {
    Qualified,
    AllEntries,
}

impl From<ScopeArg> for DrawScope {
    fn from(value: ScopeArg) -> Self {
        match value {
            ScopeArg::Qualified => DrawScope::Qualified,
            ScopeArg::AllEntries => DrawScope::AllEntries,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct DrawArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Seed to replay a previous draw; a fresh one is generated when omitted
    #[arg(long)]
    pub(crate) seed: Option<String>,
    /// Which entries the winner is drawn from
    #[arg(long, value_enum, default_value_t = ScopeArg::Qualified)]
    pub(crate) scope: ScopeArg,
    /// Name recorded on the draw (defaults to GIVEAWAY_DRAWN_BY)
    #[arg(long)]
    pub(crate) drawn_by: Option<String>,
    /// Draw history JSON file; past winners are excluded and the new result is appended
    #[arg(long)]
    pub(crate) history: Option<PathBuf>,
    /// Print the draw result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) struct ValidationReport {
    pub(crate) summary: ImportSummary,
    pub(crate) entries: Vec<Entry>,
}

pub(crate) struct DrawReport {
    pub(crate) preview: DrawPreview,
    pub(crate) result: Option<DrawResult>,
    pub(crate) history: DrawHistory,
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let report = execute_validate(&args, &config.giveaway)?;

    if let Some(path) = &args.export {
        let file = std::fs::File::create(path)?;
        write_entries_csv(file, &report.entries)?;
    }

    let listed: Vec<&Entry> = report
        .entries
        .iter()
        .filter(|entry| !args.failed_only || entry.status == EntryStatus::Failed)
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    println!("{} entry validation", config.giveaway.event_name);
    for entry in &listed {
        println!(
            "  [{}] {} ({}), friends: {}, length: {}",
            entry.status.label(),
            entry.display_name,
            entry.id,
            entry.tagged_friends.len(),
            entry.text_length
        );
        for reason in &entry.fail_reasons {
            println!("      - {reason}");
        }
    }

    let stats = report.summary.statistics;
    println!(
        "\n{} received, {} duplicates dropped, {} qualified, {} disqualified",
        report.summary.received, report.summary.duplicates_dropped, stats.qualified, stats.disqualified
    );
    if let Some(path) = &args.export {
        println!("Exported to {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_draw(args: DrawArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let report = execute_draw(&args, &config.giveaway)?;

    if let Some(path) = &args.history {
        if report.result.is_some() {
            std::fs::write(path, serde_json::to_string_pretty(&report.history)?)?;
        }
    }

    if args.json {
        let payload = serde_json::json!({
            "preview": report.preview,
            "result": report.result,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let preview = &report.preview;
    println!("{} draw", config.giveaway.event_name);
    println!(
        "  Pool: {} entries, {} previous winners excluded",
        preview.pool_size, preview.previous_winners
    );
    println!("  Seed: {}", preview.seed);

    match &report.result {
        Some(result) => {
            if let Some(winner) = result.winner() {
                println!("  Winner: {} ({})", winner.display_name, winner.id);
                println!("  Comment: {}", winner.comment_text);
            }
            if let Some(warning) = &preview.warning {
                println!("  Warning: {warning}");
            }
            println!(
                "  Recorded as {} by {} at {}",
                result.id(),
                result.drawn_by(),
                result.timestamp().to_rfc3339()
            );
            println!("  Re-run with --seed {} to reproduce this draw", result.seed());
        }
        None => println!("  No eligible entries left: everyone in the pool has already won"),
    }

    Ok(())
}

pub(crate) fn execute_validate(
    args: &ValidateArgs,
    config: &GiveawayConfig,
) -> Result<ValidationReport, AppError> {
    let service = build_service(&args.source, config, DrawHistory::new())?;
    let summary = service.import(load_entries(&args.source)?, ImportMode::Replace)?;
    let entries = service.entries()?;
    Ok(ValidationReport { summary, entries })
}

pub(crate) fn execute_draw(
    args: &DrawArgs,
    config: &GiveawayConfig,
) -> Result<DrawReport, AppError> {
    let history = match &args.history {
        Some(path) => load_history(path)?,
        None => DrawHistory::new(),
    };
    let service = build_service(&args.source, config, history)?;
    service.import(load_entries(&args.source)?, ImportMode::Replace)?;

    let preview = service.start_draw(args.seed.as_deref(), args.scope.into())?;
    let result = match preview.phase {
        DrawPhase::ResultWinner { .. } => {
            Some(service.confirm_draw(args.drawn_by.as_deref().unwrap_or_default())?)
        }
        _ => {
            service.discard_draw()?;
            None
        }
    };

    Ok(DrawReport {
        preview,
        result,
        history: service.history()?,
    })
}

fn build_service(
    source: &SourceArgs,
    config: &GiveawayConfig,
    history: DrawHistory,
) -> Result<GiveawayService<InMemoryGiveawayStore>, AppError> {
    let eligibility = config
        .eligibility
        .merge(&source.rules.patch())
        .map_err(ServiceError::from)?;
    let store = Arc::new(InMemoryGiveawayStore::with_history(eligibility, history));
    Ok(GiveawayService::new(store).with_default_drawn_by(config.drawn_by.clone()))
}

fn load_entries(source: &SourceArgs) -> Result<Vec<RawEntry>, AppError> {
    match (&source.sheet, &source.comments) {
        (Some(path), _) => Ok(SheetImporter::from_path(path)?),
        (None, Some(path)) => Ok(CommentImporter::from_path(path)?),
        (None, None) => Ok(Vec::new()),
    }
}

/// A missing file is an empty history, so the first draw can create it.
fn load_history(path: &Path) -> Result<DrawHistory, AppError> {
    if !path.exists() {
        return Ok(DrawHistory::new());
    }
    let raw = std::fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(DrawHistory::new());
    }
    Ok(serde_json::from_str(&raw)?)
}
