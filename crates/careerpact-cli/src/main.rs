//! careerpact - マッチングから完了までを一通り流すデモ CLI
//!
//! 1. プロフィール保存
//! 2. タスク取り込み（`--tasks` の JSON、なければサンプル 2 件）
//! 3. 提示 → 先頭を受諾 → 完了 → バッジ発行
//! 4. 進捗とバッジの集計を JSON で出力

use anyhow::{Context, Result, bail};
use chrono::{Duration, Utc};
use clap::{Parser, ValueEnum};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

use careerpact_core::config::{EngineConfig, LogFormat};
use careerpact_core::domain::{
    ContactMethod, SkillType, TaskDraft, TaskStatus, UserProfile, WorkerId,
};
use careerpact_core::observability::init_logging;
use careerpact_core::{App, AppBuilder};

#[derive(Parser, Debug)]
#[command(name = "careerpact")]
#[command(about = "CareerPact task matching engine demo")]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides logging.format from the config
    #[arg(long, value_enum)]
    log_format: Option<CliLogFormat>,

    #[arg(short, long, default_value = "user_1")]
    worker: String,

    /// JSON array of task drafts
    #[arg(short, long)]
    tasks: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogFormat {
    Pretty,
    Json,
}

impl From<CliLogFormat> for LogFormat {
    fn from(format: CliLogFormat) -> Self {
        match format {
            CliLogFormat::Pretty => LogFormat::Pretty,
            CliLogFormat::Json => LogFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // (A) 設定とログ
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(format) = cli.log_format {
        config.logging.format = format.into();
    }
    init_logging(&config.logging).context("initializing logging")?;

    // (B) App を組み立てる（in-memory ストア + SystemClock）
    let app = AppBuilder::new().config(config).build()?;

    // (C) プロフィールとタスク
    let worker = WorkerId::new(cli.worker);
    app.save_profile(&worker, sample_profile()).await?;

    let drafts = match &cli.tasks {
        Some(path) => read_drafts(path)?,
        None => sample_drafts(),
    };
    for draft in drafts {
        app.ingest_task(draft).await?;
    }

    // (D) 提示 → 受諾 → 完了
    run_scenario(&app, &worker).await
}

async fn run_scenario(app: &App, worker: &WorkerId) -> Result<()> {
    let offers = app.offers(worker).await?;
    print_json("offers", json!(offers))?;

    let Some(top) = offers.first() else {
        bail!("no offers for worker {worker}");
    };

    let accepted = app.accept(worker, &top.id).await?;
    info!(task_id = %accepted.id, "accepted top offer");
    print_json("accepted", json!(accepted))?;

    let outcome = app
        .transition(worker, &accepted.id, TaskStatus::Completed)
        .await?;
    print_json("completed", json!(outcome))?;

    if let Some(badge) = &outcome.badge {
        println!("{}", badge.certificate_text());
    }

    print_json("badges", json!(app.badges().await?))?;
    print_json("progress", json!(app.progress(worker).await?))?;
    print_json("badge_summary", json!(app.badge_summary().await?))?;
    Ok(())
}

fn print_json(label: &str, value: serde_json::Value) -> Result<()> {
    let body = serde_json::to_string_pretty(&json!({ label: value }))?;
    println!("{body}");
    Ok(())
}

fn read_drafts(path: &Path) -> Result<Vec<TaskDraft>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading tasks {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing tasks {}", path.display()))
}

fn sample_profile() -> UserProfile {
    UserProfile::new([SkillType::Writing], 3, ContactMethod::Slack)
        .with_days(["月", "水", "金"])
        .with_time_slots(["10:00-12:00", "14:00-16:00"])
}

// 締切はデモ実行時点から数えて未来に置く
fn sample_drafts() -> Vec<TaskDraft> {
    let now = Utc::now();
    vec![
        TaskDraft::new(
            "商品説明文の作成",
            now + Duration::days(14),
            1.5,
            [SkillType::Writing],
            1,
        )
        .with_id("task_1")
        .with_description("ECサイトの新商品5点について、魅力的な商品説明文を作成してください。"),
        TaskDraft::new(
            "顧客データの入力",
            now + Duration::days(11),
            1.0,
            [SkillType::DataEntry],
            2,
        )
        .with_id("task_2")
        .with_description("紙の申込書から顧客情報をスプレッドシートに入力してください。"),
    ]
}
