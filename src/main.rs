use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use meter_ai_common::progress::TICK_MILLIS;
use meter_ai_common::{types, AnalysisProgress, MeterSession, Phase};
use meter_ai_rust::{api, cli, config, error, review};
use std::path::PathBuf;

use cli::{Cli, Commands};
use config::Config;
use error::{MeterAiError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Read { photo, manual, yes } => {
            run_read(&config, photo, manual, yes, cli.verbose).await?;
        }

        Commands::Submit { reading } => {
            run_submit(&config, &reading, cli.verbose).await?;
        }

        Commands::Config {
            set_upload_url,
            set_submit_url,
            show,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(url) = set_upload_url {
                config.upload_url = Some(url);
                changed = true;
            }
            if let Some(url) = set_submit_url {
                config.submit_url = Some(url);
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!(
                    "  解析Webhook: {}",
                    config.upload_url.as_deref().unwrap_or("未設定")
                );
                println!(
                    "  送信Webhook: {}",
                    config.submit_url.as_deref().unwrap_or("未設定")
                );
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}

async fn run_read(
    config: &Config,
    photo: Option<PathBuf>,
    manual: bool,
    yes: bool,
    verbose: bool,
) -> Result<()> {
    println!("💧 meter-ai - 検針値読み取り\n");

    let client = api::WebhookClient::new(config)?;
    let mut session = MeterSession::new();

    if manual {
        session.enter_manual_mode()?;
        review::prompt_manual_reading(&mut session)?;
    } else {
        let photo = photo
            .ok_or_else(|| MeterAiError::Config("写真のパスを指定してください".into()))?;

        // 1. 画像読み込み
        println!("[1/3] 画像を読み込み中...");
        let file_name = photo
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| {
                MeterAiError::Config(format!("不正なファイルパス: {}", photo.display()))
            })?;
        let content_type = types::mime_for_file_name(&file_name)
            .ok_or_else(|| meter_ai_common::Error::Selection(file_name.clone()))?;
        session.select_image(&file_name, content_type)?;
        let bytes = std::fs::read(&photo)?;
        println!("✔ {} ({} bytes)\n", file_name, bytes.len());

        // 2. AI解析
        println!("[2/3] AI解析中...");
        let token = session.begin_analysis()?;
        let pb = analysis_progress_bar();
        let ticker = spawn_progress_ticker(pb.clone());

        let outcome = client.analyze_image(&file_name, content_type, bytes).await;

        // レスポンス到着: 100%へスナップしてから消す
        ticker.abort();
        pb.set_position(100);
        pb.finish_and_clear();

        session.complete_analysis(token, outcome);

        if let Some(err) = session.error().cloned() {
            eprintln!("✖ {}\n", err.user_message());
            if !review::confirm_manual_fallback()? {
                return Err(err.into());
            }
            session.enter_manual_mode()?;
            review::prompt_manual_reading(&mut session)?;
        } else {
            println!("✔ 解析完了\n");
            review::review_detected_reading(&mut session, yes)?;
        }
    }

    // 3. 送信
    println!("\n[3/3] 検針値を送信中...");
    submit_session(&client, &mut session, verbose, !yes).await?;

    println!("\n✅ 送信完了");
    Ok(())
}

async fn run_submit(config: &Config, reading: &str, verbose: bool) -> Result<()> {
    println!("💧 meter-ai - 検針値送信\n");

    let client = api::WebhookClient::new(config)?;
    let mut session = MeterSession::new();
    session.enter_manual_mode()?;
    session.set_manual_reading(reading);

    if !session.manual_reading_valid() {
        return Err(MeterAiError::InvalidReading);
    }

    submit_session(&client, &mut session, verbose, true).await?;

    println!("\n✅ 送信完了");
    Ok(())
}

/// 送信と失敗時の再送ループ
///
/// 失敗してもセッションが入力値を保持しているため、
/// 再送時は同一のペイロードが再構築される。
async fn submit_session(
    client: &api::WebhookClient,
    session: &mut MeterSession,
    verbose: bool,
    interactive: bool,
) -> Result<()> {
    loop {
        let timestamp = chrono::Utc::now().to_rfc3339();
        let (token, payload) = session.begin_submission(&timestamp)?;

        if verbose {
            println!("送信ペイロード: {}", serde_json::to_string(&payload)?);
        }

        let outcome = client.submit_reading(&payload).await;
        session.complete_submission(token, outcome);

        if session.phase() == Phase::Submitted {
            let source = if payload.is_automatic_reading {
                "自動読み取り"
            } else {
                "手入力"
            };
            println!("✔ 送信成功: {} ({})", payload.reading, source);
            return Ok(());
        }

        let err = session
            .error()
            .cloned()
            .unwrap_or(meter_ai_common::Error::SubmissionHttp(0));
        eprintln!("✖ {}", err.user_message());

        if !interactive || !review::confirm_retry()? {
            return Err(err.into());
        }
    }
}

fn analysis_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}%")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

fn spawn_progress_ticker(pb: ProgressBar) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut model = AnalysisProgress::new();
        let mut interval =
            tokio::time::interval(std::time::Duration::from_millis(TICK_MILLIS as u64));
        loop {
            interval.tick().await;
            model.tick();
            pb.set_position(model.value() as u64);
        }
    })
}
