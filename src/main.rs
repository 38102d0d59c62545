use clap::Parser;
use dialoguer::{Confirm, Input};
use safe_street::{cli, config, error, logging, report, workflow};
use safe_street_common::native::ReqwestTransport;
use safe_street_common::{AnalysisResult, ReportView};
use cli::{Cli, Commands};
use config::Config;
use error::{Result, SafeStreetError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("{e}");
    }

    if let Err(e) = run(cli).await {
        match e {
            SafeStreetError::Alert(alert) => eprintln!("\n{}", report::render_alert(&alert)),
            other => eprintln!("\n❌ {}", other),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, email, json } => {
            let mut api = config.api_config();
            if email.is_some() {
                api.email = email;
            }

            let session = workflow::new_session(api)?;
            workflow::pick_path(&session, &image)?;
            if !json {
                println!("📸 {}", image.display());
            }

            let result = workflow::analyze_picked(&session).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_report(&result);
            }
        }

        Commands::Interactive => {
            run_interactive(&config).await?;
        }

        Commands::Health => {
            let api = config.api_config();
            println!("🔌 {}", api.health_url());
            let transport = ReqwestTransport::new()?;
            match transport.check_health(&api).await {
                Ok(message) => println!("✔ {}", message),
                Err(err) => return Err(err.alert().into()),
            }
        }

        Commands::Config { show, set_base_url, set_endpoint, set_field, set_email } => {
            let mut config = config;
            let changed = set_base_url.is_some()
                || set_endpoint.is_some()
                || set_field.is_some()
                || set_email.is_some();

            if let Some(url) = set_base_url {
                config.base_url = Some(url.trim_end_matches('/').to_string());
            }
            if let Some(endpoint) = set_endpoint {
                config.endpoint = Some(endpoint);
            }
            if let Some(field) = set_field {
                config.field_name = Some(field);
            }
            if let Some(email) = set_email {
                config.email = Some(email).filter(|e| !e.is_empty());
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                let api = config.api_config();
                println!("設定:");
                println!("  ベースURL: {}", api.base_url);
                println!("  エンドポイント: {}", api.endpoint);
                println!("  フィールド名: {}", api.field_name);
                println!("  レポート送信先: {}", api.email.as_deref().unwrap_or("未設定"));
            }
        }
    }

    Ok(())
}

fn print_report(result: &AnalysisResult) {
    let analyzed_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let color = report::wants_color(&std::io::stdout());
    println!("\n{}", report::render_report(&ReportView::from(result), &analyzed_at, color));
}

/// 対話モード: 選択 → 解析 → 表示 → リセットを繰り返す
async fn run_interactive(config: &Config) -> Result<()> {
    let session = workflow::new_session(config.api_config())?;
    println!("🛣  Safe Street - 道路損傷解析 ({})\n", session.config().analyze_url());

    loop {
        let path: String = Input::new()
            .with_prompt("画像ファイルのパス（空で終了）")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| SafeStreetError::Prompt(e.to_string()))?;
        let path = path.trim();
        if path.is_empty() {
            break;
        }

        if let Err(e) = workflow::pick_path(&session, path) {
            print_error(e);
            continue;
        }

        // 失敗時は画像を保持したまま再試行できる
        loop {
            match workflow::analyze_picked(&session).await {
                Ok(result) => {
                    print_report(&result);
                    break;
                }
                Err(e) => {
                    print_error(e);
                    if !confirm("同じ画像で再試行しますか？")? {
                        session.remove();
                        break;
                    }
                }
            }
        }

        if session.state().result().is_some() {
            if !confirm("別の写真を解析しますか？")? {
                break;
            }
            session.reset();
        }
    }

    println!("\n✅ 終了");
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| SafeStreetError::Prompt(e.to_string()))
}

fn print_error(e: SafeStreetError) {
    match e {
        SafeStreetError::Alert(alert) => eprintln!("{}\n", report::render_alert(&alert)),
        other => eprintln!("❌ {}\n", other),
    }
}
