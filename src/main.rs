use anyhow::Context;
use clap::Parser;
use santa_engine::api::handler::execute_request;
use santa_engine::api::{AssignmentDto, ErrorResponse};
use santa_engine::utils::error::ErrorSeverity;
use santa_engine::utils::logger;
use santa_engine::{CliConfig, SecretSantaService};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入並驗證配置
    let settings = match cli.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("Starting santa CLI");
    tracing::debug!("Settings: {:?}", settings);

    let store = Arc::new(settings.store());
    let service = SecretSantaService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::new(settings.strategy()),
    );

    match execute_request(&service, &settings.request()).await {
        Ok(assignments) => {
            let dtos: Vec<AssignmentDto> = assignments.iter().map(AssignmentDto::from).collect();
            let output =
                serde_json::to_string_pretty(&dtos).context("failed to render assignments")?;
            println!("{}", output);

            if settings.dry_run {
                tracing::info!("🔍 Dry run: nothing was saved");
            } else {
                tracing::info!(
                    "📁 Assignments saved to: {}",
                    store.assignments_path().display()
                );
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Assignment generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            let (_, body) = ErrorResponse::from_error(&e);
            let output =
                serde_json::to_string_pretty(&body).context("failed to render error response")?;
            eprintln!("{}", output);

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
