use clap::Parser;
use payout_recon::core::format::{render_summary, DEFAULT_CURRENCY_SYMBOL};
use payout_recon::utils::error::ErrorSeverity;
use payout_recon::utils::{logger, validation::Validate};
use payout_recon::{CliConfig, EtlEngine, LocalStorage, ReconPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting payout-recon CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 輸入與輸出路徑皆相對於目前目錄
    let storage = LocalStorage::new(".");
    let pipeline = ReconPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(outcome) => {
            println!("{}", render_summary(&outcome.report, DEFAULT_CURRENCY_SYMBOL));
            println!("✅ Reconciliation completed");
            println!("📁 Report saved to: {}", outcome.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Reconciliation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

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
