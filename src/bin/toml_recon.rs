use clap::Parser;
use payout_recon::core::format::render_summary;
use payout_recon::core::parser::parse;
use payout_recon::core::ConfigProvider;
use payout_recon::utils::error::ErrorSeverity;
use payout_recon::utils::{logger, validation::Validate};
use payout_recon::{EtlEngine, LocalStorage, ReconConfig, ReconPipeline};

#[derive(Parser)]
#[command(name = "toml-recon")]
#[command(about = "Payout reconciliation with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "recon-config.toml")]
    config: String,

    /// Override the input file from config
    #[arg(short, long)]
    input: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - preview the input without writing a report
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置（日誌格式由配置決定，先載入再初始化）
    let mut config = match ReconConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logging() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based reconciliation");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    // 命令列覆蓋設定
    if let Some(input) = args.input {
        tracing::info!("🔧 Input overridden to: {}", input);
        config.input.path = Some(input);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No report will be written");
        perform_dry_run(&config).await?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let currency_symbol = config.display.currency_symbol.clone();

    let storage = LocalStorage::new(".");
    let pipeline = ReconPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(outcome) => {
            println!("{}", render_summary(&outcome.report, &currency_symbol));
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

fn display_config_summary(config: &ReconConfig) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("  Input: {}", config.input_path());
    tracing::info!("  Delimiter: {:?}", config.delimiter());
    tracing::info!("  Output: {}/{}", config.output_path(), config.report_filename());
    tracing::info!("  Compression: {}", config.compression_enabled());
    tracing::info!(
        "  Retention: '{}' @ {}",
        config.retention.platform_keyword,
        config.retention.rate
    );
}

async fn perform_dry_run(config: &ReconConfig) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(config.input_path()).await?;
    let preview = parse(&content, config.delimiter());

    if preview.is_empty() {
        println!("❌ {} has no header or data lines", config.input_path());
        return Ok(());
    }

    println!("Columns ({}): {}", preview.headers.len(), preview.headers.join(" | "));
    for row in preview.rows.iter().take(config.display.preview_rows) {
        println!("  {}", row.join(" | "));
    }
    Ok(())
}
