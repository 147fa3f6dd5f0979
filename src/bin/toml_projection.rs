use clap::Parser;
use volume_projection::core::charts::render_text;
use volume_projection::core::ConfigProvider;
use volume_projection::utils::{logger, validation::Validate};
use volume_projection::{LocalStorage, ReportPipeline, ReportRunner, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-projection")]
#[command(about = "Volume projection driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "projection.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the seasonality percentage from config
    #[arg(long, allow_negative_numbers = true)]
    seasonality: Option<i32>,

    /// Skip the trend adjustment regardless of config
    #[arg(long)]
    no_trend: bool,

    /// Drop outlier volumes regardless of config
    #[arg(long)]
    ignore_outliers: bool,

    /// Dry run - show the input and the projection without writing files
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(
        args.verbose || config.verbose_logging(),
        config.json_logging(),
    );
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(seasonality) = args.seasonality {
        config.adjustments.seasonality_pct = Some(seasonality);
        tracing::info!("🔧 Seasonality overridden to: {}%", seasonality);
    }
    if args.no_trend {
        config.adjustments.apply_trend = Some(false);
        tracing::info!("🔧 Trend adjustment disabled");
    }
    if args.ignore_outliers {
        config.adjustments.ignore_outliers = Some(true);
        tracing::info!("🔧 Outlier filtering enabled");
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = ReportPipeline::new(storage, config);
    let runner = ReportRunner::new(pipeline);

    match runner.run().await {
        Ok(outcome) => {
            match &outcome.report.result {
                Some(projection) => {
                    println!(
                        "Adjusted daily average volume (last months): {}",
                        projection.daily_average
                    );
                    println!(
                        "Adjusted volume projection for next month: {}",
                        projection.next_month_total
                    );
                }
                None => {
                    if let Some(warning) = &outcome.report.warning {
                        eprintln!("⚠️  {}", warning);
                    }
                }
            }
            println!("📁 Report saved to: {}", outcome.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Projection failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let adjustments = config.adjustments();

    println!("📋 Configuration Summary:");
    println!("  Projection: {}", config.projection.name);
    if let Some(description) = &config.projection.description {
        println!("  Description: {}", description);
    }
    if let Some(file) = &config.projection.samples_file {
        println!("  Samples file: {}", file);
    } else {
        println!("  Months: {}", config.months.len());
    }
    println!("  Next month working days: {}", config.next_month.working_days);
    println!("  Seasonality: {}%", adjustments.seasonality_pct);
    println!("  Trend: {}", adjustments.apply_trend);
    println!("  Ignore outliers: {}", adjustments.ignore_outliers);
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output.output_formats.join(", "));

    let compression = config.compression();
    if compression.enabled {
        println!("  Compression: {} (ZIP)", compression.filename);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let input = config.projection_input()?;

    println!("🔍 Dry Run Analysis:");
    for (i, sample) in input.samples.iter().enumerate() {
        println!(
            "  {}: volume {} over {} working days",
            input.month_label(i),
            sample.volume,
            sample.working_days
        );
    }
    println!();

    match input.project() {
        Some(projection) => {
            println!("  Daily average: {}", projection.daily_average);
            println!("  Next month total: {}", projection.next_month_total);
            let report = volume_projection::core::report::build_report(input);
            for series in &report.charts {
                println!();
                println!("{}", render_text(series, 40));
            }
        }
        None => println!("  ⚠️  {}", volume_projection::domain::model::INSUFFICIENT_DATA_WARNING),
    }

    println!();
    println!("✅ Dry run complete. No files were written.");
    Ok(())
}
