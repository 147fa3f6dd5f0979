use clap::Parser;
use volume_projection::core::charts::render_text;
use volume_projection::core::explain::methodology;
use volume_projection::utils::{logger, validation::Validate};
use volume_projection::{CliConfig, LocalStorage, ReportPipeline, ReportRunner, RunOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting volume-projection CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if config.explain {
        println!("{}", methodology());
        return Ok(());
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let chart_width = config.chart_width;
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = ReportPipeline::new(storage, config);
    let runner = ReportRunner::new(pipeline);

    match runner.run().await {
        Ok(outcome) => print_outcome(&outcome, chart_width),
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

fn print_outcome(outcome: &RunOutcome, chart_width: usize) {
    let report = &outcome.report;
    match &report.result {
        Some(projection) => {
            println!(
                "Adjusted daily average volume (last months): {}",
                projection.daily_average
            );
            println!(
                "Adjusted volume projection for next month: {}",
                projection.next_month_total
            );
            for series in &report.charts {
                println!();
                println!("{}", render_text(series, chart_width));
            }
        }
        None => {
            if let Some(warning) = &report.warning {
                eprintln!("⚠️  {}", warning);
            }
        }
    }
    println!();
    println!("📁 Report saved to: {}", outcome.output_path);
}
