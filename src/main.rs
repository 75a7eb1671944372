use anyhow::Context;
use catalog_sync::utils::error::{ErrorSeverity, SyncError};
use catalog_sync::utils::logger;
use catalog_sync::CliConfig;
use clap::Parser;

fn exit_with(e: &SyncError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, cli.log_format);

    tracing::info!("🚀 Starting catalog-sync");
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    if settings.dry_run {
        tracing::info!("🔍 DRY RUN MODE - catalogs will not be rewritten");
    }

    let report = catalog_sync::core::run(&settings);
    report.log_summary();

    if let Some(path) = &cli.report {
        report
            .write_to(path)
            .with_context(|| format!("run report {}", path.display()))?;
    }

    // 個別領域失敗不影響退出碼
    println!(
        "✅ Context status update completed! ({}/{} domains)",
        report.succeeded(),
        report.outcomes.len()
    );

    Ok(())
}
