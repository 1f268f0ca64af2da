use clap::{CommandFactory, Parser};
use dga_detector::app::report::{self, BANNER};
use dga_detector::utils::error::ErrorSeverity;
use dga_detector::utils::{logger, validation::Validate};
use dga_detector::{
    BatchEngine, BatchPipeline, CliConfig, Detector, DetectorError, DetectorSettings,
    LocalStorage,
};

fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    if config.domain.is_none() && config.file.is_none() {
        println!("{}", BANNER);
        if let Err(e) = CliConfig::command().print_help() {
            tracing::error!("Failed to print help: {}", e);
        }
        return;
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ dga-detector failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn run(config: &CliConfig) -> Result<(), DetectorError> {
    let settings = DetectorSettings::from_cli(config)?;
    settings.validate()?;

    // The model must load before any domain is looked at.
    let detector = Detector::load(&settings)?;

    if let Some(domain) = &config.domain {
        let outcome = detector.check(domain);
        print!("{}", report::render_outcome(&outcome, &settings.heuristics));
    } else if let Some(file) = &config.file {
        let pipeline =
            BatchPipeline::new(LocalStorage::current_dir(), settings, detector, file.as_str());
        let summary = BatchEngine::new(pipeline).run()?;
        println!(
            "✅ {} domains classified, {} skipped, {} flagged as DGA",
            summary.processed, summary.skipped, summary.flagged
        );
        println!("📁 Output saved to: {}", summary.output_path);
    }

    Ok(())
}
