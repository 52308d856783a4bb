use clap::Parser;
use domain_classifier::config::toml_config::TomlConfig;
use domain_classifier::core::ConfigProvider;
use domain_classifier::utils::error::ErrorSeverity;
use domain_classifier::utils::{logger, validation::Validate};
use domain_classifier::{ClassificationPipeline, EtlEngine, LocalStorage};

#[derive(Parser)]
#[command(name = "toml-classify")]
#[command(about = "Domain classification driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "classifier.toml")]
    config: String,

    /// Override the dataset path from config
    #[arg(long)]
    data_file: Option<String>,

    /// Override strict mode from config
    #[arg(long)]
    strict: Option<bool>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(data_file) = args.data_file.clone() {
        tracing::info!("🔧 Data file overridden to: {}", data_file);
        config.source.data_file = Some(data_file);
    }
    if let Some(strict) = args.strict {
        tracing::info!("🔧 Strict mode overridden to: {}", strict);
        config.classifier.strict = Some(strict);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        println!("🔍 Dry run complete. Remove --dry-run to classify.");
        return Ok(());
    }

    let storage = LocalStorage::new(".");
    let pipeline = ClassificationPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            println!("Most likely domain overall: {}", summary.report.overall);
            for path in &summary.written {
                println!("📁 Report saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Classification failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name,
        config.pipeline.version.as_deref().unwrap_or("0")
    );
    if let Some(description) = &config.pipeline.description {
        println!("  Description: {}", description);
    }
    println!("  Data file: {}", config.data_file());
    println!("  Keyword file: {}", config.keyword_file());
    println!(
        "  Fields: {} / {}",
        config.category_field(),
        config.keywords_field()
    );
    println!("  Text column: {}", config.text_column());
    println!("  Trim keywords: {}", config.trim_keywords());
    println!("  Strict: {}", config.strict());
    match config.output_path() {
        Some(path) => println!(
            "  Output: {} ({})",
            path,
            config.output_formats().join(", ")
        ),
        None => println!("  Output: stdout only"),
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
