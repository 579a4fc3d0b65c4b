use clap::Parser;
use fareadmin::core::config::{AdminConfig, CliOverrides, ConfigSource, load_config, resolve};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fareadmin", about = "Terminal console for airport base prices")]
struct Args {
    /// Base URL of the fare API (overrides config and FAREADMIN_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Rows per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Log file path
    #[arg(long, default_value = "fareadmin.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger. Everything is accepted until the configured
    // level is known; config loading logs through it.
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    }

    let config = match load_config() {
        Ok((config, ConfigSource::File(path))) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Ok((config, ConfigSource::Template(path))) => {
            log::info!("No config found, wrote a template to {}", path.display());
            config
        }
        Ok((config, ConfigSource::BuiltIn)) => {
            log::info!("No config file, using built-in defaults");
            config
        }
        Err(e) => {
            log::warn!("Config error, using defaults: {}", e);
            AdminConfig::default()
        }
    };
    let cli = CliOverrides {
        base_url: args.base_url,
        page_size: args.page_size,
    };
    let resolved = resolve(&config, &cli);

    let level = resolved.log_level.parse::<LevelFilter>().unwrap_or_else(|_| {
        log::warn!("Unknown log level {:?}, using debug", resolved.log_level);
        LevelFilter::Debug
    });
    log::set_max_level(level);

    log::info!(
        "fareadmin starting up against {} (page size {})",
        resolved.base_url,
        resolved.page_size
    );

    fareadmin::tui::run(resolved)
}
