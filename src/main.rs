use charla::core::config;
use charla::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "charla", about = "Cliente de chat con IA para la terminal")]
struct Args {
    /// Backend base URL (overrides config file and CHARLA_BACKEND_URL)
    #[arg(short, long)]
    backend_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to charla.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("charla.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Could not load config file: {}. Using defaults.", e);
            config::CharlaConfig::default()
        }
    };
    let resolved = config::resolve(&file_config, args.backend_url.as_deref());
    log::info!("Charla starting up against {}", resolved.backend_url);

    tui::run(resolved)
}
