use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tabstack::OutputFormat;
use tabstack::cli;
use tabstack::core::config::{self, CliOverrides};

#[derive(Parser)]
#[command(name = "tabstack", about = "Per-tab navigation histories behind one back stack")]
struct Args {
    /// Config file (default: ~/.tabstack/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tab to start on
    #[arg(short, long)]
    start: Option<String>,

    /// How to print the stack after each command
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Save a JSON transcript of the session here
    #[arg(long)]
    record: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, source) = config::load_config(args.config.as_deref())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            start: args.start.as_deref(),
            output: args.output,
        },
    );

    // Initialize file logger - stdout belongs to the command loop
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    // Config was read before the logger existed; report it now
    source.log();
    log::debug!("Config: {:?}", file_config);
    for warning in &resolved.warnings {
        log::warn!("{}", warning);
    }

    log::info!(
        "tabstack starting on {} with tabs {:?}",
        resolved.start_section,
        resolved.tabs.names()
    );

    cli::run(&resolved, args.script.as_deref(), args.record.as_deref())
}
