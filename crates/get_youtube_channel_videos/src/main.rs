mod config;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::error::ErrorKind;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use uploads_core::{
    export_channel, ExportError, ExportOptions, ExportOutcome, ExportResult, NotFoundStage,
    PageProgress, FIELDNAMES,
};

use config::{Settings, API_KEY_VAR};

const EXAMPLES: &str = "Examples:
  get-youtube-channel-videos DisneyMusicVEVO
  get-youtube-channel-videos @DisneyMusicVEVO
  get-youtube-channel-videos 'UC...' (channel ID)";

/// Exit status for not-found and failed runs under `--strict`.
const STRICT_FAILURE: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Export every upload of a YouTube channel to CSV",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Channel ID (UC...), legacy username, @handle or channel URL
    channel: String,

    /// Output CSV path (default: <channel>_videos.csv)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = 30)]
    timeout: u64,

    /// Exit non-zero when the channel is not found or the export fails
    #[arg(long = "strict")]
    strict: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => {
                    eprintln!("\n{EXAMPLES}");
                    ExitCode::from(1)
                }
            };
        }
    };

    if let Err(err) = init_logging() {
        eprintln!("{err}");
    }

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{} {err}", style("Error:").for_stderr().red().bold());
            eprintln!("Please set it with: export {API_KEY_VAR}='your_api_key_here'");
            return ExitCode::from(1);
        }
    };

    println!(
        "{} {}",
        style("Fetching videos for channel:").cyan(),
        cli.channel
    );

    let spinner = progress_spinner();
    let result = run(&cli, settings, &spinner);
    spinner.finish_and_clear();

    let failure = if cli.strict {
        ExitCode::from(STRICT_FAILURE)
    } else {
        ExitCode::SUCCESS
    };

    match result {
        Ok(ExportOutcome::Exported(result)) => {
            print_summary(&result);
            ExitCode::SUCCESS
        }
        Ok(ExportOutcome::ChannelNotFound { reference, stage }) => {
            let message = match stage {
                NotFoundStage::Resolution => format!("Could not find channel: {reference}"),
                NotFoundStage::Details => "Channel not found".to_string(),
            };
            println!("{}", style(message).yellow());
            failure
        }
        Err(err) => {
            error!(error = %err, "export failed");
            let label = if err.is_platform() {
                "An HTTP error occurred:"
            } else {
                "An error occurred:"
            };
            println!("{} {err}", style(label).red());
            failure
        }
    }
}

fn run(cli: &Cli, settings: Settings, spinner: &ProgressBar) -> Result<ExportOutcome, ExportError> {
    let bar = spinner.clone();
    let options = ExportOptions {
        channel: cli.channel.clone(),
        csv_path: cli.output.clone(),
        api_key: settings.api_key,
        timeout_secs: cli.timeout.max(1),
        base_url: settings.base_url,
        extra_headers: Default::default(),
        progress_callback: Some(Arc::new(move |progress: PageProgress| {
            bar.set_message(format!("Fetched {} videos so far...", progress.fetched));
        })),
    };
    export_channel(options)
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to initialise logging: {err}"))
}

fn progress_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    match ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        Ok(style) => spinner.set_style(style),
        Err(err) => warn!(error = %err, "invalid spinner template"),
    }
    spinner.set_message("Resolving channel...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

fn print_summary(result: &ExportResult) {
    if let Some(title) = &result.resolved.title {
        println!("{} {title}", style("Found channel:").green());
    }
    println!(
        "{} {}",
        style("Fetched videos from:").green().bold(),
        result.channel.title
    );
    println!(
        "{} {} videos to {}",
        style("Successfully saved").green(),
        result.records.len(),
        result.csv_path.display()
    );
    println!("{} {}", style("CSV columns:").dim(), FIELDNAMES.join(", "));
}
