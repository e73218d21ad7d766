use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;

use tsa::report::{self, Format};
use tsa::{App, PluginSettings, Settings};

#[derive(Parser, Debug)]
#[command(name = "tsa", version)]
#[command(about = "Runs a time-series analysis over a window fetched from a plugin")]
struct Args {
    /// Time to start computing stats. Relative to --until (e.g. "2h") or
    /// absolute (RFC 3339). Defaults to one hour before --until
    #[arg(long)]
    since: Option<String>,

    /// Time to stop computing stats. "now" (default), relative to now, or
    /// absolute (RFC 3339)
    #[arg(long)]
    until: Option<String>,

    /// Interval between each data point. Defaults to the larger of 1000
    /// points total, or 30
    #[arg(long)]
    step: Option<String>,

    /// Merge all labeled series into a single summary
    #[arg(long)]
    aggregate: bool,

    /// Report each labeled series separately, even if the config file
    /// enables aggregate mode
    #[arg(long, conflicts_with = "aggregate")]
    no_aggregate: bool,

    /// Read the plugin result from a JSON file ("-" for stdin)
    #[arg(short, long, conflicts_with = "exec")]
    file: Option<PathBuf>,

    /// Run a program as the plugin; it receives --start/--end/--step and
    /// prints JSON on stdout
    #[arg(short, long)]
    exec: Option<String>,

    /// Extra argument passed to the --exec program (repeatable)
    #[arg(short = 'a', long = "arg", requires = "exec", allow_hyphen_values = true)]
    args: Vec<String>,

    /// Config file with default options (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Give up on the plugin after this long (e.g. "30s")
    #[arg(long)]
    timeout: Option<String>,

    /// Print summaries as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Overlay command-line flags on top of loaded settings.
    fn apply(self, settings: &mut Settings) {
        if self.since.is_some() {
            settings.since = self.since;
        }
        if self.until.is_some() {
            settings.until = self.until;
        }
        if self.step.is_some() {
            settings.step = self.step;
        }
        if self.timeout.is_some() {
            settings.timeout = self.timeout;
        }
        if self.aggregate {
            settings.aggregate = true;
        } else if self.no_aggregate {
            settings.aggregate = false;
        }

        // A plugin chosen on the command line replaces the configured one
        if self.file.is_some() || self.exec.is_some() {
            settings.plugin = PluginSettings {
                file: self.file,
                exec: self.exec,
                args: self.args,
            };
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let format = if args.json { Format::Json } else { Format::Text };

    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);

    let app = App::from_settings(&settings)?;

    // Single fetch, no background work
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let summaries = rt.block_on(app.run())?;

    let mut stdout = io::stdout().lock();
    for line in report::render(&summaries, format)? {
        writeln!(stdout, "{}", line)?;
    }
    Ok(())
}
