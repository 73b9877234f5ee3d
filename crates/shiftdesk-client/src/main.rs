use std::path::PathBuf;
use std::process;

use clap::Parser;

mod api_client;
mod commands;
mod config;
mod error;
mod logging;
mod render;
mod source;
mod tui;

use config::{Config, SourceConfig};
use render::Render;
use shiftdesk_common::feed::{ShiftQuery, SortOrder, MAX_PAGE_SIZE};

const HELP_TEXT: &str = r#"
  Usage
    $ sd [<options> ...]

    Options
        none             Browse shifts interactively
      --list, -l         Print the first page of shifts and exit
      --role, -r         Only show shifts for a role
      --hide-booked, -b  Hide fully booked shifts
      --latest-first     Show the latest shifts first
      --source-file      Read shifts from a JSON file
      --server-url       Read shifts from a shiftdesk server
      --page-size        Shifts per page
      --help, -h         Display help message
      --version, -v      Display installed version

    Examples
      $ sd
      $ sd --list --role nurse
      $ sd --server-url http://localhost:8080
      $ sd --source-file ./shifts.json --hide-booked
"#;

#[derive(Parser)]
#[command(
    name = "sd",
    version = env!("CARGO_PKG_VERSION"),
    about = "Browse and review published shifts from the terminal",
    after_help = HELP_TEXT
)]
struct Cli {
    /// Print the first page of shifts and exit
    #[arg(short = 'l', long)]
    list: bool,

    /// Only show shifts for this role
    #[arg(short = 'r', long, value_name = "ROLE")]
    role: Option<String>,

    /// Hide fully booked shifts
    #[arg(short = 'b', long = "hide-booked")]
    hide_booked: bool,

    /// Show the latest shifts first
    #[arg(long = "latest-first")]
    latest_first: bool,

    /// Read shifts from a JSON file
    #[arg(long = "source-file", value_name = "PATH", conflicts_with = "server_url")]
    source_file: Option<PathBuf>,

    /// Read shifts from a shiftdesk server
    #[arg(long = "server-url", value_name = "URL")]
    server_url: Option<String>,

    /// Shifts per page
    #[arg(long = "page-size", value_name = "N", value_parser = clap::value_parser!(u16).range(1..=MAX_PAGE_SIZE as i64))]
    page_size: Option<u16>,
}

impl Cli {
    /// Command line flags win over the config file
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref path) = self.source_file {
            config.source = SourceConfig::Local {
                path: Some(path.display().to_string()),
            };
        }
        if let Some(ref url) = self.server_url {
            config.source = SourceConfig::Remote {
                server_url: url.clone(),
            };
        }
        if let Some(page_size) = self.page_size {
            config.page_size = usize::from(page_size);
        }
    }

    fn query(&self) -> ShiftQuery {
        ShiftQuery {
            role: self.role.clone(),
            hide_fully_booked: self.hide_booked,
            order: if self.latest_first {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let mut config = Config::load_or_default();
    cli.apply_overrides(&mut config);

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), list = cli.list, "starting shiftdesk");

    let source = match source::from_config(&config.source) {
        Ok(source) => source,
        Err(e) => {
            Render.fetch_failed(&e.to_string());
            process::exit(1);
        }
    };

    let query = cli.query();
    if cli.list {
        if let Err(e) = commands::list(&config, source, &query) {
            Render.fetch_failed(&e.to_string());
            process::exit(1);
        }
    } else if let Err(e) = tui::run(config, source, query) {
        eprintln!("TUI error: {}", e);
        process::exit(1);
    }
}
