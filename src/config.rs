use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::api::ApiConfig;

#[derive(Debug, Parser)]
#[command(name = "feather", version, about = "Browse game download feeds and open their magnet links")]
pub struct Cli {
    /// File with one source URL per line
    #[arg(long, env = "FEATHER_SOURCES", default_value = "urls.txt")]
    pub sources: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, env = "FEATHER_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,

    /// SteamGridDB API key; cover art is skipped without one
    #[arg(long, env = "STEAMGRIDDB_API_KEY", hide_env_values = true)]
    pub steamgrid_key: Option<String>,

    #[arg(
        long,
        env = "STEAMGRIDDB_API_URL",
        default_value = "https://www.steamgriddb.com/api/v2"
    )]
    pub steamgrid_url: String,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Subcommand)]
pub enum Mode {
    /// Full desktop browser with cover art (default)
    #[default]
    Desktop,
    /// Search bar and list in a single window
    Simple,
    /// Text menu on the terminal
    Console,
}

impl Mode {
    /// Filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(self) -> &'static str {
        match self {
            Mode::Console => "feather=warn",
            Mode::Desktop | Mode::Simple => "feather=info",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub mode: Mode,
    pub sources: PathBuf,
    pub api: ApiConfig,
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Self {
            mode: cli.mode.unwrap_or_default(),
            sources: cli.sources,
            api: ApiConfig {
                timeout: Duration::from_secs(cli.timeout),
                steamgrid_base_url: cli.steamgrid_url,
                steamgrid_api_key: cli.steamgrid_key,
            },
        }
    }
}
