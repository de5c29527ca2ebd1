//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use meetdash_core::{OutputFormat, Scope};

/// meetdash - your meeting dashboard at the command line
#[derive(Debug, Parser)]
#[command(name = "meetdash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "MEETDASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Base URL of the meeting service
    #[arg(long, env = "MEETDASH_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long)]
    pub timeout: Option<u64>,

    // --- View scope flags (default scope: upcoming) ---
    /// Show only today's meetings
    #[arg(long, group = "scope")]
    pub today: bool,

    /// Show this week's meetings
    #[arg(long, group = "scope")]
    pub week: bool,

    /// Show past meetings
    #[arg(long, group = "scope")]
    pub past: bool,

    /// Drop meetings that have already started
    #[arg(long)]
    pub hide_past: bool,

    // --- Display options ---
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Maximum topic length (truncated with ellipsis)
    #[arg(long)]
    pub max_topic_length: Option<usize>,

    /// Expand a day group by its label (can be repeated)
    #[arg(long, action = clap::ArgAction::Append)]
    pub expand: Vec<String>,

    /// Expand every day group
    #[arg(long)]
    pub expand_all: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the view scope selected by flags.
    pub fn scope(&self) -> Scope {
        if self.today {
            Scope::Today
        } else if self.week {
            Scope::Week
        } else if self.past {
            Scope::Past
        } else {
            Scope::Upcoming
        }
    }

    /// Returns the output format selected by flags.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Tty
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "MEETDASH_PASSWORD", hide_env_values = true)]
        password: String,

        /// Country id from `meetdash countries`
        #[arg(long)]
        country_id: Option<i64>,

        /// State id from `meetdash countries`
        #[arg(long)]
        state_id: Option<i64>,
    },

    /// Create a new account
    Register {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "")]
        mobile_number: String,

        #[arg(long, env = "MEETDASH_PASSWORD", hide_env_values = true)]
        password: String,

        /// Must match --password
        #[arg(long, hide_env_values = true)]
        confirm_password: String,

        #[arg(long)]
        country_id: i64,

        #[arg(long)]
        state_id: i64,
    },

    /// Clear the stored session
    Logout,

    /// Show the logged-in user and their country/state
    Whoami,

    /// Schedule a new meeting (times are UTC)
    Create {
        /// Meeting topic
        #[arg(long)]
        topic: String,

        /// Date in YYYY-MM-DD (UTC)
        #[arg(long)]
        date: String,

        /// Time in HH:MM (UTC)
        #[arg(long)]
        time: String,

        /// Duration in minutes
        #[arg(long, default_value = "60")]
        duration: u32,
    },

    /// List countries with their states
    Countries,

    /// Produce a shareable artifact for a meeting link
    Share {
        /// The meeting id to share
        meeting_id: String,

        /// Share the host link instead of the join link
        #[arg(long)]
        host: bool,

        /// Host-gate password (required with --host when a gate is set)
        #[arg(long)]
        gate: Option<String>,

        /// Print a QR code to the terminal
        #[arg(long)]
        qr: bool,

        /// Write a QR code SVG to this path
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Copy the link to the clipboard
        #[arg(long)]
        copy: bool,

        /// Open the link in the browser after a short countdown
        #[arg(long)]
        open: bool,

        /// Countdown length in seconds for --open
        #[arg(long, default_value = "5")]
        delay: u32,
    },

    /// Manage the local host-link gate
    Gate {
        #[command(subcommand)]
        action: GateAction,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Host-gate actions.
#[derive(Debug, Subcommand)]
pub enum GateAction {
    /// Store a gate password for host links
    Set {
        #[arg(long, hide_env_values = true)]
        password: String,
    },

    /// Remove the stored gate
    Clear,

    /// Show whether a gate is set
    Status,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
