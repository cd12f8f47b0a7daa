//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::infrastructure::emit::OutputFormat;

/// Six-line hexagram client: cast entry, five-element colouring, terminal and HTML rendering
#[derive(Parser, Debug)]
#[command(name = "gua")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Disable colours
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file (default: $XDG_CONFIG_HOME/guaxiang/guaxiang.toml)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Server base URL (overrides config)
    #[arg(short, long, global = true, value_hint = ValueHint::Url)]
    pub endpoint: Option<String>,

    /// Output format (overrides config)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cast: send six line values (0-3, bottom first) and show the result
    Cast {
        /// Six digits 0-3, e.g. 012301
        numbers: String,
    },

    /// Render a saved response JSON file ("-" reads stdin)
    Render {
        /// Response file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Read entries from stdin, one per line, keeping the last good result
    Session,

    /// Show the element of a branch glyph or an annotated text
    Classify {
        /// Branch glyph, or text with --offset/--text
        input: String,
        /// Classify by the element glyphs the text contains
        #[arg(long, conflicts_with = "offset")]
        text: bool,
        /// Classify the branch glyph at this character offset
        #[arg(long)]
        offset: Option<usize>,
    },

    /// Check an entry without sending it
    Validate {
        /// Six digits 0-3
        numbers: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective config
    Show,

    /// Create config template
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show config path
    Path,
}
