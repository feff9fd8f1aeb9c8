//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored when the terminal allows
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// CLI arguments for agent-council
#[derive(Parser, Debug)]
#[command(name = "agent-council")]
#[command(author, version, about = "Ask Codex and Gemini CLIs, alone or as a council")]
#[command(long_about = r#"
agent-council drives the Codex and Gemini command-line agents as subprocesses
and combines their answers.

Patterns:
  ask        One agent, one answer
  ask-all    Every configured agent in parallel
  consensus  Parallel answers, then a synthesis of agreements and differences
  debate     Several rounds where each agent sees the others' last answers
  council    Your answer plus the agents', anonymized and peer reviewed

Configuration files are loaded from (in priority order):
1. AGENT_COUNCIL_* environment variables
2. --config <path>     Explicit config file
3. ./council.toml      Project-level config
4. ~/.config/agent-council/config.toml   Global config

Example:
  agent-council ask codex "Explain this borrow error"
  agent-council consensus "Tokio or async-std for a new service?"
  agent-council debate --rounds 3 "Monorepo or polyrepo?"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Flags shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Project root for the shared context (defaults to config, then cwd)
    #[arg(long, global = true, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Do not prepend the shared project context
    #[arg(long, global = true)]
    pub no_context: bool,

    /// Per-agent timeout in seconds, overriding the pattern default
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format (defaults to config, then text)
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

/// Orchestration patterns
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask a single agent
    Ask {
        /// Agent identifier (codex or gemini)
        agent: String,
        /// The question
        prompt: String,
    },

    /// Ask every configured agent in parallel
    #[command(name = "ask-all")]
    AskAll {
        /// The question
        prompt: String,
    },

    /// Parallel answers followed by a synthesis
    Consensus {
        /// The question
        prompt: String,
    },

    /// Multi-round debate between the agents
    Debate {
        /// Number of rounds (1-5)
        #[arg(short, long, default_value_t = 3)]
        rounds: i64,
        /// The topic
        prompt: String,
    },

    /// Individual answers and anonymized peer review
    Council {
        /// Your own answer to the question, reviewed alongside the agents'
        #[arg(long, value_name = "TEXT")]
        orchestrator_answer: String,
        /// The question
        prompt: String,
    },
}

impl Command {
    /// The prompt body of this command.
    pub fn prompt(&self) -> &str {
        match self {
            Command::Ask { prompt, .. }
            | Command::AskAll { prompt }
            | Command::Consensus { prompt }
            | Command::Debate { prompt, .. }
            | Command::Council { prompt, .. } => prompt,
        }
    }
}
