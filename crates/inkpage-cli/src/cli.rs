use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "inkpage",
    about = "Inkpage: compile coloring-page specs into prompt contracts and audit provider drift",
    version
)]
pub struct Cli {
    /// Path to configuration file (default: ./inkpage.toml when present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides [log] level
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a spec against its invariants and list every issue
    Validate {
        /// Path to spec JSON
        #[arg(long)]
        spec: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the line vocabulary, or the lines one spec requires
    Vocabulary {
        /// Path to spec JSON; omit for the full per-axis table
        #[arg(long)]
        spec: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compile a spec into its canonical prompt
    Compile {
        /// Path to spec JSON
        #[arg(long)]
        spec: String,

        /// Free-text style hint; overrides [compile] style_hint
        #[arg(long)]
        style_hint: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Audit a sent (and optionally revised) prompt for contract drift
    Detect {
        /// Path to spec JSON
        #[arg(long)]
        spec: String,

        /// Path to the prompt text that was sent
        #[arg(long)]
        prompt: String,

        /// Path to the provider's revised prompt text
        #[arg(long)]
        revised: Option<String>,

        /// Fail when the confidence score is below this; overrides [detect] min_confidence
        #[arg(long)]
        min_confidence: Option<f64>,

        /// Fail on any violation; overrides [detect] fail_on_warning
        #[arg(long)]
        fail_on_warning: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the full pipeline against a captured provider response
    Generate {
        /// Path to spec JSON
        #[arg(long)]
        spec: String,

        /// Path to a captured provider response JSON
        #[arg(long)]
        replay: String,

        /// Free-text style hint; overrides [compile] style_hint
        #[arg(long)]
        style_hint: Option<String>,

        /// Fail when the confidence score is below this; overrides [detect] min_confidence
        #[arg(long)]
        min_confidence: Option<f64>,

        /// Fail on any violation; overrides [detect] fail_on_warning
        #[arg(long)]
        fail_on_warning: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
