use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "citeguard",
    version,
    about = "Citation grounding checks for retrieval-augmented answers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,

    /// Debug-level logs on stderr (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify an answer against the chunks it was generated from
    Check(CheckArgs),
    /// List every reason code with its severity and message
    ExplainCodes,
}

#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Answer text file, or "-" for stdin
    #[arg(long)]
    pub answer: PathBuf,

    /// Retrieved chunks: a JSON array, or an object with "retrieved_chunks"
    #[arg(long)]
    pub chunks: PathBuf,

    /// Prompt context file (accepted for parity with the generator hook; not scored)
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Guardrails config (YAML)
    #[arg(long, env = "CITEGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format: the full JSON result, or the gated answer text
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Flag percentages or content words that no chunk contains
    #[arg(long)]
    pub semantic: bool,

    /// Require every percentage, year span and absolute qualifier to appear in a chunk
    #[arg(long)]
    pub strict_claims: bool,

    /// Require numbers in a cited sentence to appear in the chunks it cites
    #[arg(long)]
    pub alignment: bool,

    /// Warn when one chunk carries most of the citation markers
    #[arg(long)]
    pub dedup_penalty: bool,

    /// Force every extension check off, overriding config and other flags
    #[arg(long)]
    pub disable_extensions: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}
