use clap::Parser;
use std::path::PathBuf;

/// GemRag - ask Gemini about an image from your terminal
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "gemrag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Gemini model ID, overrides `gemini.model`
    #[arg(short = 'm', long = "model", value_name = "ID")]
    pub model: Option<String>,

    /// Text to pre-fill the prompt field with
    #[arg(short = 'p', long = "prompt", value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Log file, overrides `logging.file`
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Answer with a canned response instead of calling Gemini (no API key needed)
    #[arg(long = "offline")]
    pub offline: bool,
}
