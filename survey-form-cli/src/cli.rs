use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use survey_form_client::{ClientConfig, DEFAULT_BASE_URL};

/// Keyboard-driven survey form with prompt enhancement.
#[derive(Debug, Parser)]
#[command(name = "survey-form", version, about)]
pub struct Cli {
    /// Base URL of the enhancement and health check services
    #[arg(long, env = "SURVEY_FORM_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// TOML file with the questions to ask (built-in questions when omitted)
    #[arg(long, value_name = "FILE")]
    pub questions: Option<PathBuf>,

    /// Initial system instruction
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub instruction: String,

    /// Title shown when the question file has none
    #[arg(long, default_value = "Survey")]
    pub title: String,

    /// Where to write logs; the terminal is owned by the form
    #[arg(long, value_name = "PATH", default_value = "survey-form.log")]
    pub log_file: PathBuf,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 120)]
    pub timeout: u64,

    /// Skip the health checks on startup (F5 still runs them)
    #[arg(long)]
    pub no_probe: bool,

    /// Print the submission as JSON after the form closes
    #[arg(long)]
    pub print_submission: bool,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone()).with_timeout(Duration::from_secs(self.timeout))
    }
}
