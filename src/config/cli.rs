use crate::adapters::http::DEFAULT_API_ENDPOINT;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "apod-gallery")]
#[command(about = "Browse NASA's Astronomy Picture of the Day for a date range")]
pub struct CliConfig {
    /// First day of the range (YYYY-MM-DD); defaults to eight days ago
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last day of the range (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub end_date: Option<String>,

    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, env = "APOD_API_KEY", default_value = "DEMO_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Load API and output settings from a TOML file instead
    #[arg(long)]
    pub config: Option<String>,

    /// Keep running and read commands from stdin
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_non_empty_string("api_key", &self.api_key)?;
        validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}
