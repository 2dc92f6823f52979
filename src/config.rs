use std::time::Duration;

use clap::Parser;

use crate::api::client::DEFAULT_API_URL;
use crate::api::ApiConfig;

// ---------------------------------------------------------------------------
// Command line / environment configuration
// ---------------------------------------------------------------------------

#[derive(Parser, Debug, Clone)]
#[command(name = "equipment-viz")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Upload chemical-equipment CSV files and explore the backend's analysis")]
pub struct Config {
    /// Base URL of the equipment API
    #[arg(long, env = "EQUIPMENT_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, env = "EQUIPMENT_API_TIMEOUT")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url.trim_end_matches('/').to_string(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}
