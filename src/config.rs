use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Dataset file to process in batch mode; the HTTP server runs when unset
    #[serde(default)]
    pub input_path: Option<PathBuf>,

    /// Where batch results are written (stdout when unset)
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Run reports kept by the HTTP service; the oldest is evicted first
    #[serde(default = "default_max_runs")]
    pub max_runs: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

pub fn default_max_runs() -> usize {
    100
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address string for the HTTP server
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether the binary should process a dataset file and exit
    pub fn is_batch(&self) -> bool {
        self.input_path.is_some()
    }
}
