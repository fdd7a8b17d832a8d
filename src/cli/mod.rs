// CLI module for medchat-relay
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

/// medchat-relay - bullet-point medical Q&A over a Groq-compatible LLM API
#[derive(Parser, Debug, Default)]
#[command(name = "medchat-relay", version, about, long_about = None)]
pub struct Args {
    /// Config file to load instead of ~/.medchat-relay/config.toml
    #[arg(long, env = "MEDCHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long, short)]
    pub port: Option<u16>,
}

impl Args {
    /// Apply command-line overrides, which take precedence over every other source
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
