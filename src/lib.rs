// medchat-relay - bullet-point medical Q&A over a Groq-compatible LLM API
// Author: kelexine (https://github.com/kelexine)

pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod metrics;
pub mod models;
pub mod normalizer;
pub mod relay;
pub mod server;
pub mod translation;
pub mod utils;
pub mod vision;
