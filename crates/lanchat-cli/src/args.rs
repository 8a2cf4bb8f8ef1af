//! Command-line arguments.

use std::time::Duration;

use clap::Parser;
use lanchat_client::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_HOST, DEFAULT_IO_TIMEOUT, DEFAULT_PORT, SessionConfig,
};

/// LAN chat client
#[derive(Parser, Debug)]
#[command(name = "lanchat")]
#[command(about = "Terminal client for the lanchat binary protocol. Type /quit to leave.")]
#[command(version)]
pub struct Args {
    /// Server host
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Server port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Username announced to the server
    #[arg(short, long)]
    pub user: String,

    /// Seconds to wait for the TCP connection
    #[arg(long, default_value_t = DEFAULT_CONNECT_TIMEOUT.as_secs())]
    pub connect_timeout: u64,

    /// Seconds a single read or write may block once connected
    #[arg(long, default_value_t = DEFAULT_IO_TIMEOUT.as_secs())]
    pub io_timeout: u64,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Session settings described by these arguments.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            host: self.host.clone(),
            port: self.port,
            username: self.user.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout),
            io_timeout: Duration::from_secs(self.io_timeout),
        }
    }
}
