//! Session settings.

use std::time::Duration;

use lanchat_proto::Broadcast;

use crate::error::ConfigError;

/// Default server host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_PORT: u16 = 5555;

/// Default deadline for establishing the TCP connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default deadline for each read or write once connected. Also the idle
/// limit: a silent server is considered gone after this long.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(600);

/// Settings for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Name announced in the HELLO frame.
    pub username: String,
    /// Deadline for the TCP connect.
    pub connect_timeout: Duration,
    /// Deadline for each read or write after connecting.
    pub io_timeout: Duration,
}

impl SessionConfig {
    /// Default settings for `username`.
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into(), ..Default::default() }
    }

    /// `host:port`, for messages and logs.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check the settings before connecting.
    ///
    /// # Errors
    ///
    /// - `ConfigError::EmptyUsername` if the username is empty or whitespace
    /// - `ConfigError::UsernameTooLong` if the username would not fit the
    ///   16-bit length field the server echoes it back in
    /// - `ConfigError::ZeroTimeout` if either deadline is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        if self.username.len() > Broadcast::MAX_USERNAME_LEN {
            return Err(ConfigError::UsernameTooLong {
                len: self.username.len(),
                max: Broadcast::MAX_USERNAME_LEN,
            });
        }
        if self.connect_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout { name: "connect timeout" });
        }
        if self.io_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout { name: "I/O timeout" });
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            username: String::new(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }
}
