//! Server Configuration
//!
//! Read once from the environment at startup.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::{DEFAULT_SESSION_TTL, MAX_SESSION_TTL};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";

/// Process-wide settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PostgreSQL URL; `None` runs on the in-memory store
    pub database_url: Option<String>,
    pub listen_addr: SocketAddr,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Build from any key lookup; `debug` relaxes the secret and cookie
    /// requirements for local runs.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        debug: bool,
    ) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL");

        let listen_addr = get("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("LISTEN_ADDR must be host:port")?;

        let session_secret = match get("SESSION_SECRET") {
            Some(b64) => decode_secret(&b64)?,
            None if debug => platform::crypto::random_secret(),
            None => bail!("SESSION_SECRET must be set in production"),
        };

        let session_ttl = match get("SESSION_TTL_SECS") {
            Some(secs) => {
                let secs: u64 = secs
                    .parse()
                    .context("SESSION_TTL_SECS must be a number of seconds")?;
                if secs == 0 {
                    bail!("SESSION_TTL_SECS must be positive");
                }
                if secs > MAX_SESSION_TTL.as_secs() {
                    bail!(
                        "SESSION_TTL_SECS must be at most {} (ten years)",
                        MAX_SESSION_TTL.as_secs()
                    );
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_SESSION_TTL,
        };

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(v) => parse_bool(&v).context("COOKIE_SECURE must be true or false")?,
            None => !debug,
        };

        let password_min_length = match get("PASSWORD_MIN_LENGTH") {
            Some(v) => v
                .parse()
                .context("PASSWORD_MIN_LENGTH must be a number")?,
            None => platform::password::MIN_PASSWORD_LENGTH,
        };

        let auth = AuthConfig {
            session_secret,
            session_ttl,
            cookie_secure,
            password_pepper: get("PASSWORD_PEPPER").map(String::into_bytes),
            password_min_length,
            ..AuthConfig::default()
        };

        Ok(Self {
            database_url,
            listen_addr,
            auth,
        })
    }
}

fn decode_secret(b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = platform::crypto::from_base64(b64.trim())
        .context("SESSION_SECRET must be standard base64")?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes, got {}", b.len()))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
