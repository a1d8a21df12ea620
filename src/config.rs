// [library] Secrecy crate - keeps the database password out of Debug output and logs
use secrecy::{ExposeSecret, Secret};

// [rust] Standard library networking and time types
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

// [business] Defaults used when a variable is missing or unparseable
const DEFAULT_NEO4J_URI: &str = "bolt://localhost:7687";
const DEFAULT_NEO4J_USERNAME: &str = "neo4j";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: usize = 16;
const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 10;

// [rust] Debug is safe to derive: Secret<T> prints as [REDACTED]
#[derive(Debug, Clone)]
pub struct Config {
    // [business] Network binding - where the HTTP listener accepts connections
    pub app_host: IpAddr,
    pub app_port: u16,

    // [business] Graph database connection settings
    pub neo4j_uri: String,
    pub neo4j_username: String,
    pub neo4j_password: Secret<String>,

    // [business] Driver pool size and per-call timeout
    pub max_connections: usize,
    pub query_timeout_secs: u64,
}

impl Config {
    // [business] Factory method - loads `.env` if present, then reads the process environment
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // [library] Missing .env is the normal case in containers, so the error is discarded
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any variable source. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config {
            app_host: lookup("APP_HOST")
                .and_then(|v| v.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0))), // [business] Bind all interfaces

            // [business] Port variable name kept from the original deployment files
            app_port: lookup("EXPRESS_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),

            neo4j_uri: lookup("NEO4J_URI").unwrap_or_else(|| DEFAULT_NEO4J_URI.to_string()),

            neo4j_username: lookup("NEO4J_USERNAME")
                .unwrap_or_else(|| DEFAULT_NEO4J_USERNAME.to_string()),

            // [security] Password is REQUIRED - no default credential
            neo4j_password: Secret::new(
                lookup("NEO4J_PASSWORD")
                    .ok_or_else(|| anyhow::anyhow!("NEO4J_PASSWORD must be set"))?,
            ),

            max_connections: lookup("NEO4J_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),

            query_timeout_secs: lookup("NEO4J_QUERY_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_QUERY_TIMEOUT_SECS),
        };

        // [library] Log the loaded config without secrets
        tracing::info!(
            "Config loaded - Host: {}:{}, Neo4j: {} as {}, Pool: {}, Query timeout: {}s",
            config.app_host,
            config.app_port,
            config.neo4j_uri,
            config.neo4j_username,
            config.max_connections,
            config.query_timeout_secs
        );

        Ok(config)
    }

    // [business] Socket address string for the TCP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }

    // [security] Controlled access to the database password
    pub fn neo4j_password(&self) -> &str {
        self.neo4j_password.expose_secret()
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}
