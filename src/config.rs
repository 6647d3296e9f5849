use std::net::{IpAddr, SocketAddr};

use crate::provider::CodePolicy;

use clap::Parser;

/// Daemon settings. Every flag falls back to an environment variable, which
/// `dotenv` may have populated from a `.env` file.
#[derive(Debug, Clone, Parser)]
#[clap(
    name = "authgated",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS")
)]
pub struct Config {
    /// Postgres connection string for the client registry.
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: String,

    #[clap(long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    #[clap(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// `reusable` or `single-use`.
    #[clap(long, env = "CODE_POLICY", default_value = "reusable")]
    pub code_policy: CodePolicy,

    #[clap(long, env = "DATABASE_POOL_SIZE", default_value = "10")]
    pub pool_size: u32,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces() {
        let config =
            Config::try_parse_from(&["authgated", "--database-url", "postgres://localhost/authgate"])
                .unwrap();

        assert_eq!(config.bind, "0.0.0.0".parse::<IpAddr>().unwrap());
        assert_eq!(config.code_policy, CodePolicy::Reusable);
        assert_eq!(config.pool_size, 10);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from(&[
            "authgated",
            "--database-url",
            "postgres://localhost/authgate",
            "--bind",
            "127.0.0.1",
            "--port",
            "8080",
            "--code-policy",
            "single-use",
        ])
        .unwrap();

        assert_eq!(config.socket_addr(), "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.code_policy, CodePolicy::SingleUse);
    }

    #[test]
    fn unknown_code_policy_is_rejected() {
        let result = Config::try_parse_from(&[
            "authgated",
            "--database-url",
            "postgres://localhost/authgate",
            "--code-policy",
            "sometimes",
        ]);
        assert!(result.is_err());
    }
}
