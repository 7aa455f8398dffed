use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use hagwon_core::AppError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: Option<String>,
    pub frontend_url: String,
    pub snapshot_path: Option<PathBuf>,
    pub api_host: String,
    pub api_port: u16,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = optional_env("DATABASE_URL");
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let snapshot_path = optional_env("SNAPSHOT_PATH").map(PathBuf::from);

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = match optional_env("API_PORT") {
            Some(value) => parse_port(value.as_str())?,
            None => 3001,
        };

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            snapshot_path,
            api_host,
            api_port,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_port(value: &str) -> Result<u16, AppError> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|error| AppError::Validation(format!("invalid API_PORT '{value}': {error}")))
}

#[cfg(test)]
mod tests {
    use hagwon_core::AppError;

    use super::{ApiConfig, parse_port};

    fn config(api_host: &str) -> ApiConfig {
        ApiConfig {
            migrate_only: false,
            database_url: None,
            frontend_url: "http://localhost:3000".to_owned(),
            snapshot_path: None,
            api_host: api_host.to_owned(),
            api_port: 3001,
        }
    }

    #[test]
    fn port_must_be_numeric() {
        assert!(matches!(parse_port(" 8080 "), Ok(8080)));
        assert!(matches!(parse_port("http"), Err(AppError::Validation(_))));
        assert!(matches!(parse_port("70000"), Err(AppError::Validation(_))));
    }

    #[test]
    fn socket_address_rejects_hostnames() {
        let address = config("0.0.0.0").socket_address();
        assert!(matches!(address, Ok(address) if address.port() == 3001));

        assert!(matches!(
            config("localhost").socket_address(),
            Err(AppError::Validation(_))
        ));
    }
}
