use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::ErrorKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn get_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    get_env(name)
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// 由分散的 PG_* 参数拼接 Postgres 连接串
pub fn compose_postgres_url(
    host: &str,
    port: u16,
    user: &str,
    password: &str,
    dbname: &str,
    sslmode: &str,
) -> String {
    format!("postgres://{user}:{password}@{host}:{port}/{dbname}?sslmode={sslmode}")
}

fn postgres_url_from_env() -> String {
    compose_postgres_url(
        &get_env("PG_HOST").unwrap_or_else(|| "localhost".to_string()),
        get_env_parse("PG_PORT", 5432u16),
        &get_env("PG_USER").unwrap_or_else(|| "postgres".to_string()),
        &get_env("PG_PASSWORD").unwrap_or_else(|| "postgres".to_string()),
        &get_env("PG_DATABASE").unwrap_or_else(|| "postgres".to_string()),
        &get_env("PG_SSLMODE").unwrap_or_else(|| "disable".to_string()),
    )
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

        // 优先读取配置文件，不存在时完全依赖环境变量
        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Config {
                server: ServerConfig {
                    host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                    port: get_env_parse("SERVER_PORT", 8080u16),
                },
                database: DatabaseConfig {
                    url: get_env("DATABASE_URL").unwrap_or_else(postgres_url_from_env),
                    max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    min_connections: get_env_parse("DB_MIN_CONNECTIONS", default_min_connections()),
                    connect_timeout_secs: get_env_parse(
                        "DB_CONNECT_TIMEOUT_SECS",
                        default_connect_timeout_secs(),
                    ),
                },
            },
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "cannot read config file {config_path}: {e}"
                )));
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        if let Some(v) = get_env("SERVER_HOST") {
            config.server.host = v;
        }
        if let Some(v) = get_env("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Some(v) = get_env("DATABASE_URL") {
            config.database.url = v;
        }
        if let Some(v) = get_env("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Some(v) = get_env("DB_MIN_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.min_connections = mc;
        }
        if let Some(v) = get_env("DB_CONNECT_TIMEOUT_SECS")
            && let Ok(secs) = v.parse()
        {
            config.database.connect_timeout_secs = secs;
        }

        Ok(config)
    }

    pub fn parse(config_str: &str) -> AppResult<Self> {
        toml::from_str(config_str)
            .map_err(|e| AppError::ConfigError(format!("failed to parse config file: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_postgres_url() {
        let url = compose_postgres_url("db", 5433, "subs", "secret", "subs_db", "require");
        assert_eq!(url, "postgres://subs:secret@db:5433/subs_db?sslmode=require");
    }

    #[test]
    fn test_parse_applies_defaults() {
        let config = Config::parse(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [database]
            url = "postgres://localhost/subs"
            max_connections = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.database.connect_timeout_secs, 5);
    }

    #[test]
    fn test_parse_rejects_missing_section() {
        let err = Config::parse("[server]\nhost = \"0.0.0.0\"\nport = 8080\n").unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
