use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_WORKER_THREADS: usize = 4;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(DEFAULT_WORKER_THREADS) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_log_format() -> String { "compact".to_string() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

/// Config built only from `SERVER_HOST`, `SERVER_PORT` and `TOKIO_WORKER_THREADS`.
pub fn from_env() -> AppConfig {
    let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| default_host());
    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok());
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| default_log_format());
    AppConfig {
        server: ServerConfig { host, port, worker_threads },
        logging: LoggingConfig { format },
    }
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file first, env vars only when the file does not exist.
    /// Parse and validation errors in an existing file are returned.
    pub fn load_or_env() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_or_env_from(&path)
    }

    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => from_env(),
            Err(e) => return Err(e.context(format!("cannot load config file `{path}`"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.logging.normalize()?;
        Ok(())
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = DEFAULT_HOST.to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        // 线程数为 0 或未配置时回落到默认值
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(DEFAULT_WORKER_THREADS),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LoggingConfig {
    fn normalize(&mut self) -> Result<()> {
        let f = self.format.trim().to_ascii_lowercase();
        if f.is_empty() {
            self.format = default_log_format();
            return Ok(());
        }
        if f != "compact" && f != "json" {
            return Err(anyhow!("logging.format must be `compact` or `json`, got `{}`", self.format));
        }
        self.format = f;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let mut cfg = parse("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.logging.format, "compact");
    }

    #[test]
    fn parses_full_file() {
        let mut cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            worker_threads = 2

            [logging]
            format = "JSON"
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.logging.format, "json");
    }

    #[test]
    fn normalizes_blank_host_and_zero_threads() {
        let mut cfg = parse("[server]\nhost = \"  \"\nport = 9000\nworker_threads = 0\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn rejects_port_zero_and_unknown_log_format() {
        let mut cfg = parse("[server]\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = parse("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    fn write_temp(name: &str, content: &str) -> String {
        let path = std::env::temp_dir().join(format!("configs_{}_{}.toml", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn load_or_env_uses_existing_file() {
        let path = write_temp("valid", "[server]\nport = 9100\n[logging]\nformat = \"json\"\n");
        let cfg = AppConfig::load_or_env_from(&path).unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.logging.format, "json");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_or_env_rejects_invalid_file_instead_of_falling_back() {
        let path = write_temp("bad_format", "[server]\nport = 9100\n[logging]\nformat = \"jsn\"\n");
        assert!(AppConfig::load_or_env_from(&path).is_err());
        let _ = std::fs::remove_file(&path);

        let path = write_temp("bad_port", "[server]\nport = 0\n");
        assert!(AppConfig::load_or_env_from(&path).is_err());
        let _ = std::fs::remove_file(&path);

        let path = write_temp("bad_toml", "[server\nport = ");
        assert!(AppConfig::load_or_env_from(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_or_env_falls_back_when_file_missing() {
        let cfg = AppConfig::load_or_env_from("/nonexistent/student-directory.toml").unwrap();
        assert!(cfg.server.port > 0);
        assert!(cfg.server.worker_threads.unwrap_or_default() > 0);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_from_file("/nonexistent/student-directory.toml").is_err());
    }
}
