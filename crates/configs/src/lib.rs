use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub pages: PagesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    #[default]
    Http,
    Memory,
}

/// Connection to the hosted data/auth/file backend.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub mode: BackendMode,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub app_id: String,
    #[serde(default = "default_requires_auth")]
    pub requires_auth: bool,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::default(),
            base_url: default_base_url(),
            app_id: String::new(),
            requires_auth: default_requires_auth(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagesConfig {
    #[serde(default = "default_load_timeout")]
    pub load_timeout_secs: u64,
    #[serde(default = "default_dashboard_limit")]
    pub dashboard_limit: usize,
    #[serde(default = "default_chart_months")]
    pub chart_months: usize,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            load_timeout_secs: default_load_timeout(),
            dashboard_limit: default_dashboard_limit(),
            chart_months: default_chart_months(),
        }
    }
}

fn default_base_url() -> String { "https://base44.app".into() }
fn default_requires_auth() -> bool { true }
fn default_timeout() -> u64 { 15 }
fn default_load_timeout() -> u64 { 20 }
fn default_dashboard_limit() -> usize { 50 }
fn default_chart_months() -> usize { 6 }

/// `CONFIG_PATH`, else `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config_path()`; a missing file falls back to defaults plus
    /// environment overrides.
    pub fn load_or_env() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        self.backend.normalize_from_env();
        self.backend.validate()?;
        self.pages.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl BackendConfig {
    pub fn normalize_from_env(&mut self) {
        // env wins over an empty TOML value only
        if self.app_id.trim().is_empty() {
            if let Ok(id) = std::env::var("BACKEND_APP_ID") {
                self.app_id = id;
            }
        }
        if let Ok(url) = std::env::var("BACKEND_BASE_URL") {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.mode == BackendMode::Memory {
            return Ok(());
        }
        if self.app_id.trim().is_empty() {
            return Err(anyhow!("backend.app_id is empty; set it in config.toml or BACKEND_APP_ID"));
        }
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("backend.base_url must start with http:// or https://"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("backend.timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}

impl PagesConfig {
    pub fn validate(&self) -> Result<()> {
        if self.load_timeout_secs == 0 {
            return Err(anyhow!("pages.load_timeout_secs must be positive"));
        }
        if self.dashboard_limit == 0 || self.chart_months == 0 {
            return Err(anyhow!("pages.dashboard_limit and pages.chart_months must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg = load_from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [backend]
            mode = "http"
            base_url = "https://api.example.com/"
            app_id = "app-123"
            requires_auth = true

            [pages]
            chart_months = 12
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.backend.app_id, "app-123");
        assert_eq!(cfg.pages.chart_months, 12);
        assert_eq!(cfg.pages.dashboard_limit, 50);
    }

    #[test]
    fn http_backend_requires_app_id() {
        let cfg = BackendConfig::default();
        assert!(cfg.validate().is_err());

        let memory = BackendConfig { mode: BackendMode::Memory, ..BackendConfig::default() };
        assert!(memory.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let cfg = BackendConfig {
            app_id: "x".into(),
            base_url: "ftp://example.com".into(),
            ..BackendConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_worker_threads_normalized() {
        let mut s = ServerConfig { host: " ".into(), port: 8080, worker_threads: Some(0) };
        s.normalize().unwrap();
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.worker_threads, Some(4));
    }
}
