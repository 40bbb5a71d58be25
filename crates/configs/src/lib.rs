use std::path::{Path, PathBuf};

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_REGISTRY_PORT: u16 = 8000;
pub const DEFAULT_CATALOG_PORT: u16 = 8001;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), worker_threads: Some(4) }
    }
}

/// Admin project registry (in-memory, Basic auth).
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_registry_port")]
    pub port: u16,
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Never defaulted; must come from config.toml or `ADMIN_PASSWORD`.
    #[serde(default)]
    pub admin_password: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            port: default_registry_port(),
            admin_username: default_admin_username(),
            admin_password: String::new(),
        }
    }
}

/// File-backed project catalog with image uploads.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_port")]
    pub port: u16,
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            port: default_catalog_port(),
            data_file: default_data_file(),
            uploads_dir: default_uploads_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_registry_port() -> u16 { DEFAULT_REGISTRY_PORT }
fn default_catalog_port() -> u16 { DEFAULT_CATALOG_PORT }
fn default_admin_username() -> String { "admin".to_string() }
fn default_data_file() -> PathBuf { PathBuf::from("projects.json") }
fn default_uploads_dir() -> PathBuf { PathBuf::from("uploads") }
fn default_max_upload_bytes() -> usize { DEFAULT_MAX_UPLOAD_BYTES }

/// Config path from `CONFIG_PATH`, falling back to `config.toml`.
pub fn config_path() -> PathBuf {
    std::env::var("CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(config_path())
}

pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load config.toml when present, overlay the process environment, then validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if path.exists() { load_from_file(&path)? } else { AppConfig::default() };
        cfg.apply_env_with(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay values from an environment lookup. Unset keys keep the file/default value.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS") {
            self.server.worker_threads = Some(parse_env("TOKIO_WORKER_THREADS", &w)?);
        }
        if let Some(p) = lookup("REGISTRY_PORT") {
            self.registry.port = parse_env("REGISTRY_PORT", &p)?;
        }
        if let Some(user) = lookup("ADMIN_USERNAME") {
            self.registry.admin_username = user;
        }
        if let Some(pass) = lookup("ADMIN_PASSWORD") {
            self.registry.admin_password = pass;
        }
        if let Some(p) = lookup("CATALOG_PORT") {
            self.catalog.port = parse_env("CATALOG_PORT", &p)?;
        }
        if let Some(f) = lookup("CATALOG_DATA_FILE") {
            self.catalog.data_file = PathBuf::from(f);
        }
        if let Some(d) = lookup("CATALOG_UPLOADS_DIR") {
            self.catalog.uploads_dir = PathBuf::from(d);
        }
        if let Some(n) = lookup("CATALOG_MAX_UPLOAD_BYTES") {
            self.catalog.max_upload_bytes = parse_env("CATALOG_MAX_UPLOAD_BYTES", &n)?;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize();
        if self.registry.port == 0 {
            return Err(anyhow!("registry.port must be in 1..=65535"));
        }
        if self.registry.admin_username.trim().is_empty() {
            self.registry.admin_username = default_admin_username();
        }
        self.catalog.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
    }
}

impl RegistryConfig {
    /// Admin credentials, or an error when no password was supplied.
    pub fn credentials(&self) -> Result<(String, String)> {
        if self.admin_password.is_empty() {
            return Err(anyhow!(
                "registry.admin_password is empty; set it in config.toml or via ADMIN_PASSWORD"
            ));
        }
        Ok((self.admin_username.clone(), self.admin_password.clone()))
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("catalog.port must be in 1..=65535"));
        }
        if self.data_file.as_os_str().is_empty() {
            return Err(anyhow!("catalog.data_file must not be empty"));
        }
        if self.uploads_dir.as_os_str().is_empty() {
            return Err(anyhow!("catalog.uploads_dir must not be empty"));
        }
        if self.max_upload_bytes == 0 {
            return Err(anyhow!("catalog.max_upload_bytes must be positive"));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| anyhow!("{key} has an invalid value: {raw:?}"))
}
