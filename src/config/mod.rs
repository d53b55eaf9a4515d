use crate::core::window::{Schedule, TimeWindow};
use crate::errors::AppResult;
use crate::http::RetryPolicy;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub start: String,
    pub end: String,
}

impl WindowConfig {
    fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    pub fn to_window(&self) -> AppResult<TimeWindow> {
        TimeWindow::parse(&self.start, &self.end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_backoff_first_secs")]
    pub backoff_first_secs: u64,
    #[serde(default = "default_backoff_max_secs")]
    pub backoff_max_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}
fn default_max_attempts() -> u32 {
    5
}
fn default_backoff_first_secs() -> u64 {
    1
}
fn default_backoff_max_secs() -> u64 {
    10
}
fn default_checkin_window() -> WindowConfig {
    WindowConfig::new("08:00", "10:30")
}
fn default_checkout_window() -> WindowConfig {
    WindowConfig::new("17:00", "19:30")
}
fn default_state_dir() -> String {
    Config::config_dir().to_string_lossy().to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            backoff_first_secs: default_backoff_first_secs(),
            backoff_max_secs: default_backoff_max_secs(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::exponential(
            self.max_attempts,
            Duration::from_secs(self.backoff_first_secs),
            Duration::from_secs(self.backoff_max_secs),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_base_url: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// IANA zone name (e.g. `Europe/Rome`); system local time when absent.
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
    #[serde(default = "default_checkin_window")]
    pub checkin_window: WindowConfig,
    #[serde(default = "default_checkout_window")]
    pub checkout_window: WindowConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            email: String::new(),
            password: String::new(),
            timezone: None,
            dry_run: false,
            log_file: None,
            state_dir: default_state_dir(),
            checkin_window: default_checkin_window(),
            checkout_window: default_checkout_window(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("attendance_automator")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".attendance_automator")
        }
    }

    /// Return the full path of the default config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("attendance_automator.conf")
    }

    /// Load configuration from `path`, or return defaults if the file does not exist.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    /// Load from `path` and apply the process environment on top.
    pub fn load(path: &Path) -> AppResult<Self> {
        let mut cfg = Self::load_from(path)?;
        cfg.apply_env_with(|key| env::var(key).ok());
        Ok(cfg)
    }

    /// Override fields from environment-style variables.
    ///
    /// Recognized keys: `API_BASE_URL`, `EMAIL`, `PASSWORD`, `TZ`, `DRY_RUN`,
    /// `LOG_FILE`, `STATE_DIR`. Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("API_BASE_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = get("EMAIL") {
            self.email = v;
        }
        if let Some(v) = get("PASSWORD") {
            self.password = v;
        }
        if let Some(v) = get("TZ") {
            self.timezone = Some(v);
        }
        if let Some(v) = get("DRY_RUN") {
            self.dry_run = v.trim() == "1";
        }
        if let Some(v) = get("LOG_FILE") {
            self.log_file = Some(v);
        }
        if let Some(v) = get("STATE_DIR") {
            self.state_dir = v;
        }
    }

    /// Base URL without trailing slashes, ready for `{base}{endpoint}` joins.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn state_path(&self) -> PathBuf {
        expand_tilde(&self.state_dir)
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.as_deref().map(expand_tilde)
    }

    pub fn schedule(&self) -> AppResult<Schedule> {
        Ok(Schedule {
            checkin: self.checkin_window.to_window()?,
            checkout: self.checkout_window.to_window()?,
        })
    }

    /// Names of required settings that are still empty.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.base_url().is_empty() {
            missing.push("api_base_url");
        }
        if self.email.is_empty() {
            missing.push("email");
        }
        if self.password.is_empty() {
            missing.push("password");
        }
        missing
    }

    /// Copy suitable for printing: the password is masked.
    pub fn redacted(&self) -> Self {
        let mut cfg = self.clone();
        if !cfg.password.is_empty() {
            cfg.password = "********".to_string();
        }
        cfg
    }

    /// Write the configuration to `path`, creating the parent directory.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }
}
