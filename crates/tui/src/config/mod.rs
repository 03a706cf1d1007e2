use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::Parser;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/wisp.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// API root, including the `/api` prefix.
    pub base_url: String,
    /// Prefills the login form.
    pub username: String,
    pub session_path: String,
    pub timezone: String,
    pub log_path: String,
    pub log_level: String,
    /// Path opened at startup, e.g. `/movements`. Guarded like any navigation.
    pub start_route: String,
    /// Exchange the refresh token and replay once when a request gets a 401.
    pub refresh_on_unauthorized: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            username: String::new(),
            session_path: "config/wisp_session.json".to_string(),
            timezone: "UTC".to_string(),
            log_path: "wisp.log".to_string(),
            log_level: "info".to_string(),
            start_route: "/".to_string(),
            refresh_on_unauthorized: true,
        }
    }
}

impl AppConfig {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|err| AppError::Setting {
                key: "timezone",
                message: err.to_string(),
            })
    }

    /// Today's date in the configured timezone, used as the default movement date.
    pub fn today(&self) -> NaiveDate {
        let now = chrono::Utc::now();
        match self.tz() {
            Ok(tz) => now.with_timezone(&tz).date_naive(),
            Err(_) => now.date_naive(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "wisp", version, about = "Household expense sharing in the terminal")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override API base URL (e.g. http://127.0.0.1:8000/api).
    #[arg(long)]
    base_url: Option<String>,
    /// Prefill the login username (password is never read from CLI).
    #[arg(long)]
    username: Option<String>,
    /// Where the session tokens are stored.
    #[arg(long)]
    session_path: Option<String>,
    /// Timezone used for default dates (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Log file path.
    #[arg(long)]
    log_path: Option<String>,
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
    /// Path to open at startup (e.g. /movements).
    #[arg(long)]
    start_route: Option<String>,
    /// Disable refresh-token renewal on 401 responses.
    #[arg(long)]
    no_refresh: bool,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("WISP"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(username) = args.username {
        settings.username = username;
    }
    if let Some(session_path) = args.session_path {
        settings.session_path = session_path;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(log_path) = args.log_path {
        settings.log_path = log_path;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(start_route) = args.start_route {
        settings.start_route = start_route;
    }
    if args.no_refresh {
        settings.refresh_on_unauthorized = false;
    }

    settings.tz()?;
    Ok(settings)
}
