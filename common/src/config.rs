use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::{env, fs};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub project_name: String,
    pub env: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    pub fn init(env_path: &str) -> &'static Self {
        dotenvy::from_filename(env_path).ok();

        CONFIG.get_or_init(|| {
            let project_name = env::var("PROJECT_NAME").unwrap_or_else(|_| "classline-api".into());
            let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
            let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into());
            // File name within the log directory, not a path.
            let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into());
            let log_to_stdout =
                env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "true".into()) == "true";
            let database_path = env::var("DATABASE_PATH").expect("DATABASE_PATH must be set");
            let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
            let port = env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000);

            if let Some(parent) = std::path::Path::new(&log_file).parent() {
                fs::create_dir_all(parent).expect("Failed to create log directory");
            }
            let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| "change-me".into());
            let jwt_duration_minutes = env::var("JWT_DURATION_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(60);

            Config {
                project_name,
                env: app_env,
                log_level,
                log_file,
                log_to_stdout,
                database_path,
                host,
                port,
                jwt_secret,
                jwt_duration_minutes,
            }
        })
    }

    pub fn get() -> &'static Self {
        CONFIG.get().expect("Config not initialized")
    }
}
