use crate::config::app::{ApplicationSettings, ApplicationSettingsModel, NAME_PORT};
use crate::config::database::{PostgresSettings, PostgresSettingsModel, NAME_POSTGRES};
use crate::config::environment::Environment;
use crate::config::tokens::{JwtSettings, JwtSettingsModel, NAME_JWT_SECRET};
use anyhow::{anyhow, Context};
use config::{Config, ConfigError};
use secrecy::Secret;
use serde::Deserialize;
use std::env;
use tracing::{error, warn};

pub mod app;
pub mod database;
pub mod environment;
pub mod tokens;

const CONFIG_DIR: &str = "configuration";
const CONFIG_FILE_NAME: &str = "settings.toml";
const NAME_ENVIRONMENT: &str = "APP_ENVIRONMENT";

#[derive(Deserialize)]
pub struct SettingsModel {
    pub app: Option<ApplicationSettingsModel>,
    pub jwt: Option<JwtSettingsModel>,
    pub postgres: Option<PostgresSettingsModel>,
}

impl SettingsModel {
    fn parse() -> Result<Self, ConfigError> {
        let base_path = env::current_dir()
            .map_err(|e| ConfigError::Message(format!("Failed to read current dir: {e}")))?;
        let config_dir = base_path.join(CONFIG_DIR);
        let settings = Config::builder()
            .add_source(config::File::from(config_dir.join(CONFIG_FILE_NAME)))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );
        settings.build()?.try_deserialize()
    }
}

#[derive(Clone)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub jwt: JwtSettings,
    pub postgres: PostgresSettings,
    pub environment: Environment,
}

impl Settings {
    fn dev(model: SettingsModel) -> anyhow::Result<Self> {
        let app = model.app.map_or_else(
            || {
                warn!("Using default `app` settings!");
                Ok(ApplicationSettings::default())
            },
            |x| x.to_settings(),
        )?;

        let jwt = model.jwt.map_or_else(
            || {
                warn!("Using default `jwt` settings!");
                JwtSettings::default()
            },
            |x| x.to_settings(),
        );

        let postgres = match model.postgres {
            Some(model) => model.to_settings()?,
            None => {
                warn!("Using default `postgres` settings (env url)!");
                PostgresSettings::from_env()?
            }
        };

        Ok(Self {
            app,
            jwt,
            postgres,
            environment: Environment::Development,
        })
    }

    fn prod() -> anyhow::Result<Self> {
        Ok(Self {
            app: ApplicationSettings::from_env()?,
            jwt: JwtSettings::from_env()?,
            postgres: PostgresSettings::from_env()?,
            environment: Environment::Production,
        })
    }

    fn fallback() -> anyhow::Result<Self> {
        Ok(Self {
            app: ApplicationSettings::default(),
            jwt: JwtSettings::default(),
            postgres: PostgresSettings::from_env()?,
            environment: Environment::default(),
        })
    }
}

pub fn get_config() -> anyhow::Result<Settings> {
    let environment = match env::var(NAME_ENVIRONMENT) {
        Ok(value) => Environment::try_from(value)
            .map_err(|e| anyhow!(e).context(format!("Failed to parse {NAME_ENVIRONMENT}")))?,
        Err(_) => Environment::Development,
    };

    match environment {
        Environment::Development => match SettingsModel::parse() {
            Ok(model) => Settings::dev(model),
            Err(e) => {
                error!("{e}\n - check {CONFIG_DIR}/{CONFIG_FILE_NAME}");
                warn!("Using default configuration!");
                Settings::fallback()
            }
        },
        Environment::Production => {
            check_required_env()?;
            Settings::prod()
        }
    }
}

pub fn try_get_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

pub fn get_env(name: &str) -> anyhow::Result<String> {
    env::var(name).with_context(|| format!("Missing {name}"))
}

pub fn get_secret_env(name: &str) -> anyhow::Result<Secret<String>> {
    Ok(Secret::new(get_env(name)?))
}

fn check_required_env() -> anyhow::Result<()> {
    let missing: Vec<&str> = [NAME_PORT, NAME_POSTGRES, NAME_JWT_SECRET]
        .into_iter()
        .filter(|name| env::var(name).is_err())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    error!("Provide missing environment variables {missing:?}");
    Err(anyhow!("Missing environment variables {missing:?}"))
}
