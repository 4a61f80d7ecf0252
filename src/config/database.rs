use crate::config::{get_env, try_get_env};
use anyhow::anyhow;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use tracing::info;

pub const NAME_POSTGRES: &str = "DATABASE_URL";

#[derive(Deserialize, Clone)]
pub struct DatabaseFieldsModel {
    username: Option<String>,
    password: Option<String>,
    port: Option<u16>,
    host: Option<String>,
    database_name: Option<String>,
}

impl DatabaseFieldsModel {
    fn to_fields(self) -> DatabaseFields {
        DatabaseFields {
            username: self.username.unwrap_or_else(|| "postgres".to_string()),
            password: Secret::new(self.password.unwrap_or_default()),
            port: self.port.unwrap_or(5432),
            host: self.host.unwrap_or_else(|| "localhost".to_string()),
            database_name: self.database_name.unwrap_or_else(|| "postgres".to_string()),
        }
    }
}

#[derive(Clone)]
pub struct DatabaseFields {
    username: String,
    password: Secret<String>,
    port: u16,
    host: String,
    database_name: String,
}

impl DatabaseFields {
    fn compose(&self, scheme: &str) -> String {
        format!(
            "{scheme}://{}:{}@{}:{}/{}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.database_name
        )
    }
}

pub trait ConnectionPrep {
    const SCHEME: &'static str;

    fn compose_database_url(&self) -> Option<String>;
    fn get_database_url(&self) -> Option<String>;
    fn env_database_url() -> Option<String>;
    fn get_connection_string(&self) -> anyhow::Result<String> {
        let info = format!("url for {}", Self::SCHEME);
        if let Some(url) = self.compose_database_url() {
            info!("Using composed {info}");
            return Ok(url);
        }
        if let Some(url) = self.get_database_url() {
            info!("Using field {info}");
            return Ok(url);
        }
        let url = Self::env_database_url().ok_or_else(|| anyhow!("No connection info provided"))?;
        info!("Using env {info}");
        Ok(url)
    }
}

#[derive(Deserialize, Clone)]
pub struct PostgresSettingsModel {
    database_url: Option<String>,
    fields: Option<DatabaseFieldsModel>,
    is_migrating: Option<bool>,
}

impl ConnectionPrep for PostgresSettingsModel {
    const SCHEME: &'static str = "postgresql";

    fn compose_database_url(&self) -> Option<String> {
        let fields = self.fields.clone()?;
        Some(fields.to_fields().compose(Self::SCHEME))
    }

    fn get_database_url(&self) -> Option<String> {
        self.database_url.clone()
    }

    fn env_database_url() -> Option<String> {
        try_get_env(NAME_POSTGRES)
    }
}

impl PostgresSettingsModel {
    pub fn to_settings(self) -> anyhow::Result<PostgresSettings> {
        Ok(PostgresSettings {
            database_url: Secret::new(self.get_connection_string()?),
            is_migrating: self.is_migrating.unwrap_or(false),
        })
    }
}

#[derive(Clone)]
pub struct PostgresSettings {
    pub database_url: Secret<String>,
    pub is_migrating: bool,
}

impl PostgresSettings {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: Secret::new(get_env(NAME_POSTGRES)?),
            is_migrating: true,
        })
    }
}
