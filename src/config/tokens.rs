use crate::config::get_secret_env;
use secrecy::Secret;
use serde::Deserialize;
use time::Duration;
use tracing::warn;

pub const NAME_JWT_SECRET: &str = "JWT_SECRET";

const DEFAULT_SECRET: &str = "JWT_SECRET";

/// Validity window of every issued credential.
pub const CREDENTIAL_EXPIRATION: Duration = Duration::hours(24);

#[derive(Deserialize)]
pub struct JwtSettingsModel {
    pub secret: Option<String>,
}

impl JwtSettingsModel {
    pub fn to_settings(self) -> JwtSettings {
        match self.secret {
            Some(secret) => JwtSettings::new(&secret),
            None => {
                warn!("Using default jwt secret");
                JwtSettings::default()
            }
        }
    }
}

#[derive(Clone)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub expiration: Duration,
}

impl JwtSettings {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Secret::new(secret.to_owned()),
            expiration: CREDENTIAL_EXPIRATION,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            secret: get_secret_env(NAME_JWT_SECRET)?,
            expiration: CREDENTIAL_EXPIRATION,
        })
    }
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self::new(DEFAULT_SECRET)
    }
}
