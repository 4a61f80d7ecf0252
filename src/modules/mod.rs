use self::database::get_postgres_pool;
use crate::config::app::ApplicationSettings;
use crate::config::environment::Environment;
use crate::config::get_config;
use crate::config::tokens::JwtSettings;
use crate::stores::Stores;
use crate::utils::auth::IdentityService;
use crate::utils::events::EventService;
use crate::utils::invitations::InvitationService;
use axum::extract::FromRef;
use core::fmt::Display;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub mod database;
pub mod extractors;

pub struct Modules {
    pub app: ApplicationSettings,
    stores: Stores,
    jwt: JwtSettings,
    environment: Environment,
}

impl Modules {
    pub async fn load_from_settings() -> anyhow::Result<Self> {
        let settings = get_config()?;
        info!("Settings loaded");
        info!("Loading modules");
        let pool = get_postgres_pool(&settings.postgres).await?;
        info!("Modules loaded");
        Ok(Self {
            app: settings.app,
            stores: Stores::postgres(pool),
            jwt: settings.jwt,
            environment: settings.environment,
        })
    }

    pub fn use_custom(
        stores: Stores,
        addr: SocketAddr,
        secret: &str,
        environment: Environment,
    ) -> Self {
        Self {
            app: ApplicationSettings::new(addr),
            stores,
            jwt: JwtSettings::new(secret),
            environment,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(self)
    }
}

#[derive(Clone, FromRef)]
pub struct AppState {
    pub environment: Environment,
    pub identity: IdentityService,
    pub events: EventService,
    pub invitations: InvitationService,
    pub health: Health,
}

impl AppState {
    fn new(modules: &Modules) -> Self {
        let stores = &modules.stores;
        Self {
            environment: modules.environment,
            identity: IdentityService::new(stores.users.clone(), modules.jwt.clone()),
            events: EventService::new(stores.events.clone()),
            invitations: InvitationService::new(
                stores.invitations.clone(),
                stores.events.clone(),
                stores.users.clone(),
            ),
            health: Health(stores.health.clone()),
        }
    }
}

impl Display for AppState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "identity, event and invitation services")
    }
}

#[derive(Clone)]
pub struct Health(pub Arc<dyn crate::stores::HealthCheck>);
