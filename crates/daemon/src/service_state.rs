use url::Url;

use crate::database::{Database, DatabaseSetupError};
use crate::service_config::Config;

/// State shared by every request handler
///
/// Holds no per-request mutable state; all coordination between requests
/// goes through the database.
#[derive(Clone, Debug)]
pub struct State {
    database: Database,
    site_url: Url,
}

impl State {
    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        // 1. Setup database
        let sqlite_database_url = match config.sqlite_path {
            Some(ref path) => {
                // check that the path exists
                if !path.exists() {
                    return Err(StateSetupError::DatabasePathDoesNotExist);
                }
                // parse the path into a URL
                Url::parse(&format!("sqlite://{}", path.display()))
                    .map_err(|_| StateSetupError::InvalidDatabaseUrl)
            }
            // otherwise just set up an in-memory database
            None => Url::parse("sqlite::memory:").map_err(|_| StateSetupError::InvalidDatabaseUrl),
        }?;
        tracing::info!("Database URL: {:?}", sqlite_database_url);
        let database = Database::connect(&sqlite_database_url).await?;

        // 2. Resolve the root links are issued under
        let site_url = match config.site_url {
            Some(ref url) => url.clone(),
            None => Url::parse(&format!("http://localhost:{}", config.listen_port))
                .map_err(|_| StateSetupError::InvalidSiteUrl)?,
        };
        if site_url.cannot_be_a_base() {
            return Err(StateSetupError::InvalidSiteUrl);
        }
        tracing::info!(site_url = %site_url, "issuing links under site root");

        Ok(Self::new(database, site_url))
    }

    pub fn new(database: Database, site_url: Url) -> Self {
        Self { database, site_url }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn site_url(&self) -> &Url {
        &self.site_url
    }
}

impl AsRef<Database> for State {
    fn as_ref(&self) -> &Database {
        self.database()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("Database path does not exist")]
    DatabasePathDoesNotExist,
    #[error("Database setup error")]
    DatabaseSetupError(#[from] DatabaseSetupError),
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,
    #[error("Invalid site URL: links cannot be rendered below it")]
    InvalidSiteUrl,
}
