use crate::error::ConfigError;

/// Application configuration loaded from the environment.
pub struct Config {
    /// Database connection string, e.g. `sqlite://university.db?mode=rwc`.
    pub database_url: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Reads a `.env` file first if one is present, then resolves each
    /// variable from the process environment.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is not set
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
        })
    }
}
