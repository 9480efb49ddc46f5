use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Email of the built-in account checked before stored users.
    pub admin_email: String,
    /// Password granting the built-in account the admin role.
    pub admin_password: Option<String>,
    /// Password granting the built-in account the plain user role.
    pub shared_user_password: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            database_max_connections: 10,
            host: "0.0.0.0".to_string(),
            port: 8001,
            admin_email: "admin@localhost".to_string(),
            admin_password: None,
            shared_user_password: None,
        }
    }
}

/// Read an optional variable; unset is `None`, non-unicode is an error.
fn optional_var(key: &str) -> Result<Option<String>, env::VarError> {
    match env::var(key) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        let defaults = Self::default();
        Ok(Self {
            database_url: optional_var("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.database_max_connections),
            host: optional_var("BACKEND_HOST")?.unwrap_or(defaults.host),
            port: env::var("BACKEND_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            admin_email: optional_var("ADMIN_EMAIL")?.unwrap_or(defaults.admin_email),
            admin_password: optional_var("ADMIN_PASSWORD")?,
            shared_user_password: optional_var("SHARED_USER_PASSWORD")?,
        })
    }
}
