use std::env;

/// Which backend serves the entity store. Resolved once at boot from
/// configuration — never probed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    Postgres,
    MongoDb,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
            Self::MongoDb => "mongodb",
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Self::Memory),
            "postgres" => Ok(Self::Postgres),
            "mongodb" => Ok(Self::MongoDb),
            other => Err(format!(
                "unknown STORAGE_BACKEND '{other}' (expected memory | postgres | mongodb)"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: BackendKind,
    pub database_url: String,
    pub mongodb_url: String,
    pub mongodb_db: String,
    pub jwt_secret: String,
    pub port: u16,
    pub order_webhook_url: Option<String>,
    pub dashboard_cache_ttl_secs: u64,
}

impl AppConfig {
    /// Read configuration from the environment. Connection strings are
    /// only required for the backend that was actually selected.
    pub fn from_env() -> Self {
        let backend: BackendKind = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .parse()
            .expect("Invalid STORAGE_BACKEND");

        let database_url = match backend {
            BackendKind::Postgres => env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            _ => env::var("DATABASE_URL").unwrap_or_default(),
        };
        let mongodb_url = match backend {
            BackendKind::MongoDb => env::var("MONGODB_URL").expect("MONGODB_URL must be set"),
            _ => env::var("MONGODB_URL").unwrap_or_default(),
        };

        Self {
            backend,
            database_url,
            mongodb_url,
            mongodb_db: env::var("MONGODB_DB").unwrap_or_else(|_| "agencyhub".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            order_webhook_url: env::var("ORDER_WEBHOOK_URL").ok(),
            dashboard_cache_ttl_secs: env::var("DASHBOARD_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }
}
