use crate::auth::jwt::JwtConfig;

/// Namespace under which the API routes are mounted by default.
pub const DEFAULT_NAMESPACE: &str = "/download-manager/v1";

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Route prefix for the download and version resources.
    pub namespace: String,
    /// Base URL that download links are built from.
    pub site_url: String,
    /// How long a version listing stays cached; `0` disables the cache.
    pub version_cache_ttl_secs: u64,
    /// PostgreSQL connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// JWT validation settings.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `API_NAMESPACE`          | `/download-manager/v1`     |
    /// | `SITE_URL`               | `http://localhost:3000`    |
    /// | `VERSION_CACHE_TTL_SECS` | `3600`                     |
    /// | `DATABASE_URL`           | unset (in-memory store)    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let namespace = normalize_namespace(
            &std::env::var("API_NAMESPACE").unwrap_or_else(|_| DEFAULT_NAMESPACE.into()),
        );

        let site_url = std::env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:3000".into());

        let version_cache_ttl_secs: u64 = std::env::var("VERSION_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("VERSION_CACHE_TTL_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            namespace,
            site_url,
            version_cache_ttl_secs,
            database_url,
            jwt,
        }
    }
}

/// Normalize a route prefix to `/segment[/segment...]` without a trailing slash.
///
/// # Panics
///
/// Panics if the prefix has no path segments, since the API cannot be
/// mounted at the root.
pub fn normalize_namespace(raw: &str) -> String {
    let segments: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
    assert!(
        !segments.is_empty(),
        "API_NAMESPACE must contain at least one path segment, got '{raw}'"
    );
    format!("/{}", segments.join("/"))
}
