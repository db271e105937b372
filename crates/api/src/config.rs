use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Default public client URL used by the link QR policies.
const DEFAULT_CLIENT_URL: &str = "https://be-out.app";

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
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Public client URL embedded in verification/event QR links.
    pub client_url: String,
    /// Root upload directory; ticket PDFs land in `{upload_dir}/tickets`.
    pub upload_dir: PathBuf,
    /// Directory holding logo assets referenced by ticket templates.
    pub asset_dir: PathBuf,
    /// Explicit Chromium binary path for containerized deployments.
    pub chromium_executable: Option<PathBuf>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default               |
    /// |------------------------|-----------------------|
    /// | `HOST`                 | `0.0.0.0`             |
    /// | `PORT`                 | `3000`                |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                  |
    /// | `CLIENT_URL`           | `https://be-out.app`  |
    /// | `UPLOAD_DIR`           | `uploads` (cwd-relative) |
    /// | `ASSET_DIR`            | `public` (cwd-relative)  |
    /// | `CHROMIUM_EXECUTABLE`  | unset (auto-detect)   |
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

        let client_url = std::env::var("CLIENT_URL")
            .unwrap_or_else(|_| DEFAULT_CLIENT_URL.into())
            .trim_end_matches('/')
            .to_string();

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));

        let asset_dir =
            PathBuf::from(std::env::var("ASSET_DIR").unwrap_or_else(|_| "public".into()));

        let chromium_executable = std::env::var("CHROMIUM_EXECUTABLE").ok().map(PathBuf::from);

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            client_url,
            upload_dir,
            asset_dir,
            chromium_executable,
            jwt,
        }
    }
}
