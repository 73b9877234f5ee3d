use std::net::IpAddr;
use std::path::PathBuf;

/// Server configuration, loaded from environment variables.
///
/// - `SD_HOST` (optional, default: 0.0.0.0) - Listen address
/// - `SD_PORT` (optional, default: 8080) - Listen port
/// - `SD_SEED_FILE` (optional) - JSON array of shifts to serve
/// - `SD_DEMO_SHIFTS` (optional, default: 500) - Generated shifts when no seed file is set
/// - `SD_CORS_ORIGINS` (optional) - Comma-separated allowed origins
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub seed_file: Option<PathBuf>,
    pub demo_shifts: usize,
    /// Allowed CORS origins. If empty, defaults to restrictive.
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn load() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let host: IpAddr = lookup("SD_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string())
            .parse()
            .map_err(|_| "SD_HOST must be a valid IP address".to_string())?;

        let port: u16 = lookup("SD_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| "SD_PORT must be a valid port number".to_string())?;

        let seed_file = lookup("SD_SEED_FILE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let demo_shifts: usize = lookup("SD_DEMO_SHIFTS")
            .unwrap_or_else(|| "500".to_string())
            .parse()
            .map_err(|_| "SD_DEMO_SHIFTS must be a number".to_string())?;

        let cors_origins: Vec<String> = lookup("SD_CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            seed_file,
            demo_shifts,
            cors_origins,
        })
    }
}
