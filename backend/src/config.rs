use std::{
    env,
    fmt::{Debug, Display},
    path::PathBuf,
    str::FromStr,
};

use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub redis_url: String,
    pub seed_path: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", 3000),
            store_backend: try_load("STORE_BACKEND", StoreBackend::Redis),
            redis_url: try_load("REDIS_URL", "redis://127.0.0.1:6379".to_string()),
            seed_path: try_load("SEED_PATH", PathBuf::from("backend/seed/db.json")),
            static_dir: try_load("STATIC_DIR", PathBuf::from("frontend/dist")),
        }
    }
}

/// Reads `key` from the environment, falling back to `default` when the
/// variable is unset or does not parse.
fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Debug,
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        info!("{key} not set, using default: {default:?}");
        return default;
    };

    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value `{raw}`: {e}, using default: {default:?}");
        default
    })
}
