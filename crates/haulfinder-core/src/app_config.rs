use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub geocoder_zip_base_url: String,
    pub geocoder_place_base_url: String,
    pub geocoder_timeout_secs: u64,
    pub geocoder_user_agent: String,
    pub search_default_radius_miles: f64,
    pub search_max_page_size: usize,
    pub search_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("geocoder_zip_base_url", &self.geocoder_zip_base_url)
            .field("geocoder_place_base_url", &self.geocoder_place_base_url)
            .field("geocoder_timeout_secs", &self.geocoder_timeout_secs)
            .field("geocoder_user_agent", &self.geocoder_user_agent)
            .field(
                "search_default_radius_miles",
                &self.search_default_radius_miles,
            )
            .field("search_max_page_size", &self.search_max_page_size)
            .field("search_timeout_secs", &self.search_timeout_secs)
            .finish()
    }
}
