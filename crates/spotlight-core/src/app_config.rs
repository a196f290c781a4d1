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
    pub data_api_url: String,
    pub data_api_key: String,
    pub events_table: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub cluster_radius_m: f64,
    pub cache_ttl_secs: u64,
    pub nearest_threshold_m: f64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("data_api_url", &self.data_api_url)
            .field("data_api_key", &"[redacted]")
            .field("events_table", &self.events_table)
            .field("cluster_radius_m", &self.cluster_radius_m)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("nearest_threshold_m", &self.nearest_threshold_m)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
