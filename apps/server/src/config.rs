use std::{net::SocketAddr, time::Duration};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub data_root: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub email_draft_url: String,
    pub email_draft_token: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("OB_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid OB_LISTEN_ADDR");
        let db_path = std::env::var("OB_DB_PATH").unwrap_or_else(|_| "./data/obligo.db".into());
        let data_root = std::env::var("OB_DATA_ROOT").unwrap_or_else(|_| "./data".into());
        let cors_allow = std::env::var("OB_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("OB_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let email_draft_url = std::env::var("OB_EMAIL_DRAFT_URL")
            .unwrap_or_else(|_| "http://localhost:8090".into());
        let email_draft_token = std::env::var("OB_EMAIL_DRAFT_TOKEN").unwrap_or_default();
        Self {
            listen_addr,
            db_path,
            data_root,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            email_draft_url,
            email_draft_token,
        }
    }
}
