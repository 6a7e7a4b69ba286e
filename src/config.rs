use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    /// Mount point of the protected scope. The OpenAPI path annotations in
    /// `api/` are literals written against the default `/api`; changing this
    /// moves the routes but not the docs.
    pub api_prefix: String,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_protected_per_min: u32,

    /// Balances given to newly created users when HR omits them
    pub default_paid_leave: u32,
    pub default_unpaid_leave: u32,

    /// Optional JSON fixture loaded into the user directory at startup
    pub seed_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_string()),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            rate_login_per_min: env::var("RATE_LOGIN_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),
            rate_protected_per_min: env::var("RATE_PROTECTED_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap_or(1000),

            default_paid_leave: env::var("DEFAULT_PAID_LEAVE")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .unwrap_or(20),
            default_unpaid_leave: env::var("DEFAULT_UNPAID_LEAVE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),

            seed_file: env::var("SEED_FILE").ok(),
        }
    }
}
