use anyhow::Context;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub bind_addr: String,
    pub template_dir: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // A missing .env is fine, the variables may come from the environment.
        dotenvy::dotenv().ok();
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "debug".into());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
        let template_dir = env::var("TEMPLATE_DIR").unwrap_or_else(|_| "templates".into());

        Ok(Self {
            database_url,
            rust_log,
            bind_addr,
            template_dir,
        })
    }
}
