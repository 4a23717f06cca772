//! Example of process bootstrap: logging, `.env` files, binding and templates
//!
//! Run with `RUST_LOG=envbind=debug` to see how each variable is resolved.

use envbind::template::{self, TemplateOptions};
use envbind::{dotenv, EnvBind, Options, Snapshot};
use std::path::Path;

#[derive(Debug, Default, EnvBind)]
struct Server {
    #[env("PORT,default=8080")]
    pub port: u16,

    #[env("USERNAME,required=true")]
    pub username: String,
}

fn init_tracing() {
    // Default to "info" if RUST_LOG is not set
    let default_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&default_level)),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Process variables take precedence over the .env file
    let mut env = Snapshot::from_process_env();
    if Path::new(".env").exists() {
        env.merge_missing(dotenv::from_path(".env")?);
    } else {
        env.merge_missing(dotenv::from_str("SERVER_USERNAME=demo\nSERVER_PORT=9090")?);
    }

    let server = Server::from_snapshot(&env, &Options::default())?;
    tracing::info!(port = server.port, username = %server.username, "server configuration loaded");

    let banner = template::expand(
        "Server ip is ${ip:=127.0.0.1}, port is ${server_port:=8080}, hello ${server_username}!",
        &env,
        &TemplateOptions::default(),
    )?;
    println!("{banner}");

    Ok(())
}
