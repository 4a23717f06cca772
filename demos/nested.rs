//! Example demonstrating prefix paths through nested structs

use envbind::{EnvBind, Options, Snapshot};
use std::time::Duration;

#[derive(Debug, Default, EnvBind)]
struct Database {
    #[env("HOST,default=localhost")]
    pub host: String,

    #[env("PORT,default=5432")]
    pub port: u16,
}

#[derive(Debug, Default, EnvBind)]
struct Tls {
    #[env("CERT,required=true")]
    pub cert: String,
}

#[derive(Debug, Default, EnvBind)]
#[env(prefix = "MYAPP")]
struct Config {
    // MYAPP_TIMEOUT
    #[env("TIMEOUT,default=30s")]
    pub timeout: Duration,

    // MYAPP_DATABASE_HOST, MYAPP_DATABASE_PORT
    pub database: Database,

    // MYAPP_TLS_CERT; the struct is always created so required fields are checked
    pub tls: Option<Tls>,
}

fn main() -> anyhow::Result<()> {
    let env: Snapshot = [
        ("MYAPP_DATABASE_HOST", "db.internal"),
        ("MYAPP_TIMEOUT", "1m30s"),
        ("MYAPP_TLS_CERT", "/etc/tls/cert.pem"),
    ]
    .into_iter()
    .collect();

    let config = Config::from_snapshot(&env, &Options::default())?;

    println!("Configuration with prefix 'MYAPP':");
    println!("  Timeout: {:?}", config.timeout);
    println!("  Database: {}:{}", config.database.host, config.database.port);
    if let Some(tls) = &config.tls {
        println!("  TLS cert: {}", tls.cert);
    }

    Ok(())
}
