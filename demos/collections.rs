//! Example demonstrating list and map values

use envbind::{EnvBind, Options, Snapshot};
use std::collections::HashMap;

#[derive(Debug, Default, EnvBind)]
struct Config {
    // Comma-separated, elements are trimmed. Tags split on commas too, so a
    // default can only hold a single element.
    #[env("ALLOWED_PORTS,default=80")]
    pub allowed_ports: Vec<u16>,

    // Semicolon-separated key=value entries
    #[env("RATE_LIMITS")]
    pub rate_limits: HashMap<String, u32>,

    // Several candidate names, the first one present wins
    #[env("HOSTS,UPSTREAMS")]
    pub hosts: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let env: Snapshot = [
        ("ALLOWED_PORTS", "8080, 8443"),
        ("RATE_LIMITS", "api=100; web=1000"),
        ("UPSTREAMS", "a.internal,b.internal"),
    ]
    .into_iter()
    .collect();

    let config = Config::from_snapshot(&env, &Options::default().ignore_prefix(true))?;

    println!("Configuration loaded:");
    println!("  Allowed ports: {:?}", config.allowed_ports);
    println!("  Rate limits: {:?}", config.rate_limits);
    println!("  Hosts: {:?}", config.hosts);

    Ok(())
}
