//! Basic example of binding a flat struct from the process environment

use envbind::EnvBind;

#[derive(Debug, Default, EnvBind)]
struct Config {
    // Reads CONFIG_PORT, falls back to 8080
    #[env("PORT,default=8080")]
    pub port: u16,

    // Reads CONFIG_USERNAME, fails when unset
    #[env("USERNAME,required=true")]
    pub username: String,

    // Reads CONFIG_DEBUG, blank or unset means false
    pub debug: bool,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("CONFIG_USERNAME", "admin");
    std::env::set_var("CONFIG_DEBUG", "true");

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Port: {}", config.port);
    println!("  Username: {}", config.username);
    println!("  Debug: {}", config.debug);

    Ok(())
}
