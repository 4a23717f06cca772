// This test verifies that a field tag must be a single string literal

use envbind::EnvBind;

#[derive(Default, EnvBind)]
struct Config {
    #[env(PORT)]
    pub port: u16,
}

fn main() {
    let config = Config::default();
    let _ = config.port;
}
