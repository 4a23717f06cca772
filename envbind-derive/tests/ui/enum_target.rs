// This test verifies that deriving EnvBind on an enum is rejected

use envbind::EnvBind;

#[derive(EnvBind)]
enum Mode {
    Fast,
}

fn main() {
    let _ = Mode::Fast;
}
