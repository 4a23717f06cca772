// This test verifies that tuple structs are rejected, since their fields have no names to bind

use envbind::EnvBind;

#[derive(Default, EnvBind)]
struct Pair(pub u16, pub u16);

fn main() {
    let pair = Pair(1, 2);
    let _ = pair.0 + pair.1;
}
