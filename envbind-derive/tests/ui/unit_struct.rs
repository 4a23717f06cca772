// This test verifies that unit structs are rejected

use envbind::EnvBind;

#[derive(Default, EnvBind)]
struct Marker;

fn main() {
    let _ = Marker;
}
