use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    let n = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    println!("cargo:rustc-env=SBOLPLOT_BUILD_N={n}");
    println!(
        "cargo:rustc-env=SBOLPLOT_DISPLAY_VERSION={}",
        std::env::var("CARGO_PKG_VERSION").unwrap_or_default()
    );
}
