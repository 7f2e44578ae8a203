// build.rs

use std::env;

fn main() -> anyhow::Result<()> {
    // Compile-time defaults; the same variables are also read at runtime
    // and take precedence when set in the server environment.

    let api_port = env::var("API_PORT").unwrap_or_else(|_| "8080".into());
    let data_dir = env::var("WORKSHOP_DATA").unwrap_or_else(|_| "workshop-data".into());

    println!("cargo:rustc-env=API_PORT={api_port}");
    println!("cargo:rustc-env=WORKSHOP_DATA={data_dir}");

    Ok(())
}

// EOF
