//! Build script for sporlrec.
//!
//! Copies the `.env.example` configuration template into the user's local data
//! directory so it sits next to the `.env` file the application reads:
//! - Linux: `~/.local/share/sporlrec/.env.example`
//! - macOS: `~/Library/Application Support/sporlrec/.env.example`
//! - Windows: `%LOCALAPPDATA%/sporlrec/.env.example`
//!
//! A missing template produces a cargo warning instead of failing the build.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("sporlrec");

    if env_example_path.is_file() {
        // A read-only home (CI sandboxes) must not break the build.
        if let Err(e) = fs::create_dir_all(&out_dir)
            .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")))
        {
            println!(
                "cargo:warning=could not copy .env.example to {}: {}",
                out_dir.display(),
                e
            );
        }
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
