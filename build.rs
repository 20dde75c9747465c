//! Build script for the Spotify backend-for-frontend.
//!
//! Installs the `.env.example` configuration template into the directory the
//! service reads its `.env` from at startup.

use std::{env, fs, path::PathBuf};

/// Variables `sporlgate serve` refuses to start without.
const REQUIRED_KEYS: [&str; 3] = [
    "SPOTIFY_API_AUTH_CLIENT_ID",
    "SPOTIFY_API_AUTH_CLIENT_SECRET",
    "SPOTIFY_API_REDIRECT_URI",
];

/// Copies `.env.example` to `<data_local_dir>/<package>/.env.example`.
///
/// The template is checked for the required Spotify keys; missing ones and a
/// missing template produce cargo warnings only. An existing `.env` in the
/// destination is never touched.
///
/// # Destination
///
/// - Linux: `~/.local/share/sporlgate/.env.example`
/// - macOS: `~/Library/Application Support/sporlgate/.env.example`
/// - Windows: `%LOCALAPPDATA%/sporlgate/.env.example`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let package = env::var("CARGO_PKG_NAME")?;
    let template_path = manifest_dir.join(".env.example");

    let Ok(template) = fs::read_to_string(&template_path) else {
        println!(
            "cargo:warning={package}: no config template at {}, `{package} serve` will need the Spotify client settings in the process environment",
            template_path.display()
        );
        return Ok(());
    };

    let declared: Vec<&str> = template
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, _)| key.trim())
        .collect();
    for key in REQUIRED_KEYS.iter().filter(|key| !declared.contains(key)) {
        println!("cargo:warning={package}: config template does not declare {key}");
    }

    let config_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(&package);
    fs::create_dir_all(&config_dir)?;
    fs::write(config_dir.join(".env.example"), template)?;

    Ok(())
}
