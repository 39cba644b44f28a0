//! Build script for the storefront crate.
//!
//! Fingerprints the stylesheet so it can be served with an immutable cache
//! lifetime. The short hash is exposed to the crate as `CSS_HASH`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

const HASH_LEN: usize = 8;

fn main() {
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo"));
    fingerprint_stylesheet(&manifest_dir.join("static/css"));
}

/// Copy `main.css` to `derived/main.<hash>.css` and export the hash.
///
/// An empty `CSS_HASH` means the stylesheet is served unhashed.
fn fingerprint_stylesheet(css_dir: &Path) {
    let source = css_dir.join("main.css");
    println!("cargo:rerun-if-changed={}", source.display());

    let Ok(content) = fs::read(&source) else {
        println!("cargo:warning=stylesheet not found at {}", source.display());
        println!("cargo:rustc-env=CSS_HASH=");
        return;
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short = digest.get(..HASH_LEN).unwrap_or(&digest);
    println!("cargo:rustc-env=CSS_HASH={short}");

    let derived_dir = css_dir.join("derived");
    fs::create_dir_all(&derived_dir).expect("Failed to create derived CSS directory");
    fs::write(derived_dir.join(format!("main.{short}.css")), &content)
        .expect("Failed to write fingerprinted stylesheet");
}
