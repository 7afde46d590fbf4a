//! Build script to stamp version, commit and build date into the binary
//!
//! Release builds run on an exact tag; anything else reports `dev` so the
//! self-updater always treats it as older than a published release.

use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-env-changed=KETTLE_VERSION");

    let version = std::env::var("KETTLE_VERSION")
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| git(&["describe", "--tags", "--exact-match"]))
        .map(|v| v.trim_start_matches('v').to_string())
        .unwrap_or_else(|| "dev".to_string());

    let commit = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());

    let build_date = git(&["log", "-1", "--format=%cs"]).unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=KETTLE_VERSION={version}");
    println!("cargo:rustc-env=KETTLE_COMMIT={commit}");
    println!("cargo:rustc-env=KETTLE_BUILD_DATE={build_date}");
}
