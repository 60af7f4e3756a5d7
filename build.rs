//! Build script for prepos - embeds version information for `--version`.
//!
//! `BUILD_INFO_HUMAN` is `{CARGO_PKG_VERSION} ({git}) {rustc --version}`,
//! where `{git}` is `git describe --tags --always --dirty` when a tag is
//! reachable, and otherwise `v{CARGO_PKG_VERSION}-{timestamp}-{commit}`
//! with a `+dirty` suffix for uncommitted changes. Parts that cannot be
//! determined (no git, no rustc on PATH) are left out.

use std::{env, process::Command};

use chrono::{DateTime, Utc};

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

fn main() {
    ["src", "build.rs", "Cargo.toml", "Cargo.lock"]
        .iter()
        .for_each(|path| println!("cargo:rerun-if-changed={path}"));

    println!("cargo:rustc-env=BUILD_INFO_HUMAN={}", build_info());
}

fn run(program: &str, args: &[&str]) -> Option<String> {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn git(args: &[&str]) -> Option<String> {
    run("git", args)
}

// `cargo install --git` drops a .cargo-ok marker into the checkout.
fn is_dirty() -> Option<bool> {
    git(&["status", "--porcelain"])
        .map(|status| status.lines().any(|line| !line.ends_with(" .cargo-ok")))
        .or_else(|| git(&["rev-parse", "HEAD"]).map(|_| false))
}

fn git_version() -> String {
    match git(&["describe", "--tags", "--always", "--dirty"]) {
        Some(desc) if desc.contains('v') || desc.contains("-g") => desc,
        _ => pseudo_version(),
    }
}

/// Clean builds use the commit time so the same commit always yields the
/// same version; dirty builds and builds outside git use the build time.
fn pseudo_version() -> String {
    let commit = git(&["rev-parse", "--short=12", "HEAD"]).unwrap_or_else(|| "unknown".into());
    let dirty = is_dirty();

    let commit_time = match dirty {
        Some(false) => git(&["log", "-1", "--format=%ct"])
            .and_then(|secs| secs.parse::<i64>().ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        _ => None,
    };
    let timestamp = commit_time
        .unwrap_or_else(Utc::now)
        .format(TIMESTAMP_FORMAT)
        .to_string();

    let suffix = if dirty == Some(true) { "+dirty" } else { "" };

    format!(
        "v{}-{timestamp}-{commit}{suffix}",
        env!("CARGO_PKG_VERSION")
    )
}

fn build_info() -> String {
    [
        Some(env::var("CARGO_PKG_VERSION").unwrap_or_default()),
        Some(format!("({})", git_version())),
        run("rustc", &["--version"]),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}
