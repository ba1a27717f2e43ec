// Build metadata for `ffisync --version`.

use std::env;
use std::process::Command;

/// `git describe` of the checkout, or `None` outside a repository.
fn describe_checkout() -> Option<String> {
    let out = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8(out.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../../.git/HEAD");

    let revision = describe_checkout().unwrap_or_else(|| "untracked".into());
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".into());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".into());

    println!("cargo:rustc-env=FFISYNC_REVISION={revision}");
    println!("cargo:rustc-env=FFISYNC_TARGET={target}");
    println!("cargo:rustc-env=FFISYNC_PROFILE={profile}");
}
