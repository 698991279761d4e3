use std::path::{Path, PathBuf};
use std::process::Command;

/// `git describe` of the workspace checkout, e.g. `v0.3.0-4-g1a2b3c4-dirty`.
fn describe(workspace: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["describe", "--always", "--dirty", "--tags"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8(out.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

fn main() {
    let workspace = std::env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .and_then(|dir| dir.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from(".."));

    // Source tarballs have no .git; BARIK_BUILD_SHA lets packagers stamp one.
    let version = std::env::var("BARIK_BUILD_SHA")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| describe(&workspace))
        .unwrap_or_else(|| "unknown".to_owned());

    println!("cargo:rerun-if-env-changed=BARIK_BUILD_SHA");
    println!("cargo:rerun-if-changed={}", workspace.join(".git/HEAD").display());
    println!("cargo:rustc-env=BARIK_BUILD_SHA={version}");
}
