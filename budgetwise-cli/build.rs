use std::env;
use std::path::Path;
use std::process::Command;

// Version suffix for `budgetwise --version`: "<describe>, <profile>".
// BUDGETWISE_VERSION_TAG wins over git so tarball builds can set it.
fn main() {
    println!("cargo:rerun-if-env-changed=BUDGETWISE_VERSION_TAG");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let repo_root = Path::new(&manifest_dir).join("..");

    let git_dir = repo_root.join(".git");
    if git_dir.exists() {
        println!("cargo:rerun-if-changed={}", git_dir.join("HEAD").display());
        println!("cargo:rerun-if-changed={}", git_dir.join("index").display());
    }

    let describe = env::var("BUDGETWISE_VERSION_TAG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| git_describe(&repo_root))
        .unwrap_or_else(|| "no-git".to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=BUDGETWISE_BUILD_INFO={}, {}", describe, profile);
}

fn git_describe(repo_root: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo_root)
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let s = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!s.is_empty()).then_some(s)
}
