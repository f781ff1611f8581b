use std::process::Command;

// Stamps the build with NEXUS_GIT_SHA for /health and the startup log.
// Release pipelines building from a tarball (no .git) can pass it in directly.
fn main() {
    println!("cargo:rerun-if-env-changed=NEXUS_GIT_SHA");

    let sha = std::env::var("NEXUS_GIT_SHA")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(git_short_sha)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=NEXUS_GIT_SHA={sha}");
}

fn git_short_sha() -> Option<String> {
    // Only watch git state when there is a repo to read it from.
    let git_dir = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())?;
    println!("cargo:rerun-if-changed={git_dir}/HEAD");
    println!("cargo:rerun-if-changed={git_dir}/refs/");

    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
}
