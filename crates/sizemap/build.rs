//! Embeds build date and git revision for `sizemap version`

use std::process::Command;

fn main() {
    let today = chrono::Utc::now().format("%Y-%m-%d");
    println!("cargo:rustc-env=BUILD_DATE={}", today);

    if let Some(sha) = git_short_sha() {
        println!("cargo:rustc-env=GIT_SHA={}", sha);
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
}

fn git_short_sha() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}
