use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let git_hash = or_unknown(run("git", &["rev-parse", "--short", "HEAD"]));
    println!("cargo:rustc-env=IEXPENSE_BUILD_HASH={git_hash}");
    println!("cargo:rustc-env=IEXPENSE_BUILD_STATUS={}", git_status());

    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    println!("cargo:rustc-env=IEXPENSE_BUILD_TIMESTAMP={timestamp}");

    let target = env::var("TARGET").unwrap_or_else(|_| "unknown-target".to_string());
    println!("cargo:rustc-env=IEXPENSE_BUILD_TARGET={target}");

    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown-profile".to_string());
    println!("cargo:rustc-env=IEXPENSE_BUILD_PROFILE={profile}");

    let rustc_version = or_unknown(run("rustc", &["--version"]));
    println!("cargo:rustc-env=IEXPENSE_BUILD_RUSTC={rustc_version}");
}

fn or_unknown(value: String) -> String {
    if value.is_empty() {
        "unknown".to_string()
    } else {
        value
    }
}

fn git_status() -> &'static str {
    match Command::new("git").args(["status", "--porcelain"]).output() {
        Ok(output) if output.status.success() => {
            if output.stdout.iter().all(u8::is_ascii_whitespace) {
                "clean"
            } else {
                "dirty"
            }
        }
        _ => "unknown",
    }
}

fn run(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}
