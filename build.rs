use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output();

    let pkg_version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();

    let version = match output {
        Ok(o) if o.status.success() => {
            let git_output = String::from_utf8(o.stdout)
                .unwrap_or_default()
                .trim()
                .to_string();

            // "v0.1.0" -> "0.1.0"
            let described = git_output.strip_prefix('v').unwrap_or(&git_output);

            if described.is_empty() || described == pkg_version {
                pkg_version
            } else {
                format!("{} ({})", pkg_version, described)
            }
        }
        // Not a git checkout (e.g. a published crate): the manifest version is all we have
        _ => pkg_version,
    };

    println!("cargo:rustc-env=ACTORHUB_CLI_VERSION={}", version);
}
