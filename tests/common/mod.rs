//! Shared fixtures for release-bump integration tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

#[allow(unused)]
pub const MANIFEST: &str = r#"[workspace]
members = ["enum-table", "enum-table-derive"]
resolver = "2"

[workspace.package]
version = "1.2.3"
edition = "2024"
license = "MIT"
"#;

#[allow(unused)]
pub const README: &str = r#"# enum-table

```toml
[dependencies]
enum-table = "1.2"
```

```toml
[dependencies]
enum-table = { version = "1.2", features = ["x"] }
```
"#;

/// Creates a directory holding `Cargo.toml` and, optionally, `README.md`.
#[allow(unused)]
pub fn create_release_dir(with_readme: bool) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("Cargo.toml"), MANIFEST).unwrap();
    if with_readme {
        fs::write(temp.path().join("README.md"), README).unwrap();
    }
    temp
}

/// Runs `release-bump` in `dir` with a sandboxed git identity and plain output.
pub fn run_release(dir: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("release-bump");
    cmd.args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    for (key, value) in git_env() {
        cmd.env(key, value);
    }
    cmd.assert()
}

fn git_env() -> [(&'static str, &'static str); 6] {
    [
        ("GIT_AUTHOR_NAME", "Release Bot"),
        ("GIT_AUTHOR_EMAIL", "release@example.com"),
        ("GIT_COMMITTER_NAME", "Release Bot"),
        ("GIT_COMMITTER_EMAIL", "release@example.com"),
        ("GIT_CONFIG_GLOBAL", "/dev/null"),
        ("GIT_CONFIG_NOSYSTEM", "1"),
    ]
}

/// Runs git in `dir`, panicking on failure. Returns trimmed stdout.
#[allow(unused)]
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .envs(git_env())
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[allow(unused)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A work repository on branch `main` with an `origin` bare remote.
#[allow(unused)]
pub struct GitFixture {
    pub root: TempDir,
}

#[allow(unused)]
impl GitFixture {
    pub fn new(with_readme: bool) -> Self {
        let root = TempDir::new().unwrap();
        let remote = root.path().join("remote.git");
        let work = root.path().join("work");
        fs::create_dir(&remote).unwrap();
        fs::create_dir(&work).unwrap();

        git(&remote, &["init", "--bare", "--quiet"]);
        git(&work, &["init", "--quiet"]);
        git(&work, &["checkout", "--quiet", "-b", "main"]);

        fs::write(work.join("Cargo.toml"), MANIFEST).unwrap();
        if with_readme {
            fs::write(work.join("README.md"), README).unwrap();
        }
        fs::write(work.join(".gitignore"), "target/\n").unwrap();

        git(&work, &["add", "."]);
        git(&work, &["commit", "--quiet", "-m", "initial"]);
        git(&work, &["remote", "add", "origin", remote.to_str().unwrap()]);

        Self { root }
    }

    pub fn work(&self) -> std::path::PathBuf {
        self.root.path().join("work")
    }

    pub fn remote(&self) -> std::path::PathBuf {
        self.root.path().join("remote.git")
    }

    /// Tags present in the bare remote, sorted.
    pub fn remote_tags(&self) -> Vec<String> {
        let out = git(&self.remote(), &["tag", "--list"]);
        let mut tags: Vec<String> = out.lines().map(str::to_string).collect();
        tags.sort();
        tags
    }
}
