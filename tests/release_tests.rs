//! End-to-end releases against a real git repository with a bare `origin`.
//!
//! Publishing is disabled with `--no-publish`; everything up to and including
//! the push runs for real.

mod common;

use std::fs;

use common::*;
use predicates::prelude::*;

#[test]
fn test_release_commits_tags_and_pushes() {
    if !git_available() {
        return;
    }
    let fixture = GitFixture::new(true);
    let work = fixture.work();

    run_release(&work, &["1.3.0", "--no-publish"])
        .success()
        .stdout(predicate::str::contains("> Executing: git push origin main --tags"))
        .stdout(predicate::str::contains("publishing skipped"));

    let manifest = fs::read_to_string(work.join("Cargo.toml")).unwrap();
    assert_eq!(manifest, MANIFEST.replace("version = \"1.2.3\"", "version = \"1.3.0\""));

    let readme = fs::read_to_string(work.join("README.md")).unwrap();
    assert!(readme.contains("enum-table = \"1.3\"\n"));
    assert!(readme.contains(r#"enum-table = { version = "1.3", features = ["x"] }"#));

    assert_eq!(git(&work, &["log", "-1", "--format=%s"]), "chore: release v1.3.0");
    assert_eq!(
        git(&work, &["show", "--name-only", "--format=", "HEAD"]),
        "Cargo.toml\nREADME.md"
    );
    assert_eq!(
        fixture.remote_tags(),
        vec!["enum-table-derive-v1.3.0", "enum-table-v1.3.0"]
    );
    assert_eq!(
        git(&fixture.remote(), &["log", "-1", "--format=%s", "main"]),
        "chore: release v1.3.0"
    );
    assert!(!work.join("target/release-bump-state.json").exists());
}

#[test]
fn test_release_without_readme_commits_manifest_only() {
    if !git_available() {
        return;
    }
    let fixture = GitFixture::new(false);
    let work = fixture.work();

    run_release(&work, &["2.0.0", "--no-publish"])
        .success()
        .stderr(predicate::str::contains("README.md not found"));

    assert_eq!(
        git(&work, &["show", "--name-only", "--format=", "HEAD"]),
        "Cargo.toml"
    );
    assert!(!work.join("README.md").exists());
}

#[test]
fn test_failed_tag_stops_before_push_then_resumes() {
    if !git_available() {
        return;
    }
    let fixture = GitFixture::new(true);
    let work = fixture.work();

    // The derive tag already exists, so the second `git tag` fails.
    git(&work, &["tag", "enum-table-derive-v1.3.0"]);

    run_release(&work, &["1.3.0", "--no-publish"])
        .code(1)
        .stderr(predicate::str::contains(
            "Error executing command: git tag enum-table-derive-v1.3.0",
        ))
        .stderr(predicate::str::contains("--resume"))
        .stdout(predicate::str::contains("git push").not());

    // Commit and first tag stay; nothing reached the remote.
    assert_eq!(git(&work, &["log", "-1", "--format=%s"]), "chore: release v1.3.0");
    assert!(fixture.remote_tags().is_empty());
    assert!(work.join("target/release-bump-state.json").exists());

    // A fresh run is refused while the release is unfinished.
    run_release(&work, &["1.3.0", "--no-publish"])
        .code(1)
        .stderr(predicate::str::contains("rerun with --resume"));

    git(&work, &["tag", "-d", "enum-table-derive-v1.3.0"]);

    run_release(&work, &["1.3.0", "--no-publish", "--resume"])
        .success()
        .stdout(predicate::str::contains("Resuming release"))
        .stdout(predicate::str::contains("git commit").not());

    assert_eq!(
        fixture.remote_tags(),
        vec!["enum-table-derive-v1.3.0", "enum-table-v1.3.0"]
    );
    assert!(!work.join("target/release-bump-state.json").exists());
}

#[test]
fn test_push_to_missing_remote_fails() {
    if !git_available() {
        return;
    }
    let fixture = GitFixture::new(true);
    let work = fixture.work();

    run_release(&work, &["1.3.0", "--no-publish", "--remote", "nowhere"])
        .code(1)
        .stderr(predicate::str::contains(
            "Error executing command: git push nowhere main --tags",
        ));

    assert!(fixture.remote_tags().is_empty());
}

#[test]
fn test_release_table_in_manifest() {
    if !git_available() {
        return;
    }
    let fixture = GitFixture::new(false);
    let work = fixture.work();

    let manifest = format!(
        "{}\n[workspace.metadata.release]\ncrates = [\"enum-table\"]\n",
        MANIFEST
    );
    fs::write(work.join("Cargo.toml"), &manifest).unwrap();
    git(&work, &["commit", "--quiet", "-am", "configure release"]);

    run_release(&work, &["1.2.4", "--no-publish"]).success();

    assert_eq!(fixture.remote_tags(), vec!["enum-table-v1.2.4"]);
}

#[test]
fn test_manifest_path_from_outside_the_repository() {
    if !git_available() {
        return;
    }
    let fixture = GitFixture::new(true);
    let work = fixture.work();

    run_release(
        fixture.root.path(),
        &["--manifest-path", "work/Cargo.toml", "1.3.0", "--no-publish"],
    )
    .success()
    .stdout(predicate::str::contains("> Executing: git add Cargo.toml README.md"));

    assert_eq!(git(&work, &["log", "-1", "--format=%s"]), "chore: release v1.3.0");
    assert_eq!(
        git(&work, &["show", "--name-only", "--format=", "HEAD"]),
        "Cargo.toml\nREADME.md"
    );
    assert_eq!(
        fixture.remote_tags(),
        vec!["enum-table-derive-v1.3.0", "enum-table-v1.3.0"]
    );
    assert!(!work.join("target/release-bump-state.json").exists());
}

#[test]
fn test_version_line_with_trailing_comment_is_refused() {
    if !git_available() {
        return;
    }
    let fixture = GitFixture::new(true);
    let work = fixture.work();

    let manifest = MANIFEST.replace(
        "version = \"1.2.3\"\n",
        "version = \"1.2.3\" # keep in sync\n",
    );
    fs::write(work.join("Cargo.toml"), &manifest).unwrap();
    git(&work, &["commit", "--quiet", "-am", "annotate version"]);

    run_release(&work, &["1.3.0", "--no-publish"])
        .code(1)
        .stderr(predicate::str::contains("must be exactly"))
        .stdout(predicate::str::contains("> Executing").not());

    assert_eq!(fs::read_to_string(work.join("Cargo.toml")).unwrap(), manifest);
    assert_eq!(fs::read_to_string(work.join("README.md")).unwrap(), README);
    assert!(fixture.remote_tags().is_empty());
}
