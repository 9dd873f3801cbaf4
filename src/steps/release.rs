//! Orchestration of a release.
//!
//! File updates go through a `Transaction`; external commands run in plan
//! order and stop at the first failure. Completed steps are never undone.
//! Instead, the resume cursor records how far the release got so that
//! `--resume` can pick it up after the problem is fixed.

use crate::cli::ReleaseArgs;
use crate::config::ReleaseConfig;
use crate::error::{ReleaseError, Result};
use crate::exec::{CommandRunner, OnFailure, SystemRunner, run_command};
use crate::fs::transaction::Transaction;
use crate::rewrite::{current_version, update_docs, update_manifest_version};
use crate::steps::plan::{ReleasePlan, Step};
use crate::steps::state::ReleaseState;
use crate::verify::{check_version_order, read_manifest, validate_target_version};
use crate::version::Version;

use colored::Colorize;
use std::path::{Path, PathBuf};

/// Executes a release with the system `git` and `cargo`.
///
/// ## Phases
///
/// 1. Validate the target version
/// 2. Read the manifest and resolve configuration
/// 3. Check the ordering guard against the current version
/// 4. Stage and commit the manifest and documentation rewrites
/// 5. Run the plan: add, commit, tag per crate, push, publish per crate
///
/// With `--resume`, phases 3 and 4 are skipped and the plan continues from
/// the recorded cursor.
///
/// Commands run in the manifest's directory.
pub fn execute(args: ReleaseArgs) -> Result<()> {
    let mut runner = match args.manifest_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => SystemRunner::in_dir(dir),
        _ => SystemRunner::new(),
    };
    execute_with(&args, &mut runner)
}

/// Executes a release using `runner` for every external command.
///
/// Staged paths are passed to git relative to the manifest's directory, so
/// `runner` is expected to run there.
pub fn execute_with(args: &ReleaseArgs, runner: &mut dyn CommandRunner) -> Result<()> {
    let target = validate_target_version(&args.new_version)?;
    let content = read_manifest(&args.manifest_path)?;
    let config = ReleaseConfig::resolve(args, &content)?;

    let state_path = config.state_path();
    let recorded = ReleaseState::load(&state_path)?;

    if args.resume {
        let state = recorded.ok_or_else(|| ReleaseError::NothingToResume(state_path.clone()))?;
        let plan = ReleasePlan::new(&config, target, stage_paths(&config));
        state.check_plan(&plan)?;

        let found = current_version(&config.manifest_path, &content)?;
        if found != state.version {
            return Err(ReleaseError::ResumeNotBumped {
                recorded: state.version,
                found,
                state_path,
            });
        }

        println!(
            "{} v{} ({}/{} steps already done)",
            "Resuming release".bold().cyan(),
            target,
            state.completed,
            plan.len()
        );
        return run_plan(&plan, state, &state_path, runner);
    }

    if let Some(state) = recorded {
        return Err(ReleaseError::ReleaseInProgress(state.version));
    }

    let current = current_version(&config.manifest_path, &content)?;
    println!("Current version: {}", current.yellow());
    check_version_order(&current, &target, config.comparison)?;
    println!("Updating version to: {}", target.to_string().green());

    let mut txn = Transaction::new(config.dry_run);
    if let Err(e) = stage_file_updates(&config, &content, &target, &mut txn) {
        return handle_staging_error(e, txn);
    }

    let plan = ReleasePlan::new(&config, target, stage_paths(&config));
    let root = config.root();

    if config.dry_run {
        txn.commit()?;
        txn.print_summary(root);
        plan.print(0);
        println!(
            "\n{} Run without {} to apply.",
            "DRY RUN - no changes were made.".yellow().bold(),
            "--dry-run".cyan()
        );
        return Ok(());
    }

    let state = ReleaseState::new(&plan);
    state.save(&state_path)?;

    if let Err(e) = txn.commit() {
        eprintln!("{} {}", "Error while writing files:".red().bold(), e);
        if let Err(remove_err) = ReleaseState::remove(&state_path) {
            log::warn!("Could not remove {}: {}", state_path.display(), remove_err);
        }
        return Err(e);
    }
    txn.print_summary(root);

    println!("\n{}", "Starting Git and Cargo operations...".bold());
    run_plan(&plan, state, &state_path, runner)
}

/// Manifest first, then the documentation file if present, relative to the
/// manifest's directory.
fn stage_paths(config: &ReleaseConfig) -> Vec<PathBuf> {
    let root = config.root();
    let mut paths = vec![relative_to(&config.manifest_path, root)];
    if config.readme_path.exists() {
        paths.push(relative_to(&config.readme_path, root));
    }
    paths
}

fn relative_to(path: &Path, root: &Path) -> PathBuf {
    pathdiff::diff_paths(path, root)
        .or_else(|| std::path::absolute(path).ok())
        .unwrap_or_else(|| path.to_path_buf())
}

fn stage_file_updates(
    config: &ReleaseConfig,
    manifest_content: &str,
    target: &Version,
    txn: &mut Transaction,
) -> Result<()> {
    update_manifest_version(&config.manifest_path, manifest_content, target, txn)?;
    update_docs(&config.readme_path, &config.docs_crate, target, txn)?;

    log::debug!("Staged {} file update(s)", txn.len());
    Ok(())
}

fn handle_staging_error(e: ReleaseError, txn: Transaction) -> Result<()> {
    eprintln!("{} {}", "Error while preparing files:".red().bold(), e);

    if !txn.is_empty() {
        eprintln!("{} No files were changed.", "ℹ".blue().bold());
    }

    Err(e)
}

/// Runs the plan from `state.completed`, advancing the cursor after each step.
fn run_plan(
    plan: &ReleasePlan,
    mut state: ReleaseState,
    state_path: &Path,
    runner: &mut dyn CommandRunner,
) -> Result<()> {
    let total = plan.len();

    for (idx, step) in plan.steps().iter().enumerate().skip(state.completed) {
        if let Step::Publish { crate_name } = step {
            println!("\nPublishing {} to crates.io...", crate_name.bold());
        }
        log::info!("Step {}/{}: {}", idx + 1, total, step);

        if let Err(e) = run_command(runner, &plan.invocation(step), OnFailure::Abort) {
            report_interruption(plan, idx);
            return Err(e);
        }

        state.completed = idx + 1;
        state.save(state_path)?;

        if matches!(step, Step::Push { .. }) {
            println!(
                "\nVersion updated to {} and changes pushed to git.",
                plan.version().to_string().green()
            );
        }
    }

    ReleaseState::remove(state_path)?;

    let published = plan
        .steps()
        .iter()
        .any(|step| matches!(step, Step::Publish { .. }));
    if published {
        println!("\n{}", "✓ All crates published successfully!".green().bold());
    } else {
        println!(
            "\n{} v{} tagged and pushed; publishing skipped.",
            "✓".green().bold(),
            plan.version()
        );
    }

    Ok(())
}

fn report_interruption(plan: &ReleasePlan, failed: usize) {
    let step = &plan.steps()[failed];
    eprintln!(
        "{} at step {}/{} ({}).",
        "Release stopped".red().bold(),
        failed + 1,
        plan.len(),
        step
    );
    if failed > 0 {
        eprintln!("Steps 1-{} were applied and have not been undone.", failed);
    }
    eprintln!(
        "{} fix the problem, then rerun with {} to continue from this step.",
        "Hint:".yellow().bold(),
        "--resume".cyan()
    );
}
