//! The ordered list of release steps.

use crate::config::ReleaseConfig;
use crate::exec::Invocation;
use crate::version::Version;
use colored::Colorize;
use std::fmt;
use std::path::PathBuf;

/// One externally visible release action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Stage the bumped files.
    Stage { paths: Vec<PathBuf> },
    /// Commit the staged files.
    Commit,
    /// Create the `<crate>-v<version>` tag.
    Tag { crate_name: String },
    /// Push the branch together with all tags.
    Push { remote: String, branch: String },
    /// Publish one package to the registry.
    Publish { crate_name: String },
}

/// The release steps for one version, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    version: Version,
    steps: Vec<Step>,
}

impl ReleasePlan {
    /// Builds the plan.
    ///
    /// `stage_paths` is the manifest, followed by the documentation file if it
    /// exists.
    pub fn new(config: &ReleaseConfig, version: Version, stage_paths: Vec<PathBuf>) -> Self {
        let mut steps = vec![Step::Stage { paths: stage_paths }, Step::Commit];

        steps.extend(config.crates.iter().map(|name| Step::Tag {
            crate_name: name.clone(),
        }));

        steps.push(Step::Push {
            remote: config.remote.clone(),
            branch: config.branch.clone(),
        });

        if config.publish {
            steps.extend(config.crates.iter().map(|name| Step::Publish {
                crate_name: name.clone(),
            }));
        }

        Self { version, steps }
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Tag name for a package at this plan's version.
    pub fn tag_name(&self, crate_name: &str) -> String {
        format!("{}-v{}", crate_name, self.version)
    }

    pub fn commit_message(&self) -> String {
        format!("chore: release v{}", self.version)
    }

    /// The command that performs `step`.
    pub fn invocation(&self, step: &Step) -> Invocation {
        match step {
            Step::Stage { paths } => {
                let mut args = vec!["add".to_string()];
                args.extend(paths.iter().map(|p| p.to_string_lossy().into_owned()));
                Invocation::git(args)
            }
            Step::Commit => Invocation::git(["commit", "-m", self.commit_message().as_str()]),
            Step::Tag { crate_name } => Invocation::git(["tag", self.tag_name(crate_name).as_str()]),
            Step::Push { remote, branch } => {
                Invocation::git(["push", remote.as_str(), branch.as_str(), "--tags"])
            }
            Step::Publish { crate_name } => {
                Invocation::cargo(["publish", "-p", crate_name.as_str()])
            }
        }
    }

    /// Textual form of every step's command, used to detect a changed plan on resume.
    pub fn commands(&self) -> Vec<String> {
        self.steps
            .iter()
            .map(|step| self.invocation(step).to_string())
            .collect()
    }

    /// Prints the plan, marking the first `completed` steps as done.
    pub fn print(&self, completed: usize) {
        println!("\n{} v{}", "Release plan for".bold().cyan(), self.version);
        for (idx, step) in self.steps.iter().enumerate() {
            let marker = if idx < completed {
                "✓".green().to_string()
            } else {
                "•".to_string()
            };
            println!(
                "  {} {:<28} {}",
                marker,
                step.to_string(),
                self.invocation(step).to_string().dimmed()
            );
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Stage { paths } => write!(f, "Stage {} file(s)", paths.len()),
            Step::Commit => write!(f, "Commit"),
            Step::Tag { crate_name } => write!(f, "Tag {}", crate_name),
            Step::Push { remote, .. } => write!(f, "Push to {}", remote),
            Step::Publish { crate_name } => write!(f, "Publish {}", crate_name),
        }
    }
}
