//! Check command implementation.

use anyhow::{Context, Result};
use snapshot_lint_core::{CheckError, Config, FinderOptions, RepositoryConfig, SnapshotFinder};
use snapshot_lint_repo::FsRepository;
use std::path::PathBuf;

use super::output::{self, Outcome};
use crate::config_lookup::ConfigSource;
use crate::OutputFormat;

/// Arguments of the check command.
#[derive(Debug, Clone)]
pub struct CheckArgs {
    /// Project descriptor or checkout directory.
    pub path: PathBuf,
    /// `--verbose`.
    pub verbose: bool,
    /// `--fail-early`.
    pub fail_early: bool,
    /// `--group-id`, appended to the configured groups.
    pub group_ids: Vec<String>,
    /// `--local`, replaces the configured local repository.
    pub local: Option<PathBuf>,
    /// `--repository`, appended to the configured remotes.
    pub repositories: Vec<PathBuf>,
    /// `--format`.
    pub format: OutputFormat,
}

/// Runs the check command.
pub fn run(args: CheckArgs, source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let options = merge_options(&config, &args);
    let repository = FsRepository::from_config(&merge_repository(&config.repository, &args));

    tracing::debug!("Local repository: {}", repository.local().display());

    let root = repository
        .load_project(&args.path)
        .with_context(|| format!("Failed to load project: {}", args.path.display()))?;

    let finder = SnapshotFinder::new(&repository, options);

    // Text output relies on the finder's own error log; other formats need
    // the full report.
    let outcome = match args.format {
        OutputFormat::Text => match finder.check(&root) {
            Ok(()) => Outcome::Clean {
                root: root.coordinate.clone(),
            },
            Err(CheckError::Couplings(report)) => Outcome::Couplings(report),
            Err(CheckError::Immediate(finding)) => Outcome::Immediate(finding),
        },
        OutputFormat::Json | OutputFormat::Compact => match finder.audit(&root) {
            Ok(report) if report.has_couplings() => Outcome::Couplings(Box::new(report)),
            Ok(report) => Outcome::Clean { root: report.root },
            Err(CheckError::Immediate(finding)) => Outcome::Immediate(finding),
            Err(CheckError::Couplings(report)) => Outcome::Couplings(report),
        },
    };

    output::print(&outcome, args.format)?;

    if !outcome.is_clean() {
        std::process::exit(1);
    }

    Ok(())
}

/// Command-line switches can only turn modes on; group ids accumulate.
fn merge_options(config: &Config, args: &CheckArgs) -> FinderOptions {
    let base = config.finder_options();
    let verbose = base.verbose || args.verbose;
    let fail_early = base.fail_early || args.fail_early;
    base.verbose(verbose)
        .fail_early(fail_early)
        .group_ids(args.group_ids.iter().cloned())
}

fn merge_repository(config: &RepositoryConfig, args: &CheckArgs) -> RepositoryConfig {
    let mut merged = config.clone();
    if let Some(local) = &args.local {
        merged.local = Some(local.clone());
    }
    merged.remotes.extend(args.repositories.iter().cloned());
    merged
}
