//! Recursive snapshot-coupling finder.
//!
//! Walks a project's parent chain and its transitive dependency tree,
//! reporting every coordinate whose version is a SNAPSHOT. Each violation is
//! attributed to the direct dependency of the root that pulled it in, or to
//! the root's own ancestor chain.

use crate::coordinate::Coordinate;
use crate::descriptor::{Dependency, ProjectDescriptor, Repository};
use crate::ledger::{FailureLedger, LedgerKey};
use crate::path::{render_path, TraversalPath};
use crate::policy::SnapshotPolicy;
use crate::provider::{DescriptorProvider, ResolutionError};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use tracing::{debug, error, info};

/// Options recognized by [`SnapshotFinder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinderOptions {
    /// Report every violation immediately with its full path.
    pub verbose: bool,
    /// Abort on the first violation.
    pub fail_early: bool,
    /// Only report coordinates in these groups (empty = all groups).
    pub group_ids: BTreeSet<String>,
}

impl FinderOptions {
    /// Creates default options: summary mode, exhaustive, unrestricted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets verbose mode.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Sets fail-early mode.
    #[must_use]
    pub fn fail_early(mut self, fail_early: bool) -> Self {
        self.fail_early = fail_early;
        self
    }

    /// Adds a group to the allowlist.
    #[must_use]
    pub fn group_id(mut self, group: impl Into<String>) -> Self {
        self.group_ids.insert(group.into());
        self
    }

    /// Adds several groups to the allowlist.
    #[must_use]
    pub fn group_ids<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_ids.extend(groups.into_iter().map(Into::into));
        self
    }
}

/// What a [`Finding`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    /// A dependency resolved to a SNAPSHOT version.
    SnapshotVersion,
    /// A parent in an ancestor chain is a SNAPSHOT.
    SnapshotParent,
    /// A declared dependency could not be resolved.
    UnresolvedDependency,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SnapshotVersion => write!(f, "snapshot-version"),
            Self::SnapshotParent => write!(f, "snapshot-parent"),
            Self::UnresolvedDependency => write!(f, "unresolved-dependency"),
        }
    }
}

/// One recorded violation, with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// What was found.
    pub kind: FindingKind,
    /// The offending coordinate.
    pub coordinate: Coordinate,
    /// Direct dependency (or ancestor chain) the finding is attributed to.
    pub origin: LedgerKey,
    /// Path from the root to the node that declared or inherited the offender.
    pub trail: Vec<Coordinate>,
    /// Provider message for unresolved dependencies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Finding {
    /// Renders the path of this finding as an indented tree.
    #[must_use]
    pub fn path(&self) -> String {
        match self.kind {
            FindingKind::UnresolvedDependency => render_path(None, &self.trail),
            FindingKind::SnapshotVersion | FindingKind::SnapshotParent => {
                render_path(Some(&self.coordinate), &self.trail)
            }
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FindingKind::SnapshotVersion => write!(f, "Found SNAPSHOT version:\n{}", self.path()),
            FindingKind::SnapshotParent => write!(f, "Found SNAPSHOT parent:\n{}", self.path()),
            FindingKind::UnresolvedDependency => write!(
                f,
                "Could not resolve dependency: {} of path:\n{}",
                self.coordinate,
                self.path()
            ),
        }
    }
}

/// Everything a completed walk found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Root project coordinate.
    pub root: Coordinate,
    /// Couplings grouped by originating direct dependency.
    pub ledger: FailureLedger,
    /// Every finding, in discovery order.
    pub findings: Vec<Finding>,
    /// Number of parents and dependencies examined, root excluded.
    pub nodes_visited: usize,
    /// Whether the walk ran in verbose mode.
    pub verbose: bool,
}

impl AuditReport {
    /// Returns true if any coupling or unresolved dependency was recorded.
    #[must_use]
    pub fn has_couplings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Renders the report the way it is emitted to the error log.
    ///
    /// Verbose walks produce one message per finding; summary walks produce
    /// the grouped ledger.
    #[must_use]
    pub fn render(&self) -> String {
        if self.verbose {
            self.findings
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n\n")
        } else {
            self.ledger.render()
        }
    }
}

/// Failure outcomes of [`SnapshotFinder::check`].
#[derive(Debug, Error, Diagnostic)]
pub enum CheckError {
    /// The walk completed and recorded one or more couplings.
    #[error("Found one or more SNAPSHOT couplings. See error log for more information.")]
    #[diagnostic(
        code(snapshot_lint::couplings),
        help("release the listed artifacts or pin them to released versions")
    )]
    Couplings(Box<AuditReport>),

    /// Fail-early mode stopped at the first violation.
    #[error("{0}")]
    #[diagnostic(
        code(snapshot_lint::immediate),
        help("run without --fail-early to collect every coupling")
    )]
    Immediate(Box<Finding>),
}

impl CheckError {
    /// True if the walk was cut short by fail-early mode.
    #[must_use]
    pub fn was_immediate(&self) -> bool {
        matches!(self, Self::Immediate(_))
    }

    /// The full audit report, when the walk ran to completion.
    #[must_use]
    pub fn report(&self) -> Option<&AuditReport> {
        match self {
            Self::Couplings(report) => Some(report),
            Self::Immediate(_) => None,
        }
    }
}

/// Mutable state of one walk, threaded through the recursion.
#[derive(Debug, Default)]
struct Audit {
    ledger: FailureLedger,
    findings: Vec<Finding>,
    nodes_visited: usize,
}

/// Checks a project, its dependencies and every ancestor chain for SNAPSHOT
/// couplings.
///
/// Use [`SnapshotFinder::check`] for a pass/fail verdict or
/// [`SnapshotFinder::audit`] to inspect everything that was found.
#[derive(Debug)]
pub struct SnapshotFinder<P> {
    provider: P,
    policy: SnapshotPolicy,
    options: FinderOptions,
}

impl<P: DescriptorProvider> SnapshotFinder<P> {
    /// Creates a finder that resolves dependencies through `provider`.
    pub fn new(provider: P, options: FinderOptions) -> Self {
        let policy = SnapshotPolicy::new(options.group_ids.iter().cloned());
        Self {
            provider,
            policy,
            options,
        }
    }

    /// The options this finder runs with.
    #[must_use]
    pub fn options(&self) -> &FinderOptions {
        &self.options
    }

    /// Recursively checks `root` for SNAPSHOT couplings.
    ///
    /// In summary mode the grouped ledger is written to the error log before
    /// the error is returned; in verbose mode each finding was logged as it
    /// was discovered.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Couplings`] if anything was recorded, or
    /// [`CheckError::Immediate`] on the first violation in fail-early mode.
    pub fn check(&self, root: &ProjectDescriptor) -> Result<(), CheckError> {
        let report = self.audit(root)?;

        if !report.has_couplings() {
            info!("No SNAPSHOT couplings found in {}", report.root);
            return Ok(());
        }

        if !self.options.verbose {
            error!("{}", report.ledger.render());
        }

        Err(CheckError::Couplings(Box::new(report)))
    }

    /// Walks `root` and returns everything that was found.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Immediate`] on the first violation in fail-early
    /// mode. Couplings found by an exhaustive walk are part of the report,
    /// not an error.
    pub fn audit(&self, root: &ProjectDescriptor) -> Result<AuditReport, CheckError> {
        info!("Checking {} for SNAPSHOT couplings", root.coordinate);

        let mut path = TraversalPath::new(root.coordinate.clone());
        let mut audit = Audit::default();

        self.walk(root, &mut path, None, &root.repositories, &mut audit)
            .map_err(|finding| CheckError::Immediate(Box::new(finding)))?;

        info!(
            "Visited {} nodes, recorded {} finding(s)",
            audit.nodes_visited,
            audit.findings.len()
        );

        Ok(AuditReport {
            root: root.coordinate.clone(),
            ledger: audit.ledger,
            findings: audit.findings,
            nodes_visited: audit.nodes_visited,
            verbose: self.options.verbose,
        })
    }

    /// Checks the ancestor chain of `descriptor`, then each of its dependencies.
    ///
    /// `origin` is the direct dependency that started this branch; it is
    /// `None` only while visiting the root itself.
    fn walk(
        &self,
        descriptor: &ProjectDescriptor,
        path: &mut TraversalPath,
        origin: Option<&Coordinate>,
        repositories: &[Repository],
        audit: &mut Audit,
    ) -> Result<(), Finding> {
        self.check_ancestors(descriptor, path, origin, audit)?;

        for dependency in &descriptor.dependencies {
            let resolved = match self.provider.resolve(dependency, repositories) {
                Ok(resolved) => resolved,
                Err(err) => {
                    self.unresolved(dependency, &err, path, origin, audit);
                    continue;
                }
            };

            let coordinate = resolved.coordinate.clone();
            if path.contains(&coordinate) {
                debug!("Skipping {coordinate}: already on this path");
                continue;
            }

            debug!("Checking gav: {coordinate}");
            debug!("checking pom:\n{}", path.render(Some(&coordinate)));
            audit.nodes_visited += 1;

            let branch_origin = origin.cloned().unwrap_or_else(|| coordinate.clone());
            if self.policy.is_violation(&coordinate) {
                self.flag(
                    FindingKind::SnapshotVersion,
                    coordinate.clone(),
                    LedgerKey::DirectDependency(branch_origin.clone()),
                    path,
                    audit,
                )?;
            }

            path.push(coordinate);
            let result = self.walk(&resolved, path, Some(&branch_origin), repositories, audit);
            path.pop();
            result?;
        }

        Ok(())
    }

    /// Walks up the parent chain of `descriptor`.
    fn check_ancestors(
        &self,
        descriptor: &ProjectDescriptor,
        path: &mut TraversalPath,
        origin: Option<&Coordinate>,
        audit: &mut Audit,
    ) -> Result<(), Finding> {
        let Some(parent) = descriptor.parent() else {
            return Ok(());
        };

        let coordinate = &parent.coordinate;
        if path.contains(coordinate) {
            debug!("Skipping parent {coordinate}: already on this path");
            return Ok(());
        }

        debug!("checking parent:\n{}", path.render(Some(coordinate)));
        audit.nodes_visited += 1;

        if self.policy.is_violation(coordinate) {
            let key = origin.map_or(LedgerKey::AncestorChain, |o| {
                LedgerKey::DirectDependency(o.clone())
            });
            self.flag(
                FindingKind::SnapshotParent,
                coordinate.clone(),
                key,
                path,
                audit,
            )?;
        }

        path.push(coordinate.clone());
        let result = self.check_ancestors(parent, path, origin, audit);
        path.pop();
        result
    }

    /// Handles a dependency whose descriptor could not be resolved.
    ///
    /// Recorded like a violation when its group is allowed, silently skipped
    /// otherwise. Never aborts the walk.
    fn unresolved(
        &self,
        dependency: &Dependency,
        err: &ResolutionError,
        path: &TraversalPath,
        origin: Option<&Coordinate>,
        audit: &mut Audit,
    ) {
        let declared = &dependency.coordinate;
        debug!("Could not resolve {declared}: {err}");

        if !self.policy.is_allowed_group(declared.group()) {
            return;
        }

        let key = LedgerKey::DirectDependency(origin.unwrap_or(declared).clone());
        let finding = Finding {
            kind: FindingKind::UnresolvedDependency,
            coordinate: declared.clone(),
            origin: key,
            trail: path.as_slice().to_vec(),
            detail: Some(err.to_string()),
        };
        self.record(finding, audit);
    }

    /// Raises a snapshot violation: aborts under fail-early, records otherwise.
    fn flag(
        &self,
        kind: FindingKind,
        coordinate: Coordinate,
        origin: LedgerKey,
        path: &TraversalPath,
        audit: &mut Audit,
    ) -> Result<(), Finding> {
        let finding = Finding {
            kind,
            coordinate,
            origin,
            trail: path.as_slice().to_vec(),
            detail: None,
        };

        if self.options.fail_early {
            return Err(finding);
        }

        self.record(finding, audit);
        Ok(())
    }

    fn record(&self, finding: Finding, audit: &mut Audit) {
        if self.options.verbose {
            error!("{finding}");
        }
        audit
            .ledger
            .record(finding.origin.clone(), finding.coordinate.clone());
        audit.findings.push(finding);
    }
}

/// Checks `root` with a one-off finder.
///
/// # Errors
///
/// See [`SnapshotFinder::check`].
pub fn check<P: DescriptorProvider>(
    provider: P,
    root: &ProjectDescriptor,
    options: FinderOptions,
) -> Result<(), CheckError> {
    SnapshotFinder::new(provider, options).check(root)
}
