//! Integration tests: traversal properties of the snapshot finder.
//!
//! Graphs are built in memory; a recording provider tracks which
//! dependencies the finder asked for, and in which order.

use snapshot_lint_core::{
    CheckError, Coordinate, Dependency, DescriptorProvider, FinderOptions, LedgerKey, MapProvider,
    ProjectDescriptor, Repository, ResolutionError, SnapshotFinder,
};
use std::cell::RefCell;
use std::collections::BTreeSet;

fn c(text: &str) -> Coordinate {
    Coordinate::parse(text).expect("test coordinate should parse")
}

fn node(text: &str, deps: &[&str]) -> ProjectDescriptor {
    deps.iter().fold(ProjectDescriptor::new(c(text)), |d, dep| {
        d.with_dependency(Dependency::new(c(dep)))
    })
}

fn direct(text: &str) -> LedgerKey {
    LedgerKey::DirectDependency(c(text))
}

/// Provider that remembers every resolution request.
struct Recording {
    inner: MapProvider,
    requests: RefCell<Vec<Coordinate>>,
}

impl Recording {
    fn new(inner: MapProvider) -> Self {
        Self {
            inner,
            requests: RefCell::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

impl DescriptorProvider for Recording {
    fn resolve(
        &self,
        dependency: &Dependency,
        repositories: &[Repository],
    ) -> Result<ProjectDescriptor, ResolutionError> {
        self.requests
            .borrow_mut()
            .push(dependency.coordinate.clone());
        self.inner.resolve(dependency, repositories)
    }
}

// ── Clean graphs ──

#[test]
fn clean_graph_has_empty_ledger() {
    let provider = MapProvider::new()
        .with(node("g:a:1.0", &["g:b:1.0", "g:c:1.0"]))
        .with(node("g:b:1.0", &["g:c:1.0"]))
        .with(node("g:c:1.0", &[]));
    let root = node("g:root:1.0", &["g:a:1.0", "g:b:1.0"]);

    let report = SnapshotFinder::new(&provider, FinderOptions::new())
        .audit(&root)
        .expect("exhaustive audit never fails");
    assert!(report.ledger.is_empty());
    assert!(!report.has_couplings());
}

// ── Cycles and diamonds ──

#[test]
fn cycle_back_to_ancestor_terminates() {
    let provider = Recording::new(
        MapProvider::new()
            .with(node("g:root:1.0", &["g:a:1.0"]))
            .with(node("g:a:1.0", &["g:b:1.0"]))
            .with(node("g:b:1.0", &["g:a:1.0", "g:root:1.0"])),
    );
    let root = node("g:root:1.0", &["g:a:1.0"]);

    let report = SnapshotFinder::new(&provider, FinderOptions::new())
        .audit(&root)
        .unwrap();
    assert!(report.ledger.is_empty());
    assert_eq!(report.nodes_visited, 2);
    assert_eq!(
        provider.requests(),
        vec!["g:a:1.0", "g:b:1.0", "g:a:1.0", "g:root:1.0"]
    );
}

#[test]
fn cycle_through_other_version_terminates() {
    let provider = MapProvider::new()
        .with(node("g:a:1.0", &["g:a:2.0-SNAPSHOT"]))
        .with(node("g:a:2.0-SNAPSHOT", &["g:a:1.0"]));
    let root = node("g:root:1.0", &["g:a:1.0"]);

    let report = SnapshotFinder::new(&provider, FinderOptions::new())
        .audit(&root)
        .unwrap();
    assert_eq!(report.findings.len(), 1);
    assert_eq!(
        report.ledger.get(&direct("g:a:1.0")),
        Some(&BTreeSet::from([c("g:a:2.0-SNAPSHOT")]))
    );
}

#[test]
fn diamond_is_visited_once_per_path() {
    let provider = Recording::new(
        MapProvider::new()
            .with(node("g:a:1.0", &["g:d:1-SNAPSHOT"]))
            .with(node("g:b:1.0", &["g:d:1-SNAPSHOT"]))
            .with(node("g:d:1-SNAPSHOT", &[])),
    );
    let root = node("g:root:1.0", &["g:a:1.0", "g:b:1.0"]);

    let report = SnapshotFinder::new(&provider, FinderOptions::new())
        .audit(&root)
        .unwrap();

    let d_requests = provider
        .requests()
        .iter()
        .filter(|r| r.as_str() == "g:d:1-SNAPSHOT")
        .count();
    assert_eq!(d_requests, 2);
    assert!(report.ledger.get(&direct("g:a:1.0")).is_some());
    assert!(report.ledger.get(&direct("g:b:1.0")).is_some());
}

#[test]
fn shared_parent_is_walked_under_every_dependency() {
    let parent = ProjectDescriptor::new(c("g:parent:1-SNAPSHOT"));
    let provider = MapProvider::new()
        .with(node("g:a:1.0", &[]).with_parent(parent.clone()))
        .with(node("g:b:1.0", &[]).with_parent(parent));
    let root = node("g:root:1.0", &["g:a:1.0", "g:b:1.0"]);

    let report = SnapshotFinder::new(&provider, FinderOptions::new())
        .audit(&root)
        .unwrap();
    assert_eq!(report.findings.len(), 2);
    assert_eq!(report.ledger.len(), 2);
}

// ── Policy ──

#[test]
fn allowlist_suppresses_other_groups() {
    let provider = MapProvider::new()
        .with(node("a-group:a:1.0", &["other-group:b:2.0-SNAPSHOT"]))
        .with(node("other-group:b:2.0-SNAPSHOT", &[]));
    let root = node("org.x:app:1.0", &["a-group:a:1.0"]);

    let restricted = SnapshotFinder::new(&provider, FinderOptions::new().group_id("b-group"));
    assert!(restricted.check(&root).is_ok());

    let unrestricted = SnapshotFinder::new(&provider, FinderOptions::new());
    assert!(unrestricted.check(&root).is_err());
}

// ── Fail-early ──

#[test]
fn fail_early_stops_at_first_violation_in_declaration_order() {
    let provider = Recording::new(
        MapProvider::new()
            .with(node("g:a:1-SNAPSHOT", &["g:deep:1.0"]))
            .with(node("g:deep:1.0", &[]))
            .with(node("g:b:1-SNAPSHOT", &[])),
    );
    let root = node("g:root:1.0", &["g:a:1-SNAPSHOT", "g:b:1-SNAPSHOT"]);

    let err = SnapshotFinder::new(&provider, FinderOptions::new().fail_early(true))
        .check(&root)
        .unwrap_err();

    let CheckError::Immediate(finding) = err else {
        panic!("expected an immediate error");
    };
    assert_eq!(finding.coordinate, c("g:a:1-SNAPSHOT"));
    assert_eq!(provider.requests(), vec!["g:a:1-SNAPSHOT"]);
}

#[test]
fn fail_early_checks_parent_chain_before_dependencies() {
    let provider = Recording::new(MapProvider::new().with(node("g:a:1-SNAPSHOT", &[])));
    let root = node("g:root:1.0", &["g:a:1-SNAPSHOT"])
        .with_parent(ProjectDescriptor::new(c("g:parent:1-SNAPSHOT")));

    let err = SnapshotFinder::new(&provider, FinderOptions::new().fail_early(true))
        .check(&root)
        .unwrap_err();

    let CheckError::Immediate(finding) = err else {
        panic!("expected an immediate error");
    };
    assert_eq!(finding.coordinate, c("g:parent:1-SNAPSHOT"));
    assert_eq!(finding.origin, LedgerKey::AncestorChain);
    assert!(provider.requests().is_empty());
}

// ── Grouping ──

#[test]
fn two_transitive_snapshots_share_one_key() {
    let provider = MapProvider::new()
        .with(node("g:a:1.0", &["g:x:1-SNAPSHOT", "g:m:1.0"]))
        .with(node("g:m:1.0", &["g:y:1-SNAPSHOT"]))
        .with(node("g:x:1-SNAPSHOT", &[]))
        .with(node("g:y:1-SNAPSHOT", &[]));
    let root = node("g:root:1.0", &["g:a:1.0"]);

    let err = SnapshotFinder::new(&provider, FinderOptions::new())
        .check(&root)
        .unwrap_err();
    let report = err.report().expect("exhaustive walk carries a report");

    assert_eq!(report.ledger.len(), 1);
    assert_eq!(
        report.ledger.get(&direct("g:a:1.0")),
        Some(&BTreeSet::from([c("g:x:1-SNAPSHOT"), c("g:y:1-SNAPSHOT")]))
    );
}

// ── Scenarios ──

#[test]
fn scenario_direct_snapshot_dependency() {
    let provider = MapProvider::new().with(node("org.x:lib:2.0-SNAPSHOT", &[]));
    let root = node("org.x:app:1.0", &["org.x:lib:2.0-SNAPSHOT"]);

    let err = SnapshotFinder::new(&provider, FinderOptions::new())
        .check(&root)
        .unwrap_err();
    let report = err.report().unwrap();
    assert_eq!(
        report.ledger.render(),
        "The following direct dependencies may cause unreproducible builds:\n\
         \n\
         org.x:lib:2.0-SNAPSHOT\n\
         \torg.x:lib:2.0-SNAPSHOT\n\
         \n\
         For full inheritance trees, run with verbose flag."
    );
}

#[test]
fn scenario_snapshot_parent_without_dependencies() {
    let root = ProjectDescriptor::new(c("org.x:app:1.0"))
        .with_parent(ProjectDescriptor::new(c("org.x:parent:1.0-SNAPSHOT")));

    let err = SnapshotFinder::new(MapProvider::new(), FinderOptions::new())
        .check(&root)
        .unwrap_err();
    let report = err.report().unwrap();
    assert_eq!(report.ledger.len(), 1);
    assert_eq!(
        report.ledger.get(&LedgerKey::AncestorChain),
        Some(&BTreeSet::from([c("org.x:parent:1.0-SNAPSHOT")]))
    );
    assert!(report.ledger.render().contains("\nBAD PARENT\n\torg.x:parent:1.0-SNAPSHOT\n"));
}

#[test]
fn scenario_unresolvable_direct_dependency() {
    let provider = Recording::new(MapProvider::new().with(node("org.x:sibling:1.0", &[])));
    let root = node("org.x:app:1.0", &["org.x:a:1.0", "org.x:sibling:1.0"]);

    let err = SnapshotFinder::new(&provider, FinderOptions::new())
        .check(&root)
        .unwrap_err();
    let report = err.report().unwrap();
    assert_eq!(
        report.ledger.get(&direct("org.x:a:1.0")),
        Some(&BTreeSet::from([c("org.x:a:1.0")]))
    );
    assert_eq!(provider.requests(), vec!["org.x:a:1.0", "org.x:sibling:1.0"]);
}
