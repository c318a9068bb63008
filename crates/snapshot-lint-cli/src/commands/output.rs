//! Shared output formatting for check results.

use anyhow::Result;
use snapshot_lint_core::{AuditReport, CheckError, Coordinate, Finding};

use crate::OutputFormat;

/// Result of one check run.
#[derive(Debug)]
pub enum Outcome {
    /// Nothing was recorded.
    Clean {
        /// Root project.
        root: Coordinate,
    },
    /// The walk completed with couplings.
    Couplings(Box<AuditReport>),
    /// Fail-early stopped at this finding.
    Immediate(Box<Finding>),
}

impl Outcome {
    /// True if no coupling was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean { .. })
    }
}

/// Print a check outcome in the specified format.
pub fn print(outcome: &Outcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(outcome),
        OutputFormat::Json => return print_json(outcome),
        OutputFormat::Compact => print_compact(outcome),
    }
    Ok(())
}

fn print_text(outcome: &Outcome) {
    match outcome {
        Outcome::Clean { root } => {
            println!("\x1b[32mNo SNAPSHOT couplings found in {root}\x1b[0m");
        }
        Outcome::Couplings(report) => {
            eprintln!(
                "{:?}",
                miette::Report::new(CheckError::Couplings(report.clone()))
            );
            println!("\x1b[31m{}\x1b[0m", summary(report));
        }
        Outcome::Immediate(finding) => {
            eprintln!(
                "{:?}",
                miette::Report::new(CheckError::Immediate(finding.clone()))
            );
        }
    }
}

fn print_json(outcome: &Outcome) -> Result<()> {
    let value = match outcome {
        Outcome::Clean { root } => serde_json::json!({
            "status": "clean",
            "root": root,
        }),
        Outcome::Couplings(report) => serde_json::json!({
            "status": "couplings",
            "report": report,
        }),
        Outcome::Immediate(finding) => serde_json::json!({
            "status": "immediate",
            "finding": finding,
        }),
    };
    let json = serde_json::to_string_pretty(&value)?;
    println!("{json}");
    Ok(())
}

fn print_compact(outcome: &Outcome) {
    match outcome {
        Outcome::Clean { .. } => {}
        Outcome::Couplings(report) => {
            for finding in &report.findings {
                println!("{}", compact_line(finding));
            }
        }
        Outcome::Immediate(finding) => println!("{}", compact_line(finding)),
    }
}

fn summary(report: &AuditReport) -> String {
    format!(
        "Found {} SNAPSHOT coupling(s) under {} dependency key(s) of {} ({} node(s) visited)",
        report.ledger.coupling_count(),
        report.ledger.len(),
        report.root,
        report.nodes_visited
    )
}

fn compact_line(finding: &Finding) -> String {
    format!("{}: {} {}", finding.origin, finding.kind, finding.coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapshot_lint_core::{FailureLedger, FindingKind, LedgerKey};

    fn c(text: &str) -> Coordinate {
        Coordinate::parse(text).unwrap()
    }

    fn finding(kind: FindingKind, origin: LedgerKey, coordinate: &str) -> Finding {
        Finding {
            kind,
            coordinate: c(coordinate),
            origin,
            trail: vec![c("org.x:app:1.0")],
            detail: None,
        }
    }

    #[test]
    fn compact_line_names_origin_kind_and_coordinate() {
        let line = compact_line(&finding(
            FindingKind::SnapshotVersion,
            LedgerKey::DirectDependency(c("org.x:lib:1.0")),
            "org.x:util:2-SNAPSHOT",
        ));
        insta::assert_snapshot!(line, @"org.x:lib:1.0: snapshot-version org.x:util:2-SNAPSHOT");
    }

    #[test]
    fn compact_line_for_ancestor_chain() {
        let line = compact_line(&finding(
            FindingKind::SnapshotParent,
            LedgerKey::AncestorChain,
            "org.x:pom:3-SNAPSHOT",
        ));
        insta::assert_snapshot!(line, @"BAD PARENT: snapshot-parent org.x:pom:3-SNAPSHOT");
    }

    #[test]
    fn summary_counts_couplings_and_keys() {
        let mut ledger = FailureLedger::new();
        let key = LedgerKey::DirectDependency(c("org.x:lib:1.0"));
        ledger.record(key.clone(), c("org.x:a:1-SNAPSHOT"));
        ledger.record(key, c("org.x:b:1-SNAPSHOT"));

        let report = AuditReport {
            root: c("org.x:app:1.0"),
            ledger,
            findings: Vec::new(),
            nodes_visited: 4,
            verbose: false,
        };
        insta::assert_snapshot!(
            summary(&report),
            @"Found 2 SNAPSHOT coupling(s) under 1 dependency key(s) of org.x:app:1.0 (4 node(s) visited)"
        );
    }

    #[test]
    fn clean_outcome_is_clean() {
        assert!(Outcome::Clean { root: c("org.x:app:1.0") }.is_clean());
    }
}
