//! Init command implementation.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Project config file written by `init`.
const CONFIG_FILE: &str = "snapshot-lint.toml";

const DEFAULT_CONFIG: &str = r#"# snapshot-lint configuration

[check]
# Print the full inheritance path of every finding as it is found
verbose = false

# Stop at the first SNAPSHOT coupling
fail_early = false

# Only report SNAPSHOT versions in these groups (empty = all groups)
group_ids = []

[repository]
# Local repository root (defaults to ~/.snapshot-lint/repository)
# local = "/path/to/repository"

# Further repository roots, searched after the local one
remotes = []
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = write_config(Path::new("."), force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to list repositories and groups");
    println!("  2. Run: snapshot-lint check");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}
