//! Reset command: restore the external rules file to the bundled default.

use anyhow::{Context, Result};
use layer_lint_core::RuleStore;

/// Runs the reset command. Overwrites unconditionally.
pub fn run(store: &RuleStore) -> Result<()> {
    let path = store.external_config_path();
    store
        .reset_external_config()
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Reset {} to the bundled default", path.display());
    Ok(())
}
