//! Init command: create the external rules file from the bundled default.

use anyhow::{Context, Result};
use layer_lint_core::RuleStore;

/// Runs the init command.
///
/// Without `--force` an existing file is left untouched; with it, the file
/// is reset to the bundled default.
pub fn run(store: &RuleStore, force: bool) -> Result<()> {
    let path = store.external_config_path().to_path_buf();

    if force {
        store
            .reset_external_config()
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Reset {}", path.display());
        return Ok(());
    }

    let created = store
        .init_external_config()
        .with_context(|| format!("failed to write {}", path.display()))?;

    if created {
        println!("Created {}", path.display());
        println!("\nNext steps:");
        println!("  1. Edit the layer definitions and allowed calls");
        println!("  2. Run: layer-lint classify --name UserController");
    } else {
        println!(
            "Rules file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use layer_lint_core::RULES_FILE_NAME;
    use tempfile::TempDir;

    #[test]
    fn init_creates_then_preserves() {
        let tmp = TempDir::new().unwrap();
        let store = RuleStore::new(tmp.path().join(RULES_FILE_NAME));

        run(&store, false).unwrap();
        assert!(store.has_external_config());

        std::fs::write(store.external_config_path(), "custom").unwrap();
        run(&store, false).unwrap();
        assert_eq!(
            std::fs::read_to_string(store.external_config_path()).unwrap(),
            "custom"
        );

        run(&store, true).unwrap();
        assert!(std::fs::read_to_string(store.external_config_path())
            .unwrap()
            .contains("CONTROLLER"));
    }
}
