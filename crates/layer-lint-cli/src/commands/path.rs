//! Path command: report the external rules file location.

use layer_lint_core::RuleStore;

/// Runs the path command.
pub fn run(store: &RuleStore) {
    let path = store.external_config_path();
    if store.has_external_config() {
        println!("{}", path.display());
    } else {
        println!("{} (not created yet; run `layer-lint init`)", path.display());
    }
}
