//! Script-directory reconciliation.
//!
//! Every file directly under the script directory becomes a `script` action
//! definition whose canonical name is the file name with every character
//! outside `[A-Za-z0-9]` replaced by an underscore.

use regex::Regex;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::{Arc, LazyLock};

use crate::error::SeedError;
use crate::seed::SeedReport;
use crate::store::{DefinitionStore, DefinitionUpdate};
use crate::types::{ActionDefinition, ActionOrigin};

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]").expect("Invalid sanitizer regex"));

/// Derive the canonical action name for a script file name.
///
/// `script.1.sh` becomes `script_1_sh`.
pub fn canonical_name(file_name: &str) -> String {
    NON_ALNUM.replace_all(file_name, "_").into_owned()
}

/// Upserts script-directory entries into the definition store.
pub struct ScriptDirectoryReconciler {
    store: Arc<dyn DefinitionStore>,
}

impl ScriptDirectoryReconciler {
    pub fn new(store: Arc<dyn DefinitionStore>) -> Self {
        Self { store }
    }

    /// Reconcile the store against one directory listing.
    ///
    /// Lists immediate children only, files only, in sorted file-name order.
    /// Existing definitions get description and options refreshed in place
    /// (origin untouched); a renamed or removed file leaves its old derived
    /// name's definition orphaned in the store. Re-running with an unchanged
    /// listing mutates nothing.
    pub fn reconcile(&self, dir: &Path) -> Result<SeedReport, SeedError> {
        let mut files: Vec<(String, String)> = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            files.push((file_name, entry.path().to_string_lossy().into_owned()));
        }
        files.sort();

        let mut report = SeedReport::default();
        for (file_name, full_path) in files {
            let name = canonical_name(&file_name);
            let description = format!("Execute script: {}", file_name);
            let options = json!({"filename": full_path});

            match self.store.find_by_name(&name) {
                Some(existing) => {
                    if existing.description == description && existing.options == options {
                        report.unchanged += 1;
                    } else {
                        self.store.update(
                            &name,
                            DefinitionUpdate {
                                description: Some(description),
                                options: Some(options),
                            },
                        )?;
                        report.updated += 1;
                    }
                }
                None => {
                    self.store.create(ActionDefinition {
                        name: name.clone(),
                        description,
                        action_type: ActionOrigin::Script,
                        options,
                    })?;
                    tracing::info!(name = %name, file = %file_name, "Script action definition created");
                    report.created += 1;
                }
            }
        }

        tracing::info!(
            created = report.created,
            updated = report.updated,
            unchanged = report.unchanged,
            dir = %dir.display(),
            "Script directory reconciliation pass complete"
        );
        Ok(report)
    }
}

/// Extract the configured script path from a script action's options.
pub fn script_filename(options: &Value) -> Option<&str> {
    options.get("filename").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDefinitionStore;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::File::create(dir.join(name)).unwrap();
    }

    fn script_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "script2.rb");
        touch(dir.path(), "script.1.sh");
        touch(dir.path(), "script3");
        dir
    }

    fn reconciler(store: &Arc<MemoryDefinitionStore>) -> ScriptDirectoryReconciler {
        ScriptDirectoryReconciler::new(Arc::clone(store) as Arc<dyn DefinitionStore>)
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("script.1.sh"), "script_1_sh");
        assert_eq!(canonical_name("script2.rb"), "script2_rb");
        assert_eq!(canonical_name("script3"), "script3");
        assert_eq!(canonical_name("run me!.bat"), "run_me__bat");
    }

    #[test]
    fn test_seeding_creates_one_definition_per_file() {
        let dir = script_dir();
        let store = Arc::new(MemoryDefinitionStore::new());
        let report = reconciler(&store).reconcile(dir.path()).unwrap();

        assert_eq!(report.created, 3);
        assert_eq!(store.all().len(), 3);
        assert!(store.find_by_name("script2_rb").is_some());
        assert!(store.find_by_name("script_1_sh").is_some());
        assert!(store.find_by_name("script3").is_some());
    }

    #[test]
    fn test_seeded_definitions_are_script_origin() {
        let dir = script_dir();
        let store = Arc::new(MemoryDefinitionStore::new());
        reconciler(&store).reconcile(dir.path()).unwrap();

        for definition in store.all() {
            assert_eq!(definition.action_type, ActionOrigin::Script);
        }
    }

    #[test]
    fn test_description_and_options() {
        let dir = script_dir();
        let store = Arc::new(MemoryDefinitionStore::new());
        reconciler(&store).reconcile(dir.path()).unwrap();

        let definition = store.find_by_name("script_1_sh").unwrap();
        assert_eq!(definition.description, "Execute script: script.1.sh");
        let expected_path = dir.path().join("script.1.sh");
        assert_eq!(
            script_filename(&definition.options),
            Some(expected_path.to_str().unwrap())
        );
    }

    #[test]
    fn test_reseeding_unchanged_directory_adds_nothing() {
        let dir = script_dir();
        let store = Arc::new(MemoryDefinitionStore::new());
        let reconciler = reconciler(&store);
        reconciler.reconcile(dir.path()).unwrap();

        let report = reconciler.reconcile(dir.path()).unwrap();
        assert_eq!(
            report,
            SeedReport {
                created: 0,
                updated: 0,
                unchanged: 3
            }
        );
        assert_eq!(store.all().len(), 3);
    }

    #[test]
    fn test_renamed_file_orphans_old_definition() {
        let dir = script_dir();
        let store = Arc::new(MemoryDefinitionStore::new());
        let reconciler = reconciler(&store);
        reconciler.reconcile(dir.path()).unwrap();

        fs::rename(dir.path().join("script2.rb"), dir.path().join("run.bat")).unwrap();
        reconciler.reconcile(dir.path()).unwrap();

        // The old derived name survives, now orphaned.
        assert!(store.find_by_name("script2_rb").is_some());
        assert!(store.find_by_name("run_bat").is_some());
        assert_eq!(store.all().len(), 4);
    }

    #[test]
    fn test_subdirectories_are_ignored() {
        let dir = script_dir();
        fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested"), "inner.sh");

        let store = Arc::new(MemoryDefinitionStore::new());
        reconciler(&store).reconcile(dir.path()).unwrap();

        assert_eq!(store.all().len(), 3);
        assert!(store.find_by_name("inner_sh").is_none());
    }

    #[test]
    fn test_missing_directory_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryDefinitionStore::new());
        let err = reconciler(&store)
            .reconcile(&dir.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, SeedError::SourceUnavailable(_)));
    }

    #[test]
    fn test_empty_directory_yields_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryDefinitionStore::new());
        let report = reconciler(&store).reconcile(dir.path()).unwrap();
        assert_eq!(report, SeedReport::default());
    }
}
