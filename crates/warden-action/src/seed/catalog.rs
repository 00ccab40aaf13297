//! Catalog-file reconciliation.
//!
//! The catalog is a row-oriented text source: a `name,description` header,
//! `#`-prefixed comment rows, and blank lines, all ignored; every other row
//! is an action definition to upsert with origin `default`.

use serde_json::json;
use std::io::BufRead;
use std::sync::Arc;

use crate::error::SeedError;
use crate::seed::SeedReport;
use crate::store::{DefinitionStore, DefinitionUpdate};
use crate::types::{ActionDefinition, ActionOrigin};

/// Upserts catalog rows into the definition store.
pub struct CatalogReconciler {
    store: Arc<dyn DefinitionStore>,
}

impl CatalogReconciler {
    pub fn new(store: Arc<dyn DefinitionStore>) -> Self {
        Self { store }
    }

    /// Reconcile the store against one catalog source.
    ///
    /// Rows split on the first comma; names never contain commas,
    /// descriptions may. Existing definitions get their description
    /// refreshed in place (origin and options untouched); names absent from
    /// the source are left alone. Re-running with an unchanged source
    /// mutates nothing.
    ///
    /// Rows upserted before a read failure remain in the store; there is no
    /// pass-wide transaction.
    pub fn reconcile(&self, source: impl BufRead) -> Result<SeedReport, SeedError> {
        let mut report = SeedReport::default();
        let mut header_seen = false;

        for (idx, line) in source.lines().enumerate() {
            let line = line?;
            let row = line.trim();
            if row.is_empty() || row.starts_with('#') {
                continue;
            }
            if !header_seen {
                // First non-comment row is the name,description header.
                header_seen = true;
                continue;
            }

            let (name, description) = row.split_once(',').ok_or(SeedError::MalformedRow {
                line: idx + 1,
                content: row.to_string(),
            })?;
            let name = name.trim();
            let description = description.trim();
            if name.is_empty() {
                return Err(SeedError::MalformedRow {
                    line: idx + 1,
                    content: row.to_string(),
                });
            }

            match self.store.find_by_name(name) {
                Some(existing) => {
                    if existing.description == description {
                        report.unchanged += 1;
                    } else {
                        self.store.update(
                            name,
                            DefinitionUpdate {
                                description: Some(description.to_string()),
                                options: None,
                            },
                        )?;
                        report.updated += 1;
                    }
                }
                None => {
                    self.store.create(ActionDefinition {
                        name: name.to_string(),
                        description: description.to_string(),
                        action_type: ActionOrigin::Default,
                        options: json!({}),
                    })?;
                    tracing::info!(name = %name, "Action definition created from catalog");
                    report.created += 1;
                }
            }
        }

        tracing::info!(
            created = report.created,
            updated = report.updated,
            unchanged = report.unchanged,
            "Catalog reconciliation pass complete"
        );
        Ok(report)
    }
}
