//! Table Facade - table lifecycle
//!
//! ## Desugaring
//!
//! | Facade | Store |
//! |--------|-------|
//! | `create_table(t, "f1,f2")` | `table_exists(t)` then `create_table(t, [f1, f2])` |
//! | `drop_table(t)` | `table_exists(t)`, `disable_table(t)` if enabled, `delete_table(t)` |
//! | `table_exists(t)` | `table_exists(t)` |
//! | `list_tables()` | `list_tables()` |

use tracing::info;

use cellgate_core::{parse_family_csv, Result, StoreError, TableName};
use cellgate_storage::TableDescriptor;

/// Table lifecycle operations.
pub trait TableFacade {
    /// Create `table` with one column family per entry of `families_csv`.
    ///
    /// Returns `false` without touching the store when the table already
    /// exists; existing families are left as they are.
    fn create_table(&self, table: &str, families_csv: &str) -> Result<bool>;

    /// Disable and delete `table`.
    ///
    /// Returns `false` when there was no such table. A table that is
    /// already disabled is deleted without a second disable.
    fn drop_table(&self, table: &str) -> Result<bool>;

    /// Whether `table` exists.
    fn table_exists(&self, table: &str) -> Result<bool>;

    /// Names of all tables, enabled or not, in sorted order.
    fn list_tables(&self) -> Result<Vec<String>>;
}

// =============================================================================
// Implementation
// =============================================================================

use super::impl_::FacadeImpl;

fn dropped_elsewhere(name: &TableName) -> bool {
    info!(table = %name, "Table dropped concurrently, nothing to drop");
    false
}

impl TableFacade for FacadeImpl {
    fn create_table(&self, table: &str, families_csv: &str) -> Result<bool> {
        self.observe("create_table", table, || {
            let name = TableName::parse(table)?;
            let families = parse_family_csv(families_csv)?;

            let admin = self.connection().admin()?;
            if admin.table_exists(&name)? {
                info!(table = %name, "Table already exists");
                return Ok(false);
            }

            let descriptor = families
                .into_iter()
                .fold(TableDescriptor::new(name.clone()), TableDescriptor::add_family);
            match admin.create_table(&descriptor) {
                Ok(()) => {}
                // Lost a race with another creator
                Err(StoreError::TableExists(_)) => {
                    info!(table = %name, "Table already exists");
                    return Ok(false);
                }
                Err(e) => return Err(e.into()),
            }

            info!(
                table = %name,
                families = descriptor.families().len(),
                "Created table"
            );
            Ok(true)
        })
    }

    fn drop_table(&self, table: &str) -> Result<bool> {
        self.observe("drop_table", table, || {
            let name = TableName::parse(table)?;

            let admin = self.connection().admin()?;
            if !admin.table_exists(&name)? {
                info!(table = %name, "Table does not exist, nothing to drop");
                return Ok(false);
            }

            // Another caller may drop the table at any point from here on
            let enabled = match admin.is_table_enabled(&name) {
                Ok(enabled) => enabled,
                Err(StoreError::TableNotFound(_)) => return Ok(dropped_elsewhere(&name)),
                Err(e) => return Err(e.into()),
            };
            if enabled {
                match admin.disable_table(&name) {
                    Ok(()) | Err(StoreError::TableDisabled(_)) => {}
                    Err(StoreError::TableNotFound(_)) => return Ok(dropped_elsewhere(&name)),
                    Err(e) => return Err(e.into()),
                }
            }

            match admin.delete_table(&name) {
                Ok(()) => {
                    info!(table = %name, "Dropped table");
                    Ok(true)
                }
                Err(StoreError::TableNotFound(_)) => Ok(dropped_elsewhere(&name)),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn table_exists(&self, table: &str) -> Result<bool> {
        self.observe("table_exists", table, || {
            let name = TableName::parse(table)?;
            let admin = self.connection().admin()?;
            Ok(admin.table_exists(&name)?)
        })
    }

    fn list_tables(&self) -> Result<Vec<String>> {
        self.observe("list_tables", "", || {
            let admin = self.connection().admin()?;
            let mut names: Vec<String> = admin
                .list_tables()?
                .into_iter()
                .map(|name| name.to_string())
                .collect();
            names.sort();
            Ok(names)
        })
    }
}
