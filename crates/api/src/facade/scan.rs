//! Scan Facade - filtered row scans
//!
//! ## Desugaring
//!
//! | Facade | Store |
//! |--------|-------|
//! | `scan_rows_matching(t, f, p)` | `scan(Scan.add_family(f).with_filter(RowKeyRegex(p)).with_limit(max_rows + 1))` |
//!
//! One row past the bound is requested so that a scan which exactly fills
//! the bound is not reported as truncated.

use regex::Regex;
use tracing::{info, warn};

use cellgate_core::{Error, FamilyName, Result, ScanOptions, ScanSummary, TableName};
use cellgate_storage::{RowFilter, Scan};

/// Filtered scans.
pub trait ScanFacade {
    /// Scan one family for rows whose key contains a match for `pattern`,
    /// bounded by the facade's configured [`ScanOptions`].
    fn scan_rows_matching(&self, table: &str, family: &str, pattern: &str)
        -> Result<ScanSummary>;

    /// Like [`scan_rows_matching`](ScanFacade::scan_rows_matching) with
    /// explicit bounds.
    fn scan_rows_matching_with(
        &self,
        table: &str,
        family: &str,
        pattern: &str,
        options: ScanOptions,
    ) -> Result<ScanSummary>;
}

// =============================================================================
// Implementation
// =============================================================================

use super::impl_::FacadeImpl;

impl ScanFacade for FacadeImpl {
    fn scan_rows_matching(
        &self,
        table: &str,
        family: &str,
        pattern: &str,
    ) -> Result<ScanSummary> {
        self.scan_rows_matching_with(table, family, pattern, self.scan_options())
    }

    fn scan_rows_matching_with(
        &self,
        table: &str,
        family: &str,
        pattern: &str,
        options: ScanOptions,
    ) -> Result<ScanSummary> {
        self.observe("scan_rows_matching", table, || {
            let name = TableName::parse(table)?;
            let family = FamilyName::parse(family)?;
            Regex::new(pattern)
                .map_err(|e| Error::invalid_input(format!("invalid row key pattern: {}", e)))?;
            if options.max_rows == 0 {
                return Err(Error::invalid_input("scan bound must be at least one row"));
            }
            self.require_table(&name)?;

            let scan = Scan::new()
                .add_family(family.as_str())
                .with_filter(RowFilter::RowKeyRegex(pattern.to_string()))
                .with_limit(options.max_rows.saturating_add(1));

            let handle = self.connection().table(&name)?;
            let mut summary = ScanSummary::default();
            for row in handle.scan(&scan)? {
                let row = row?;
                if summary.count == options.max_rows {
                    summary.truncated = true;
                    break;
                }

                let row_key = String::from_utf8_lossy(row.row()).into_owned();
                info!(table = %name, family = %family, row_key = %row_key, "Scan match");
                summary.row_keys.push(row_key);
                summary.count += 1;
            }

            if summary.truncated {
                warn!(
                    table = %name,
                    pattern,
                    max_rows = options.max_rows,
                    "Scan stopped at row bound"
                );
            }
            info!(table = %name, pattern, count = summary.count, "Scan complete");
            Ok(summary)
        })
    }
}
