//! Sync run reporting

use super::SyncResult;

/// Renders a human-readable run summary
pub struct SyncReporter;

impl SyncReporter {
    /// Generate a summary report for one finished run
    #[must_use]
    pub fn generate_summary(result: &SyncResult) -> String {
        let mut output = String::new();

        output.push_str("\n=== Sync Summary ===\n");
        output.push_str(&format!("Copied:     {}\n", result.copied));
        output.push_str(&format!("Deleted:    {}\n", result.deleted));
        output.push_str(&format!("Up to date: {}\n", result.up_to_date));

        if !result.warnings.is_empty() {
            output.push_str(&format!("\nWarnings ({}):\n", result.warnings.len()));
            for warning in &result.warnings {
                output.push_str(&format!("  - {warning}\n"));
            }
        }

        if !result.errors.is_empty() {
            output.push_str(&format!("\nErrors ({}):\n", result.errors.len()));
            for error in &result.errors {
                output.push_str(&format!("  - {error}\n"));
            }
        }

        output.push_str(&format!(
            "\nTotal operations: {}\n",
            result.total_operations()
        ));

        if result.is_clean() {
            output.push_str("Status: success\n");
        } else {
            output.push_str("Status: completed with errors\n");
        }

        output
    }
}
