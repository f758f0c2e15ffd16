//! Table rendering for the CLI.

use anyhow::Result;
use fingertips::Table;

/// Display options shared by every subcommand.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Options {
    /// Maximum number of rows to print.
    pub(crate) limit: usize,
    /// Propagate request errors instead of printing an empty table.
    pub(crate) strict: bool,
}

/// Print a banner with the given title.
pub(crate) fn banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:^60} ║", title);
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// One-line description of a table's shape.
pub(crate) fn summary(table: &Table) -> String {
    match table.index_name() {
        Some(index) => format!(
            "{} rows x {} columns (index: {})",
            table.len(),
            table.width(),
            index
        ),
        None => format!("{} rows x {} columns", table.len(), table.width()),
    }
}

/// Print up to `opts.limit` rows of a table.
pub(crate) fn print_table(table: &Table, opts: &Options) -> Result<()> {
    if table.is_empty() {
        println!("No data returned.");
        return Ok(());
    }

    println!("{}", summary(table));
    let shown = table.frame().head(Some(opts.limit));
    println!("{}", shown);
    if table.len() > opts.limit {
        println!("... {} more rows (use --limit to show more)", table.len() - opts.limit);
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fingertips::polars::prelude::*;

    #[test]
    fn test_summary() {
        let df = df! {
            "IndicatorID" => &[90630i64, 93088],
            "Name" => &["a", "b"],
        }
        .unwrap();

        assert_eq!(summary(&Table::new(df.clone())), "2 rows x 2 columns");
        assert_eq!(
            summary(&Table::with_index(df, "IndicatorID")),
            "2 rows x 2 columns (index: IndicatorID)"
        );
    }

    #[test]
    fn test_print_empty_table() {
        let opts = Options {
            limit: 5,
            strict: false,
        };
        assert!(print_table(&Table::empty(), &opts).is_ok());
    }
}
