//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod table;

/// Types that can be rendered in every output format
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.format(format)?);
        Ok(())
    }
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json(self.as_slice(), Some(self.len()))?),
        }
    }
}

/// Format API records: display rows for tables, the records as received for JSON
pub fn format_records<T, D>(records: Vec<T>, format: OutputFormat) -> Result<String>
where
    T: Serialize,
    D: From<T> + Tabled,
{
    match format {
        OutputFormat::Json => Ok(json::format_json(records.as_slice(), Some(records.len()))?),
        OutputFormat::Table => {
            let rows: Vec<D> = records.into_iter().map(D::from).collect();
            Ok(table::format_table(&rows))
        }
    }
}

/// Format and print API records to stdout
pub fn print_records<T, D>(records: Vec<T>, format: OutputFormat) -> Result<()>
where
    T: Serialize,
    D: From<T> + Tabled,
{
    println!("{}", format_records::<T, D>(records, format)?);
    Ok(())
}
