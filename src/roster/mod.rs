//! Student roster (nómina) spreadsheets
//!
//! - Import: Excel (.xls/.xlsx) → validated student records
//! - Template: the 27-column layout with sample rows, as .xlsx

pub mod cells;
pub mod columns;
mod importer;
mod template;

pub use columns::{Column, Target, COLUMNS, COLUMN_COUNT};
pub use importer::{parse_roster, RosterImporter};
pub use template::{generate_template, write_template, TEMPLATE_FILE_NAME, TEMPLATE_SHEET_NAME};
