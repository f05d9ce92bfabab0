//! Nómina - student roster importer for clinical rotation requests
//!
//! Teaching centers attach a spreadsheet of students ("nómina") to every
//! rotation request. This library turns that spreadsheet into validated
//! student records, generates the blank template, and validates Chilean
//! national IDs (RUT).
//!
//! # Features
//!
//! - Fixed 27-column roster layout (A–AA), first sheet only
//! - RUT normalization (`12.345.678-k` → `12345678-K`) and check digits
//! - Serial and `DD/MM/YYYY` dates, day-fraction and `H:MM` times
//! - Blank-row elision and per-row skip reasons
//! - Template generation (.xlsx)
//!
//! # Example
//!
//! ```no_run
//! use royalbit_nomina::roster::RosterImporter;
//!
//! let result = RosterImporter::new().import_path("nomina.xlsx")?;
//!
//! println!("Sheet: {}", result.sheet_name);
//! for student in &result.students {
//!     println!("{} {}", student.national_id, student.full_name());
//! }
//! # Ok::<(), royalbit_nomina::error::NominaError>(())
//! ```

pub mod api;
pub mod cli;
pub mod error;
pub mod roster;
pub mod rut;
pub mod submission;
pub mod types;
pub mod upload;

// Re-export commonly used types
pub use error::{NominaError, NominaResult};
pub use roster::{generate_template, parse_roster, RosterImporter};
pub use rut::{normalize_national_id, validate_national_id};
pub use types::{RosterImportResult, SkipReason, SkippedRow, StudentRecord};
