//! Roster importer implementation - Excel (.xls/.xlsx) → student records

use crate::error::{NominaError, NominaResult};
use crate::roster::cells;
use crate::roster::columns::{Target, COLUMNS, COLUMN_COUNT, FIRST_NAME_COLUMN, LAST_NAME_COLUMN};
use crate::rut::{normalize_national_id, validate_national_id};
use crate::types::{RosterImportResult, SkipReason, SkippedRow, StudentRecord};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info, warn};

/// Header text expected in column B of the first row
const HEADER_MARKER: &str = "apellido";

/// Rows of the first sheet, each padded to the roster width
struct SheetGrid {
    /// 0-based sheet row of `rows[0]`
    first_row: usize,
    rows: Vec<Vec<Data>>,
}

impl SheetGrid {
    fn from_range(range: &Range<Data>) -> Self {
        let (Some(start), Some(end)) = (range.start(), range.end()) else {
            return Self {
                first_row: 0,
                rows: Vec::new(),
            };
        };

        // Columns are addressed absolutely so a sheet whose used range starts
        // past column A still lines up with the layout.
        let rows = (start.0..=end.0)
            .map(|row| {
                (0..COLUMN_COUNT as u32)
                    .map(|col| range.get_value((row, col)).cloned().unwrap_or(Data::Empty))
                    .collect()
            })
            .collect();

        Self {
            first_row: start.0 as usize,
            rows,
        }
    }
}

/// Importer for student roster spreadsheets
#[derive(Debug, Clone, Default)]
pub struct RosterImporter {
    strict_rut: bool,
}

impl RosterImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also reject rows whose RUT fails the check-digit test
    pub fn strict_rut(mut self, strict: bool) -> Self {
        self.strict_rut = strict;
        self
    }

    /// Read and import a roster file from disk
    pub fn import_path<P: AsRef<Path>>(&self, path: P) -> NominaResult<RosterImportResult> {
        let bytes = std::fs::read(path.as_ref())?;
        self.import_bytes(&bytes)
    }

    /// Import a roster from the raw bytes of a spreadsheet file
    pub fn import_bytes(&self, bytes: &[u8]) -> NominaResult<RosterImportResult> {
        let (sheet_name, grid) = Self::read_first_sheet(bytes)?;
        self.parse_grid(sheet_name, grid)
    }

    fn read_first_sheet(bytes: &[u8]) -> NominaResult<(String, SheetGrid)> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| NominaError::Decode("workbook has no sheets".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;
        let grid = SheetGrid::from_range(&range);
        debug!(sheet = %sheet_name, rows = grid.rows.len(), "decoded first sheet");

        Ok((sheet_name, grid))
    }

    fn parse_grid(&self, sheet_name: String, grid: SheetGrid) -> NominaResult<RosterImportResult> {
        if grid.rows.len() < 2 {
            return Err(NominaError::EmptyFile);
        }

        let has_header = cells::text(&grid.rows[0][LAST_NAME_COLUMN])
            .to_lowercase()
            .contains(HEADER_MARKER);
        debug!(has_header, "header detection");
        let start = usize::from(has_header);

        let mut students = Vec::new();
        let mut skipped = Vec::new();

        for (idx, row) in grid.rows.iter().enumerate().skip(start) {
            if cells::is_blank(&row[LAST_NAME_COLUMN]) && cells::is_blank(&row[FIRST_NAME_COLUMN]) {
                continue;
            }

            let record = Self::map_row(row);
            let sheet_row = grid.first_row + idx + 1;

            match self.check_row(&record) {
                None => students.push(record),
                Some(reason) => {
                    warn!(row = sheet_row, %reason, "roster row skipped");
                    skipped.push(SkippedRow {
                        row: sheet_row,
                        reason,
                    });
                }
            }
        }

        if students.is_empty() {
            return Err(NominaError::NoValidStudents);
        }

        info!(
            sheet = %sheet_name,
            total = students.len(),
            skipped = skipped.len(),
            "roster imported"
        );
        Ok(RosterImportResult::new(sheet_name, students, skipped))
    }

    /// Map one row positionally onto a record
    fn map_row(row: &[Data]) -> StudentRecord {
        let mut record = StudentRecord::default();
        for (column, cell) in COLUMNS.iter().zip(row) {
            match column.target {
                Target::Text(field) => *field(&mut record) = cells::text(cell),
                Target::NationalId(field) => {
                    *field(&mut record) = normalize_national_id(&cells::text(cell))
                }
                Target::Integer(field) => *field(&mut record) = cells::integer(cell),
                Target::Date(field) => *field(&mut record) = cells::date(cell),
                Target::Time(field) => *field(&mut record) = cells::time(cell),
            }
        }
        record
    }

    fn check_row(&self, record: &StudentRecord) -> Option<SkipReason> {
        let missing = record.missing_required_fields();
        if !missing.is_empty() {
            return Some(SkipReason::MissingRequiredFields {
                fields: missing.into_iter().map(String::from).collect(),
            });
        }

        if self.strict_rut && !validate_national_id(&record.national_id) {
            return Some(SkipReason::InvalidCheckDigit {
                rut: record.national_id.clone(),
            });
        }

        None
    }
}

/// Parse a roster spreadsheet with default options
pub fn parse_roster(bytes: &[u8]) -> NominaResult<RosterImportResult> {
    RosterImporter::new().import_bytes(bytes)
}
