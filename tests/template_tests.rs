//! Roster template generation tests

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use royalbit_nomina::roster::{
    generate_template, parse_roster, write_template, COLUMNS, TEMPLATE_SHEET_NAME,
};
use std::io::Cursor;
use tempfile::TempDir;

#[test]
fn test_template_has_single_named_sheet() {
    let bytes = generate_template().unwrap();
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.sheet_names(), vec![TEMPLATE_SHEET_NAME.to_string()]);
}

#[test]
fn test_template_header_row_matches_layout() {
    let bytes = generate_template().unwrap();
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range(TEMPLATE_SHEET_NAME).unwrap();

    assert_eq!(range.get_size(), (4, COLUMNS.len()));
    for (col, column) in COLUMNS.iter().enumerate() {
        assert_eq!(
            range.get_value((0, col as u32)),
            Some(&Data::String(column.header.to_string()))
        );
    }
}

#[test]
fn test_template_round_trips_through_parser() {
    let result = parse_roster(&generate_template().unwrap()).unwrap();

    assert_eq!(result.sheet_name, "Nómina Estudiantes");
    assert_eq!(result.total, 3);
    assert!(result.skipped.is_empty());

    let people: Vec<(&str, &str, &str)> = result
        .students
        .iter()
        .map(|s| {
            (
                s.first_name.as_str(),
                s.last_name1.as_str(),
                s.national_id.as_str(),
            )
        })
        .collect();
    assert_eq!(
        people,
        vec![
            ("Juan", "Pérez", "12345678-9"),
            ("María", "González", "98765432-1"),
            ("Pedro", "Silva", "11223344-5"),
        ]
    );
}

#[test]
fn test_template_sample_values_normalize() {
    let result = parse_roster(&generate_template().unwrap()).unwrap();
    let juan = &result.students[0];

    assert_eq!(juan.row_number, Some(1));
    assert_eq!(juan.start_date.as_deref(), Some("2025-03-01"));
    assert_eq!(juan.end_date.as_deref(), Some("2025-04-30"));
    assert_eq!(juan.weeks_on_site, Some(8));
    assert_eq!(juan.schedule_from.as_deref(), Some("08:00"));
    assert_eq!(juan.schedule_to.as_deref(), Some("17:00"));
    // zero visits reads as no value
    assert_eq!(juan.visit_count, None);
    assert_eq!(juan.supervision_date, None);
    assert_eq!(juan.notes, "Estudiante destacado");

    assert_eq!(result.students[1].weeks_on_site, Some(16));
    assert_eq!(result.students[2].start_date.as_deref(), Some("2025-03-15"));
}

#[test]
fn test_write_template_to_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plantilla.xlsx");

    write_template(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(parse_roster(&bytes).unwrap().total, 3);
}
