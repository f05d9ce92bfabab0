//! Downloadable roster template (.xlsx)

use crate::error::NominaResult;
use crate::roster::columns::COLUMNS;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Worksheet name of the generated template
pub const TEMPLATE_SHEET_NAME: &str = "Nómina Estudiantes";

/// File name offered when the template is downloaded
pub const TEMPLATE_FILE_NAME: &str = "plantilla_nomina_estudiantes.xlsx";

enum Sample {
    Number(f64),
    Text(&'static str),
}

use Sample::{Number as N, Text as T};

const SAMPLE_ROWS: [[Sample; 27]; 3] = [
    [
        N(1.0), T("Pérez"), T("González"), T("Juan"), T("12345678-9"), T("+56912345678"),
        T("juan.perez@ejemplo.cl"), T("María Pérez"), T("+56987654321"),
        T("Santiago, Región Metropolitana"), T("Enfermería"), T("4to año"),
        T("Práctica Profesional"), T("Medicina Interna"), T("01/03/2025"), T("30/04/2025"),
        N(8.0), T("08:00"), T("17:00"), T("No"), T("Dra. Ana Silva"), T("+56911223344"),
        T("REG-2025-001"), T("Si"), N(0.0), T(""), T("Estudiante destacado"),
    ],
    [
        N(2.0), T("González"), T("Muñoz"), T("María"), T("98765432-1"), T("+56923456789"),
        T("maria.gonzalez@ejemplo.cl"), T("Pedro González"), T("+56934567890"),
        T("Valparaíso, Región de Valparaíso"), T("Medicina"), T("5to año"), T("Internado"),
        T("Urgencias"), T("01/03/2025"), T("30/06/2025"), N(16.0), T("08:00"), T("20:00"),
        T("Si"), T("Dr. Carlos Rojas"), T("+56945678901"), T("REG-2025-002"), T("Si"),
        N(0.0), T(""), T(""),
    ],
    [
        N(3.0), T("Silva"), T("Torres"), T("Pedro"), T("11223344-5"), T("+56956789012"),
        T("pedro.silva@ejemplo.cl"), T("Ana Silva"), T("+56967890123"),
        T("Concepción, Región del Biobío"), T("Kinesiología"), T("3er año"),
        T("Práctica Clínica"), T("Traumatología"), T("15/03/2025"), T("15/05/2025"), N(8.0),
        T("09:00"), T("18:00"), T("No"), T("Klgo. Luis Morales"), T("+56978901234"),
        T("REG-2025-003"), T("Si"), N(0.0), T(""), T("Requiere supervisión adicional"),
    ],
];

fn build_workbook() -> NominaResult<Workbook> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(TEMPLATE_SHEET_NAME)?;

    for (col_idx, column) in COLUMNS.iter().enumerate() {
        let col = col_idx as u16;
        worksheet.write_string_with_format(0, col, column.header, &header_format)?;
        worksheet.set_column_width(col, column.width)?;
    }

    for (row_idx, sample) in SAMPLE_ROWS.iter().enumerate() {
        let row = row_idx as u32 + 1;
        for (col_idx, value) in sample.iter().enumerate() {
            let col = col_idx as u16;
            match value {
                Sample::Number(n) => {
                    worksheet.write_number(row, col, *n)?;
                }
                Sample::Text(t) if !t.is_empty() => {
                    worksheet.write_string(row, col, *t)?;
                }
                Sample::Text(_) => {}
            }
        }
    }

    Ok(workbook)
}

/// Generate the roster template as .xlsx bytes
pub fn generate_template() -> NominaResult<Vec<u8>> {
    let mut workbook = build_workbook()?;
    Ok(workbook.save_to_buffer()?)
}

/// Write the roster template to `path`
pub fn write_template(path: &Path) -> NominaResult<()> {
    let mut workbook = build_workbook()?;
    workbook.save(path)?;
    Ok(())
}
