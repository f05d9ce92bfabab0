//! The fixed 27-column roster layout (A through AA)
//!
//! Column meaning is purely positional. Both the importer and the template
//! generator read this table, so a layout change happens here and nowhere else.

use crate::types::StudentRecord;

/// Number of columns in the roster layout
pub const COLUMN_COUNT: usize = 27;

/// How a cell is normalized and which record field receives it
#[derive(Clone, Copy)]
pub enum Target {
    /// Trimmed free text
    Text(fn(&mut StudentRecord) -> &mut String),
    /// RUT normalized to `BODY-CHECKDIGIT`
    NationalId(fn(&mut StudentRecord) -> &mut String),
    /// `parseInt`-style integer
    Integer(fn(&mut StudentRecord) -> &mut Option<i64>),
    /// `YYYY-MM-DD`
    Date(fn(&mut StudentRecord) -> &mut Option<String>),
    /// `HH:MM`
    Time(fn(&mut StudentRecord) -> &mut Option<String>),
}

/// One roster column
#[derive(Clone, Copy)]
pub struct Column {
    /// Header text written to the template
    pub header: &'static str,
    /// Serialized field name of the target
    pub field: &'static str,
    /// Template column width, in characters
    pub width: f64,
    pub target: Target,
}

impl Column {
    const fn new(header: &'static str, field: &'static str, width: f64, target: Target) -> Self {
        Self {
            header,
            field,
            width,
            target,
        }
    }
}

/// The roster layout, in column order
pub static COLUMNS: [Column; COLUMN_COUNT] = [
    Column::new("N°", "numero", 5.0, Target::Integer(|s| &mut s.row_number)),
    Column::new("1° Apellido", "primer_apellido", 15.0, Target::Text(|s| &mut s.last_name1)),
    Column::new("2° Apellido", "segundo_apellido", 15.0, Target::Text(|s| &mut s.last_name2)),
    Column::new("Nombre", "nombre", 15.0, Target::Text(|s| &mut s.first_name)),
    Column::new("Rut", "rut", 12.0, Target::NationalId(|s| &mut s.national_id)),
    Column::new("Telefono", "telefono", 15.0, Target::Text(|s| &mut s.phone)),
    Column::new("Correo Electronico", "correo_electronico", 25.0, Target::Text(|s| &mut s.email)),
    Column::new(
        "Nombre de contacto de emergencia",
        "nombre_contacto_emergencia",
        25.0,
        Target::Text(|s| &mut s.emergency_contact_name),
    ),
    Column::new(
        "Telefono de contacto de emergencia",
        "telefono_contacto_emergencia",
        15.0,
        Target::Text(|s| &mut s.emergency_contact_phone),
    ),
    Column::new("Lugar de residencia", "lugar_residencia", 30.0, Target::Text(|s| &mut s.residence)),
    Column::new("Carrera", "carrera", 20.0, Target::Text(|s| &mut s.program)),
    Column::new("Nivel que cursa", "nivel_que_cursa", 12.0, Target::Text(|s| &mut s.program_level)),
    Column::new("Tipo de practica", "tipo_practica", 20.0, Target::Text(|s| &mut s.practice_type)),
    Column::new(
        "Campo clinico solicitado",
        "campo_clinico_solicitado",
        25.0,
        Target::Text(|s| &mut s.requested_clinical_site),
    ),
    Column::new("Fecha Inicio", "fecha_inicio", 12.0, Target::Date(|s| &mut s.start_date)),
    Column::new("Fecha termino", "fecha_termino", 12.0, Target::Date(|s| &mut s.end_date)),
    Column::new(
        "N° semanas presenciales",
        "numero_semanas_presenciales",
        10.0,
        Target::Integer(|s| &mut s.weeks_on_site),
    ),
    Column::new("Desde (horario)", "horario_desde", 10.0, Target::Time(|s| &mut s.schedule_from)),
    Column::new("Hasta (horario)", "horario_hasta", 10.0, Target::Time(|s| &mut s.schedule_to)),
    Column::new("Cuarto turno", "cuarto_turno", 12.0, Target::Text(|s| &mut s.fourth_shift)),
    Column::new(
        "Nombre docente centro formador",
        "nombre_docente_centro_formador",
        25.0,
        Target::Text(|s| &mut s.faculty_advisor_name),
    ),
    Column::new(
        "Telefono docente centro formador",
        "telefono_docente_centro_formador",
        15.0,
        Target::Text(|s| &mut s.faculty_advisor_phone),
    ),
    Column::new("N° reg. sis", "numero_registro_sis", 15.0, Target::Text(|s| &mut s.registration_number)),
    Column::new(
        "Inmunizacion al dia (Si/No)",
        "inmunizacion_al_dia",
        15.0,
        Target::Text(|s| &mut s.immunization_up_to_date),
    ),
    Column::new("N° Visitas", "numero_visitas", 10.0, Target::Integer(|s| &mut s.visit_count)),
    Column::new(
        "Fecha de la supervision",
        "fecha_supervision",
        15.0,
        Target::Date(|s| &mut s.supervision_date),
    ),
    Column::new("Observaciones", "observaciones", 30.0, Target::Text(|s| &mut s.notes)),
];

/// Column index holding the first last name (B)
pub const LAST_NAME_COLUMN: usize = 1;
/// Column index holding the first name (D)
pub const FIRST_NAME_COLUMN: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_spans_a_to_aa() {
        assert_eq!(COLUMNS.len(), COLUMN_COUNT);
        assert_eq!(COLUMNS[0].header, "N°");
        assert_eq!(COLUMNS[COLUMN_COUNT - 1].header, "Observaciones");
    }

    #[test]
    fn test_name_columns_match_layout() {
        assert_eq!(COLUMNS[LAST_NAME_COLUMN].field, "primer_apellido");
        assert_eq!(COLUMNS[FIRST_NAME_COLUMN].field, "nombre");
        assert!(COLUMNS[LAST_NAME_COLUMN]
            .header
            .to_lowercase()
            .contains("apellido"));
    }

    #[test]
    fn test_fields_match_serialized_record() {
        let json = serde_json::to_value(StudentRecord::default()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), COLUMN_COUNT);
        for column in &COLUMNS {
            assert!(object.contains_key(column.field), "{}", column.field);
        }
    }

    #[test]
    fn test_targets_write_distinct_fields() {
        let mut record = StudentRecord::default();
        for (idx, column) in COLUMNS.iter().enumerate() {
            let marker = idx.to_string();
            match column.target {
                Target::Text(field) | Target::NationalId(field) => *field(&mut record) = marker,
                Target::Integer(field) => *field(&mut record) = Some(idx as i64),
                Target::Date(field) | Target::Time(field) => *field(&mut record) = Some(marker),
            }
        }
        assert_eq!(record.row_number, Some(0));
        assert_eq!(record.national_id, "4");
        assert_eq!(record.start_date.as_deref(), Some("14"));
        assert_eq!(record.schedule_to.as_deref(), Some("18"));
        assert_eq!(record.notes, "26");
    }
}
