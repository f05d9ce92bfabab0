use serde::{Deserialize, Serialize};
use std::fmt;

//==============================================================================
// Student records
//==============================================================================

/// One student parsed from a valid roster row.
///
/// Field names serialize to the column names of the `estudiantes_rotacion`
/// table so a result can be bulk-inserted as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "numero")]
    pub row_number: Option<i64>,
    #[serde(rename = "primer_apellido")]
    pub last_name1: String,
    #[serde(rename = "segundo_apellido")]
    pub last_name2: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "rut")]
    pub national_id: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "correo_electronico")]
    pub email: String,
    #[serde(rename = "nombre_contacto_emergencia")]
    pub emergency_contact_name: String,
    #[serde(rename = "telefono_contacto_emergencia")]
    pub emergency_contact_phone: String,
    #[serde(rename = "lugar_residencia")]
    pub residence: String,
    #[serde(rename = "carrera")]
    pub program: String,
    #[serde(rename = "nivel_que_cursa")]
    pub program_level: String,
    #[serde(rename = "tipo_practica")]
    pub practice_type: String,
    #[serde(rename = "campo_clinico_solicitado")]
    pub requested_clinical_site: String,
    #[serde(rename = "fecha_inicio")]
    pub start_date: Option<String>,
    #[serde(rename = "fecha_termino")]
    pub end_date: Option<String>,
    #[serde(rename = "numero_semanas_presenciales")]
    pub weeks_on_site: Option<i64>,
    #[serde(rename = "horario_desde")]
    pub schedule_from: Option<String>,
    #[serde(rename = "horario_hasta")]
    pub schedule_to: Option<String>,
    #[serde(rename = "cuarto_turno")]
    pub fourth_shift: String,
    #[serde(rename = "nombre_docente_centro_formador")]
    pub faculty_advisor_name: String,
    #[serde(rename = "telefono_docente_centro_formador")]
    pub faculty_advisor_phone: String,
    #[serde(rename = "numero_registro_sis")]
    pub registration_number: String,
    #[serde(rename = "inmunizacion_al_dia")]
    pub immunization_up_to_date: String,
    #[serde(rename = "numero_visitas")]
    pub visit_count: Option<i64>,
    #[serde(rename = "fecha_supervision")]
    pub supervision_date: Option<String>,
    #[serde(rename = "observaciones")]
    pub notes: String,
}

impl StudentRecord {
    /// Names of required fields that are empty, using their column names.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.last_name1.is_empty() {
            missing.push("primer_apellido");
        }
        if self.first_name.is_empty() {
            missing.push("nombre");
        }
        if self.national_id.is_empty() {
            missing.push("rut");
        }
        missing
    }

    /// "Nombre Apellido1 Apellido2", skipping an empty second last name
    pub fn full_name(&self) -> String {
        let mut name = format!("{} {}", self.first_name, self.last_name1);
        if !self.last_name2.is_empty() {
            name.push(' ');
            name.push_str(&self.last_name2);
        }
        name
    }
}

//==============================================================================
// Import result
//==============================================================================

/// Why a data row was dropped during import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    MissingRequiredFields { fields: Vec<String> },
    InvalidCheckDigit { rut: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingRequiredFields { fields } => {
                write!(f, "missing required data ({})", fields.join(", "))
            }
            SkipReason::InvalidCheckDigit { rut } => {
                write!(f, "RUT {} has an invalid check digit", rut)
            }
        }
    }
}

/// A dropped row, numbered 1-based as the spreadsheet shows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: SkipReason,
}

/// Outcome of importing one roster spreadsheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterImportResult {
    #[serde(rename = "estudiantes")]
    pub students: Vec<StudentRecord>,
    pub total: usize,
    #[serde(rename = "nombre_hoja")]
    pub sheet_name: String,
    #[serde(rename = "omitidas", default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRow>,
}

impl RosterImportResult {
    pub fn new(sheet_name: String, students: Vec<StudentRecord>, skipped: Vec<SkippedRow>) -> Self {
        Self {
            total: students.len(),
            students,
            sheet_name,
            skipped,
        }
    }
}
