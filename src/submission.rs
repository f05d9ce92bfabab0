//! Rotation request submission
//!
//! A parsed roster is only half of a rotation request. Submitting one uploads
//! the original spreadsheet to file storage, creates the request record and
//! bulk-inserts the students under the new request id. Storage and
//! persistence are collaborators behind [`FileStore`] and [`RosterStore`].

use crate::error::{NominaError, NominaResult};
use crate::types::{RosterImportResult, StudentRecord};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};
use tracing::info;
use uuid::Uuid;

/// State a newly submitted request starts in
pub const INITIAL_STATUS: &str = "pendiente";

/// Request details entered alongside the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationRequestDraft {
    #[serde(rename = "centro_formador_id")]
    pub training_center_id: String,
    #[serde(rename = "especialidad")]
    pub specialty: String,
    #[serde(rename = "fecha_inicio")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "fecha_termino")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "comentarios", default)]
    pub comments: String,
}

impl RotationRequestDraft {
    pub fn validate(&self) -> NominaResult<()> {
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Err(NominaError::InvalidRequest(
                "specialty, start date and end date are required".to_string(),
            ));
        };
        if self.specialty.trim().is_empty() {
            return Err(NominaError::InvalidRequest(
                "specialty, start date and end date are required".to_string(),
            ));
        }
        if end <= start {
            return Err(NominaError::InvalidRequest(
                "end date must be after the start date".to_string(),
            ));
        }
        Ok(())
    }
}

/// A file accepted by storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub path: String,
    pub url: String,
    /// Name as uploaded by the user
    pub name: String,
}

/// A persisted rotation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationRequest {
    pub id: String,
    #[serde(flatten)]
    pub draft: RotationRequestDraft,
    #[serde(rename = "archivo_excel_url")]
    pub file_url: String,
    #[serde(rename = "archivo_excel_nombre")]
    pub file_name: String,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "fecha_solicitud")]
    pub requested_on: NaiveDate,
}

/// Object storage for uploaded spreadsheets
pub trait FileStore {
    fn upload(&self, key: &str, bytes: &[u8], original_name: &str) -> NominaResult<StoredFile>;
}

/// Persistence for rotation requests and their students
pub trait RosterStore {
    /// Create the request and return its id
    fn create_rotation_request(
        &self,
        draft: &RotationRequestDraft,
        file: &StoredFile,
    ) -> NominaResult<String>;

    fn insert_students(&self, request_id: &str, students: &[StudentRecord]) -> NominaResult<()>;
}

/// What a successful submission produced
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub request_id: String,
    pub file: StoredFile,
    pub students_inserted: usize,
}

/// Latin letters whose canonical decomposition is a base letter plus marks
const ACCENT_FOLDS: &[(&str, char)] = &[
    ("àáâãäåāăą", 'a'),
    ("ÀÁÂÃÄÅĀĂĄ", 'A'),
    ("çćĉċč", 'c'),
    ("ÇĆĈĊČ", 'C'),
    ("ď", 'd'),
    ("Ď", 'D'),
    ("èéêëēĕėęě", 'e'),
    ("ÈÉÊËĒĔĖĘĚ", 'E'),
    ("ĝğġģ", 'g'),
    ("ĜĞĠĢ", 'G'),
    ("ĥ", 'h'),
    ("Ĥ", 'H'),
    ("ìíîïĩīĭį", 'i'),
    ("ÌÍÎÏĨĪĬĮİ", 'I'),
    ("ĵ", 'j'),
    ("Ĵ", 'J'),
    ("ķ", 'k'),
    ("Ķ", 'K'),
    ("ĺļľ", 'l'),
    ("ĹĻĽ", 'L'),
    ("ñńņň", 'n'),
    ("ÑŃŅŇ", 'N'),
    ("òóôõöōŏő", 'o'),
    ("ÒÓÔÕÖŌŎŐ", 'O'),
    ("ŕŗř", 'r'),
    ("ŔŖŘ", 'R'),
    ("śŝşš", 's'),
    ("ŚŜŞŠ", 'S'),
    ("ţť", 't'),
    ("ŢŤ", 'T'),
    ("ùúûüũūŭůűų", 'u'),
    ("ÙÚÛÜŨŪŬŮŰŲ", 'U'),
    ("ŵ", 'w'),
    ("Ŵ", 'W'),
    ("ýÿŷ", 'y'),
    ("ÝŸŶ", 'Y'),
    ("źżž", 'z'),
    ("ŹŻŽ", 'Z'),
];

fn fold_accent(c: char) -> char {
    if c.is_ascii() {
        return c;
    }
    ACCENT_FOLDS
        .iter()
        .find(|(accented, _)| accented.contains(c))
        .map_or(c, |&(_, base)| base)
}

fn invalid_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^a-zA-Z0-9._-]").expect("valid file name regex"))
}

fn repeated_underscores() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"_{2,}").expect("valid underscore regex"))
}

/// Make a user-supplied file name safe for a storage key
pub fn sanitize_file_name(name: &str) -> String {
    let folded: String = name.chars().map(fold_accent).collect();
    let replaced = invalid_chars().replace_all(&folded, "_");
    repeated_underscores()
        .replace_all(&replaced, "_")
        .to_lowercase()
}

/// Storage key for a center's upload: `{center}/{timestamp}_{name}`
pub fn storage_key(training_center_id: &str, timestamp_ms: i64, file_name: &str) -> String {
    format!(
        "{}/{}_{}",
        training_center_id,
        timestamp_ms,
        sanitize_file_name(file_name)
    )
}

/// Upload the roster file, create the request and insert its students
pub fn submit_rotation_request(
    draft: &RotationRequestDraft,
    file_name: &str,
    bytes: &[u8],
    roster: &RosterImportResult,
    files: &dyn FileStore,
    store: &dyn RosterStore,
) -> NominaResult<SubmissionReceipt> {
    draft.validate()?;

    let key = storage_key(
        &draft.training_center_id,
        chrono::Utc::now().timestamp_millis(),
        file_name,
    );
    let file = files.upload(&key, bytes, file_name)?;

    let request_id = store.create_rotation_request(draft, &file)?;
    store.insert_students(&request_id, &roster.students)?;

    info!(
        request_id = %request_id,
        students = roster.students.len(),
        file = %file.path,
        "rotation request submitted"
    );

    Ok(SubmissionReceipt {
        request_id,
        file,
        students_inserted: roster.students.len(),
    })
}

//==============================================================================
// In-memory backend
//==============================================================================

/// File storage and persistence kept in process memory
#[derive(Debug)]
pub struct InMemoryBackend {
    public_url: String,
    files: Mutex<HashMap<String, Vec<u8>>>,
    requests: Mutex<Vec<RotationRequest>>,
    students: Mutex<HashMap<String, Vec<StudentRecord>>>,
}

impl InMemoryBackend {
    pub fn new(public_url: impl Into<String>) -> Self {
        Self {
            public_url: public_url.into(),
            files: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            students: Mutex::new(HashMap::new()),
        }
    }

    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().ok()?.get(path).cloned()
    }

    pub fn requests(&self) -> Vec<RotationRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn students_for(&self, request_id: &str) -> Vec<StudentRecord> {
        self.students
            .lock()
            .ok()
            .and_then(|s| s.get(request_id).cloned())
            .unwrap_or_default()
    }
}

fn poisoned<T>(_: T) -> NominaError {
    NominaError::Storage("backend lock poisoned".to_string())
}

impl FileStore for InMemoryBackend {
    fn upload(&self, key: &str, bytes: &[u8], original_name: &str) -> NominaResult<StoredFile> {
        let mut files = self.files.lock().map_err(poisoned)?;
        if files.contains_key(key) {
            return Err(NominaError::Storage(format!("object '{}' already exists", key)));
        }
        files.insert(key.to_string(), bytes.to_vec());

        Ok(StoredFile {
            path: key.to_string(),
            url: format!("{}/{}", self.public_url.trim_end_matches('/'), key),
            name: original_name.to_string(),
        })
    }
}

impl RosterStore for InMemoryBackend {
    fn create_rotation_request(
        &self,
        draft: &RotationRequestDraft,
        file: &StoredFile,
    ) -> NominaResult<String> {
        let request = RotationRequest {
            id: Uuid::new_v4().to_string(),
            draft: draft.clone(),
            file_url: file.url.clone(),
            file_name: file.name.clone(),
            status: INITIAL_STATUS.to_string(),
            requested_on: chrono::Local::now().date_naive(),
        };
        let id = request.id.clone();
        self.requests.lock().map_err(poisoned)?.push(request);
        Ok(id)
    }

    fn insert_students(&self, request_id: &str, students: &[StudentRecord]) -> NominaResult<()> {
        let known = self
            .requests
            .lock()
            .map_err(poisoned)?
            .iter()
            .any(|r| r.id == request_id);
        if !known {
            return Err(NominaError::Storage(format!(
                "rotation request '{}' does not exist",
                request_id
            )));
        }

        self.students
            .lock()
            .map_err(poisoned)?
            .entry(request_id.to_string())
            .or_default()
            .extend_from_slice(students);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(
            sanitize_file_name("Nómina Estudiantes (final).xlsx"),
            "nomina_estudiantes_final_.xlsx"
        );
        assert_eq!(sanitize_file_name("año  2025.xls"), "ano_2025.xls");
        assert_eq!(sanitize_file_name("roster-v2.xlsx"), "roster-v2.xlsx");
    }

    #[test]
    fn test_sanitize_folds_central_european_accents() {
        assert_eq!(sanitize_file_name("Šťastný Dvořák.xlsx"), "stastny_dvorak.xlsx");
        assert_eq!(sanitize_file_name("Łódź.xls"), "_odz.xls");
        assert_eq!(fold_accent('ý'), 'y');
        assert_eq!(fold_accent('Ğ'), 'G');
    }

    #[test]
    fn test_storage_key() {
        assert_eq!(
            storage_key("centro-1", 1_700_000_000_000, "Nómina.xlsx"),
            "centro-1/1700000000000_nomina.xlsx"
        );
    }

    #[test]
    fn test_upload_rejects_duplicate_key() {
        let backend = InMemoryBackend::new("https://storage.local/rotaciones-excel");
        let file = backend.upload("c/1_a.xlsx", b"data", "a.xlsx").unwrap();
        assert_eq!(file.url, "https://storage.local/rotaciones-excel/c/1_a.xlsx");
        assert!(backend.upload("c/1_a.xlsx", b"data", "a.xlsx").is_err());
    }

    #[test]
    fn test_insert_students_requires_request() {
        let backend = InMemoryBackend::new("https://storage.local");
        let result = backend.insert_students("missing", &[StudentRecord::default()]);
        assert!(matches!(result, Err(NominaError::Storage(_))));
    }
}
