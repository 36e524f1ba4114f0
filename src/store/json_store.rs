use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Deserialize;
use serde_json::Value;

use crate::error::StoreError;
use crate::state::AppState;
use crate::store::schema::{EXPORT_VERSION, ExportData, export_filename};

pub const STATE_FILE: &str = "state.json";

/// The single persistent slot holding the whole serialized AppState.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self, StoreError> {
        Self::with_base_dir(Self::default_dir())
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nursepro")
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Missing or unreadable state falls back to the first-run default.
    pub fn load_state(&self) -> AppState {
        let path = self.file_path(STATE_FILE);
        if !path.exists() {
            return AppState::default();
        }
        match fs::read_to_string(&path) {
            Ok(content) => parse_state(&content).unwrap_or_else(|| {
                log::warn!(
                    "saved state at {} is corrupt, starting fresh",
                    path.display()
                );
                AppState::default()
            }),
            Err(e) => {
                log::warn!("could not read {}: {e}", path.display());
                AppState::default()
            }
        }
    }

    /// Full rewrite through a temp file so a crash never leaves half a document.
    pub fn save_state(&self, state: &AppState) -> Result<(), StoreError> {
        let path = self.file_path(STATE_FILE);
        let tmp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        log::debug!("saved state ({} questions)", state.questions.len());
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        let path = self.file_path(STATE_FILE);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Remove a temp file left by an interrupted save. Returns true if one was found.
    pub fn remove_stale_temp(&self) -> bool {
        let tmp_path = self.file_path(STATE_FILE).with_extension("json.tmp");
        if tmp_path.exists() {
            let _ = fs::remove_file(&tmp_path);
            return true;
        }
        false
    }
}

/// Minimal shape check for the saved slot: an object whose `questions` is an
/// array, then a normal decode. Questions that fail validation are dropped so
/// the rest of the learner's progress survives.
pub fn parse_state(content: &str) -> Option<AppState> {
    let value: Value = serde_json::from_str(content).ok()?;
    if !value.get("questions").is_some_and(Value::is_array) {
        return None;
    }
    let mut state = AppState::deserialize(value).ok()?;
    state.questions.retain(|q| match q.validate() {
        Ok(()) => true,
        Err(e) => {
            log::warn!("dropping saved question {}: {e}", q.id);
            false
        }
    });
    Some(state.with_unique_ids())
}

/// Write an export document named after today's date into `dir`.
pub fn write_export(state: &AppState, dir: &Path) -> Result<PathBuf, StoreError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(Local::now().date_naive()));
    let json = serde_json::to_string_pretty(&ExportData::new(state))
        .map_err(|e| StoreError::Serialize(e.to_string()))?;
    fs::write(&path, json)?;
    Ok(path)
}

pub fn read_import(path: &Path) -> Result<AppState, StoreError> {
    let content = fs::read_to_string(path)?;
    parse_import(&content)
}

/// Decode and validate an import document. Nothing is accepted unless every
/// question passes the admission checks and the stats are self-consistent.
pub fn parse_import(content: &str) -> Result<AppState, StoreError> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| StoreError::Import(e.to_string()))?;

    if let Some(version) = value.get("exportVersion")
        && version.as_u64() != Some(u64::from(EXPORT_VERSION))
    {
        return Err(StoreError::InvalidImport(format!(
            "unsupported export version {version} (expected {EXPORT_VERSION})"
        )));
    }

    let state = AppState::deserialize(value)
        .map_err(|e| StoreError::InvalidImport(e.to_string()))?;

    for q in &state.questions {
        q.validate()
            .map_err(|e| StoreError::InvalidImport(format!("question {}: {e}", q.id)))?;
    }
    if !state.stats.is_consistent() {
        return Err(StoreError::InvalidImport(
            "stats report more correct answers than attempts".to_string(),
        ));
    }

    Ok(state.with_unique_ids())
}
