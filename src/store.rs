//! Local data store: one JSON document holding the exercise catalog and the
//! logged sessions. Every operation reads the whole document, changes it and
//! writes it back.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::errors::{LiftLogError, LiftLogResult};
use crate::models::{FitnessData, TrainingSession};

/// Raw storage for the serialized document.
pub trait StorageBackend {
    /// `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> LiftLogResult<Option<String>>;
    fn write(&mut self, contents: &str) -> LiftLogResult<()>;
    fn remove(&mut self) -> LiftLogResult<()>;
}

pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileBackend { path: path.into() }
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> LiftLogResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn write(&mut self, contents: &str) -> LiftLogResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, contents)?;
        Ok(())
    }

    fn remove(&mut self) -> LiftLogResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryBackend {
    contents: Option<String>,
}

#[cfg(test)]
impl MemoryBackend {
    pub fn with_contents(contents: &str) -> Self {
        MemoryBackend { contents: Some(contents.to_string()) }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

#[cfg(test)]
impl StorageBackend for MemoryBackend {
    fn read(&self) -> LiftLogResult<Option<String>> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> LiftLogResult<()> {
        self.contents = Some(contents.to_string());
        Ok(())
    }

    fn remove(&mut self) -> LiftLogResult<()> {
        self.contents = None;
        Ok(())
    }
}

pub struct Store<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> Store<B> {
    pub fn new(backend: B) -> Self {
        Store { backend }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read_document(&self) -> LiftLogResult<Option<FitnessData>> {
        match self.backend.read()? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Document to modify and write back. An unreadable document is an error
    /// here so it never gets overwritten.
    fn load_for_update(&self) -> LiftLogResult<FitnessData> {
        Ok(self.read_document()?.unwrap_or_default())
    }

    /// Current document. Absent reads as empty; unreadable reads as the seed.
    pub fn load(&self) -> FitnessData {
        match self.read_document() {
            Ok(Some(data)) => {
                debug!(
                    exercises = data.catalog.len(),
                    sessions = data.sessions.len(),
                    "loaded document"
                );
                data
            }
            Ok(None) => FitnessData::default(),
            Err(e) => {
                warn!("stored document unreadable, using seed data: {}", e);
                FitnessData::seed()
            }
        }
    }

    /// Rejects weights JSON cannot carry (NaN, infinities) so every stored
    /// document reads back unchanged.
    pub fn save(&mut self, data: &FitnessData) -> LiftLogResult<()> {
        if let Some(session) = data
            .sessions
            .iter()
            .find(|s| s.weight.iter().any(|w| !w.is_finite()))
        {
            return Err(LiftLogError::NonFiniteWeight {
                date: session.date.clone(),
                exercise: session.exercise_name.clone(),
            });
        }

        let json = serde_json::to_string(data)?;
        self.backend.write(&json)?;
        debug!(
            exercises = data.catalog.len(),
            sessions = data.sessions.len(),
            "saved document"
        );
        Ok(())
    }

    /// Writes the seed document when nothing is stored yet. Returns whether
    /// anything was written.
    pub fn ensure_initialized(&mut self) -> LiftLogResult<bool> {
        if self.backend.read()?.is_some() {
            return Ok(false);
        }
        info!("no stored document, writing seed data");
        self.save(&FitnessData::seed())?;
        Ok(true)
    }

    /// Appends `name` to the catalog. Returns false for a name already present.
    pub fn add_exercise(&mut self, name: &str) -> LiftLogResult<bool> {
        let mut data = self.load_for_update()?;
        if data.has_exercise(name) {
            return Ok(false);
        }
        data.catalog.push(name.to_string());
        self.save(&data)?;
        info!(exercise = name, "added exercise");
        Ok(true)
    }

    pub fn list_exercises(&self) -> Vec<String> {
        self.load().catalog
    }

    pub fn append_session(
        &mut self,
        date: &str,
        exercise_name: &str,
        set_count: u32,
        reps: Vec<u32>,
        weight: Vec<f64>,
    ) -> LiftLogResult<()> {
        let mut data = self.load_for_update()?;
        data.sessions.push(TrainingSession {
            date: date.to_string(),
            exercise_name: exercise_name.to_string(),
            set_count,
            reps,
            weight,
        });
        self.save(&data)?;
        info!(date, exercise = exercise_name, sets = set_count, "logged session");
        Ok(())
    }

    pub fn list_sessions(&self) -> Vec<TrainingSession> {
        self.load().sessions
    }

    pub fn list_sessions_by_date(&self, date: &str) -> Vec<TrainingSession> {
        self.list_sessions()
            .into_iter()
            .filter(|s| s.date == date)
            .collect()
    }

    pub fn reset(&mut self) -> LiftLogResult<()> {
        self.backend.remove()?;
        info!("stored document erased");
        Ok(())
    }
}
