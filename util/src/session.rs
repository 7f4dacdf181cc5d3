//! Session management
//!
//! A session is a single execution of one of the executables. Each session
//! gets its own directory, `{exec_name}_{timestamp}`, inside the sessions
//! directory under the software root. Logs and any saved outputs are written
//! into this directory.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use chrono::{DateTime, Utc};
use conquer_once::OnceCell;
use log::debug;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal imports
use crate::time;

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static SESSION_EPOCH: OnceCell<DateTime<Utc>> = OnceCell::uninit();

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// A chrono format string which diplays a timestamp. See
/// https://docs.rs/chrono/0.4.11/chrono/format/strftime/index.html for more
/// information.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A struct storing information about the current session
#[derive(Clone, Debug)]
pub struct Session {
    /// The time at which the session started
    pub epoch: DateTime<Utc>,

    /// The root directory for this session
    pub session_root: PathBuf,

    /// The path to the session's log file
    pub log_file_path: PathBuf,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors associated with the session module.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("The software root environment variable (TRAJ_SW_ROOT) is not set")]
    SwRootNotSet,

    #[error("Cannot create the session directory: {0}")]
    CannotCreateDir(std::io::Error),

    #[error(
        "Cannot initialise the session epoch, have you already initialised the \
         session? (conquer_once error: {0})"
    )]
    CannotInitEpoch(conquer_once::TryInitError),

    #[error("Cannot get the epoch time, did you forget to initialise the session?")]
    CannotGetEpoch,

    #[error("Cannot write session file {0:?}: {1}")]
    CannotWriteFile(PathBuf, std::io::Error),

    #[error("Cannot serialise data for session file {0:?}: {1}")]
    JsonError(PathBuf, serde_json::Error),

    #[error("Cannot serialise record for session file {0:?}: {1}")]
    CsvError(PathBuf, csv::Error),

    #[error("Unsupported session file extension for {0:?}, expected json or csv")]
    UnsupportedExtension(PathBuf),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Session {
    /// Start a new session within the given directory.
    ///
    /// This will create a new session directory named `{exec_name}_{timestamp}`
    /// inside `sessions_dir`, which is relative to the software root.
    pub fn new(exec_name: &str, sessions_dir: &str) -> Result<Self, SessionError> {
        SESSION_EPOCH
            .try_init_once(Utc::now)
            .map_err(SessionError::CannotInitEpoch)?;

        let epoch = *SESSION_EPOCH.get().ok_or(SessionError::CannotGetEpoch)?;

        let mut path = crate::host::get_sw_root().map_err(|_| SessionError::SwRootNotSet)?;
        path.push(sessions_dir);
        path.push(format!("{}_{}", exec_name, epoch.format(TIMESTAMP_FORMAT)));

        fs::create_dir_all(&path).map_err(SessionError::CannotCreateDir)?;

        let log_file_path = path.join(format!("{}.log", exec_name));

        Ok(Session {
            epoch,
            session_root: path,
            log_file_path,
        })
    }

    /// Save the given data as pretty-printed JSON at the session-relative path.
    pub fn save_json<P: AsRef<Path>, T: Serialize>(
        &self,
        path: P,
        data: &T,
    ) -> Result<PathBuf, SessionError> {
        let (full_path, file) = self.create_file(path, "json")?;

        serde_json::to_writer_pretty(file, data)
            .map_err(|e| SessionError::JsonError(full_path.clone(), e))?;

        debug!("Saved {:?}", full_path);
        Ok(full_path)
    }

    /// Save the given records as a CSV file with headers at the
    /// session-relative path.
    pub fn save_csv<P: AsRef<Path>, R: Serialize>(
        &self,
        path: P,
        records: &[R],
    ) -> Result<PathBuf, SessionError> {
        let (full_path, file) = self.create_file(path, "csv")?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(file);

        for record in records {
            writer
                .serialize(record)
                .map_err(|e| SessionError::CsvError(full_path.clone(), e))?;
        }
        writer
            .flush()
            .map_err(|e| SessionError::CannotWriteFile(full_path.clone(), e))?;

        debug!("Saved {} records to {:?}", records.len(), full_path);
        Ok(full_path)
    }

    /// Create (truncating) a file at the session-relative path, checking that
    /// it has the expected extension.
    fn create_file<P: AsRef<Path>>(
        &self,
        path: P,
        extension: &str,
    ) -> Result<(PathBuf, File), SessionError> {
        let full_path = self.session_root.join(path);

        if full_path.extension().and_then(|s| s.to_str()) != Some(extension) {
            return Err(SessionError::UnsupportedExtension(full_path));
        }

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SessionError::CannotWriteFile(full_path.clone(), e))?;
        }

        let file = File::create(&full_path)
            .map_err(|e| SessionError::CannotWriteFile(full_path.clone(), e))?;

        Ok((full_path, file))
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the number of seconds elapsed since the start of the session.
///
/// Returns NaN if the session has not been started yet.
pub fn get_elapsed_seconds() -> f64 {
    match SESSION_EPOCH.get() {
        Some(e) => time::duration_to_seconds(Utc::now() - *e).unwrap_or(std::f64::NAN),
        None => std::f64::NAN,
    }
}
