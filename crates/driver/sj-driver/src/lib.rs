//! Verification driver
//!
//! Ties the stages together for callers that start from text or from a file:
//! preprocessing, validation and the mapping of outcomes to exit statuses.
//! Configuration lives in [`config`].

pub mod config;

pub use config::{CONFIG_FILE_NAME, CheckConfig, Config};

use log::debug;
use sj_resolve::{CheckError, CheckOptions, CheckResult, Program, validate};
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

/// Process exit status of a verification run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitStatus {
    /// The source is legal
    Valid,
    /// The source violates a rule
    Invalid,
    /// The source could not be read
    IoError,
}

impl ExitStatus {
    /// Digit printed on stdout and returned to the shell
    pub fn code(self) -> u8 {
        match self {
            Self::Valid => 0,
            Self::Invalid => 1,
            Self::IoError => 2,
        }
    }
}

/// Anything that stops a file from being verified or accepted
#[derive(Debug, Error)]
pub enum DriverError {
    /// Reading the source failed
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: io::Error,
    },

    /// The file name does not carry the configured extension
    #[error("{} is not a `.{expected}` file", path.display())]
    InvalidExtension {
        /// File given
        path: PathBuf,
        /// Configured extension, without the dot
        expected: String,
    },

    /// The source was read and is invalid
    #[error(transparent)]
    Check(#[from] CheckError),
}

impl DriverError {
    /// Exit status this failure maps to
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            Self::Io { .. } | Self::InvalidExtension { .. } => ExitStatus::IoError,
            Self::Check(_) => ExitStatus::Invalid,
        }
    }
}

/// Verify source text
///
/// # Errors
///
/// Returns the first violation in the source.
pub fn check_source(source: &str, options: &CheckOptions) -> CheckResult<Program> {
    let lines = sj_parser::preprocess(source);
    debug!("{} significant lines", lines.len());
    validate(&lines, options)
}

/// Read a source file after checking its extension
///
/// # Errors
///
/// Fails on a wrong extension or an unreadable file.
pub fn load_source(path: &Path, config: &CheckConfig) -> Result<String, DriverError> {
    let has_extension = path
        .extension()
        .is_some_and(|extension| extension == config.extension.as_str());
    if !has_extension {
        return Err(DriverError::InvalidExtension {
            path: path.to_path_buf(),
            expected: config.extension.clone(),
        });
    }

    fs::read_to_string(path).map_err(|source| DriverError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Verify a source file
///
/// # Errors
///
/// Any [`DriverError`]; see [`DriverError::exit_status`] for the mapping to
/// exit statuses.
pub fn check_file(path: &Path, config: &CheckConfig) -> Result<Program, DriverError> {
    let source = load_source(path, config)?;
    debug!("checking {} with {} brace scanning", path.display(), config.brace_scan);
    Ok(check_source(&source, &config.options())?)
}
