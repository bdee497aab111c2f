//! External e-book converter
//!
//! The converter is a separate program that takes a package directory as its
//! last argument and writes `<name>.<ext>` next to it. Its stdout goes to the
//! terminal; stderr is captured for the error message.

use crate::config::ConverterConfig;
use crate::{AutomobileError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Turns an assembled package directory into a reader-device file
pub trait Converter {
    /// Converts the package at `package_dir` and returns the artifact path
    fn convert(&self, package_dir: &Path) -> Result<PathBuf>;
}

/// Runs a configured command with the package directory appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConverter {
    command: Vec<String>,
    output_extension: String,
}

impl CommandConverter {
    pub fn new(command: Vec<String>, output_extension: impl Into<String>) -> Self {
        Self {
            command,
            output_extension: output_extension.into(),
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(config.command.clone(), config.output_extension.clone())
    }

    /// Path the command is expected to write for `package_dir`
    pub fn expected_output(&self, package_dir: &Path) -> Result<PathBuf> {
        let name = package_dir.file_name().ok_or_else(|| {
            AutomobileError::Conversion(format!(
                "package path {} has no directory name",
                package_dir.display()
            ))
        })?;
        let parent = package_dir.parent().unwrap_or_else(|| Path::new("."));

        let mut file_name = name.to_os_string();
        file_name.push(".");
        file_name.push(&self.output_extension);
        Ok(parent.join(file_name))
    }
}

impl Converter for CommandConverter {
    fn convert(&self, package_dir: &Path) -> Result<PathBuf> {
        let Some((program, args)) = self.command.split_first() else {
            return Err(AutomobileError::Conversion(
                "no converter command configured".to_string(),
            ));
        };

        tracing::debug!("Running converter {} on {}", program, package_dir.display());
        let output = Command::new(program)
            .args(args)
            .arg(package_dir)
            .stdout(Stdio::inherit())
            .output()
            .map_err(|e| AutomobileError::Conversion(format!("failed to run {}: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AutomobileError::Conversion(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        let artifact = self.expected_output(package_dir)?;
        if !artifact.is_file() {
            return Err(AutomobileError::Conversion(format!(
                "{} did not produce {}",
                program,
                artifact.display()
            )));
        }

        Ok(artifact)
    }
}
