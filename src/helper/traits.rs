//! helper::traits
//!
//! Capability trait for the external operations commands perform.
//!
//! # Design
//!
//! The trait is synchronous: the CLI runs one command to completion and
//! waits on any subprocess it starts. Timeouts and cancellation, if any,
//! belong to the tool being wrapped. All methods return `Result` with a
//! typed [`HelperError`]; `Build` failures carry the subprocess exit code so
//! the process can adopt it as its own.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use semver::Version;
use thiserror::Error;

use crate::helper::process::ProcessOutcome;

/// Errors from collaborator operations.
#[derive(Debug, Error)]
pub enum HelperError {
    /// Fetching package dependencies failed.
    #[error("fetch-packages failed: {message}")]
    Fetch {
        /// What went wrong
        message: String,
    },

    /// Updating package dependencies failed.
    #[error("update-packages failed: {message}")]
    Update {
        /// What went wrong
        message: String,
    },

    /// The build subprocess failed.
    #[error("build failed: {message}")]
    Build {
        /// What went wrong
        message: String,
        /// The subprocess exit code, adopted by the CLI process
        exit_code: i32,
    },

    /// Cleaning build artifacts failed.
    #[error("clean failed: {message}")]
    Clean {
        /// What went wrong
        message: String,
    },

    /// Creating the tar archive failed.
    #[error("create-archive failed: {message}")]
    Archive {
        /// What went wrong
        message: String,
    },

    /// Uploading the archive failed.
    #[error("upload-archive failed: {message}")]
    Upload {
        /// What went wrong
        message: String,
    },

    /// Tagging the repository failed.
    #[error("git-tag failed: {message}")]
    GitTag {
        /// What went wrong
        message: String,
    },

    /// A closed-set flag value was not recognized.
    #[error("unrecognized value '{value}' (expected one of: {expected})")]
    MalformedValue {
        /// The offending input
        value: String,
        /// The accepted values
        expected: &'static str,
    },

    /// A subprocess could not be started.
    #[error("process failed to start: {0}")]
    Io(#[from] std::io::Error),

    /// A git operation failed.
    #[error("git error: {0}")]
    Git(#[from] git2::Error),
}

impl HelperError {
    /// The exit code this failure carries, when the underlying tool
    /// reported one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            HelperError::Build { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

/// Build mode passed to the package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildConfiguration {
    /// Unoptimized build with debug info
    Debug,
    /// Optimized build
    Release,
}

impl FromStr for BuildConfiguration {
    type Err = HelperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(BuildConfiguration::Debug),
            "release" => Ok(BuildConfiguration::Release),
            other => Err(HelperError::MalformedValue {
                value: other.to_string(),
                expected: "debug, release",
            }),
        }
    }
}

/// Which portion of the semantic version `git-tag -i` bumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionComponent {
    /// Bump MAJOR, reset MINOR and PATCH
    Major,
    /// Bump MINOR, reset PATCH
    Minor,
    /// Bump PATCH
    Patch,
}

impl FromStr for VersionComponent {
    type Err = HelperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(VersionComponent::Major),
            "minor" => Ok(VersionComponent::Minor),
            "patch" => Ok(VersionComponent::Patch),
            other => Err(HelperError::MalformedValue {
                value: other.to_string(),
                expected: "major, minor, patch",
            }),
        }
    }
}

/// How `upload-archive` authenticates against S3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Explicit access key and secret
    Pair {
        /// Access key id
        key: String,
        /// Secret access key
        secret: String,
    },
    /// Path to a shared credentials file
    File(PathBuf),
}

/// The operations commands can perform.
///
/// One method per command-facing operation; inputs are already parsed and
/// typed by the handlers. Implementations decide how the operation actually
/// happens (subprocess, library call, in-memory recording).
pub trait Helpable {
    /// Fetch package dependencies at `source`, inside `image` when `linux`.
    fn fetch_packages(
        &self,
        source: &Path,
        linux: bool,
        image: &str,
    ) -> Result<ProcessOutcome, HelperError>;

    /// Update package dependencies at `source`, inside `image` when `linux`.
    fn update_packages(
        &self,
        source: &Path,
        linux: bool,
        image: &str,
    ) -> Result<ProcessOutcome, HelperError>;

    /// Build the package at `source` inside `image`.
    fn build(
        &self,
        source: &Path,
        configuration: BuildConfiguration,
        image: &str,
    ) -> Result<ProcessOutcome, HelperError>;

    /// Remove build artifacts at `source`.
    fn clean(&self, source: &Path) -> Result<ProcessOutcome, HelperError>;

    /// Create a tar archive at `archive` containing `files`.
    ///
    /// With `flat`, directory structure is dropped and every file lands at
    /// the archive root.
    fn create_archive(
        &self,
        archive: &Path,
        files: &[PathBuf],
        flat: bool,
    ) -> Result<(), HelperError>;

    /// Upload `archive` into `bucket` in `region`.
    fn upload_archive(
        &self,
        archive: &Path,
        bucket: &str,
        region: &str,
        credentials: &Credentials,
    ) -> Result<(), HelperError>;

    /// Create the tag `version` on the repository at `source`.
    fn git_tag(&self, source: &Path, version: &Version) -> Result<(), HelperError>;

    /// Bump `component` of the highest existing semver tag at `source` and
    /// tag the result. A repository with no semver tag yet gets `0.0.1`.
    fn increment_git_tag(
        &self,
        source: &Path,
        component: VersionComponent,
    ) -> Result<Version, HelperError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_configuration_parses_the_closed_set() {
        assert_eq!(
            "debug".parse::<BuildConfiguration>().unwrap(),
            BuildConfiguration::Debug
        );
        assert_eq!(
            "release".parse::<BuildConfiguration>().unwrap(),
            BuildConfiguration::Release
        );
        match "fast".parse::<BuildConfiguration>() {
            Err(HelperError::MalformedValue { value, .. }) => assert_eq!(value, "fast"),
            other => panic!("expected MalformedValue, got {:?}", other),
        }
    }

    #[test]
    fn version_component_parses_the_closed_set() {
        assert_eq!(
            "patch".parse::<VersionComponent>().unwrap(),
            VersionComponent::Patch
        );
        assert_eq!(
            "minor".parse::<VersionComponent>().unwrap(),
            VersionComponent::Minor
        );
        assert_eq!(
            "major".parse::<VersionComponent>().unwrap(),
            VersionComponent::Major
        );
        match "bogus".parse::<VersionComponent>() {
            Err(HelperError::MalformedValue { value, expected }) => {
                assert_eq!(value, "bogus");
                assert_eq!(expected, "major, minor, patch");
            }
            other => panic!("expected MalformedValue, got {:?}", other),
        }
    }

    #[test]
    fn only_build_failures_carry_an_exit_code() {
        let build = HelperError::Build {
            message: "boom".to_string(),
            exit_code: 101,
        };
        assert_eq!(build.exit_code(), Some(101));

        let fetch = HelperError::Fetch {
            message: "boom".to_string(),
        };
        assert_eq!(fetch.exit_code(), None);
    }
}
