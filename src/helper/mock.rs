//! helper::mock
//!
//! Mock [`Helpable`] implementation for deterministic testing.
//!
//! Records every call with its parsed arguments and returns scriptable
//! results, so handler tests can assert exactly what reached the
//! collaborator seam without touching docker, tar, git, or the network.
//!
//! # Example
//!
//! ```
//! use capstan::helper::mock::MockHelper;
//! use capstan::helper::{Helpable, VersionComponent};
//! use std::path::Path;
//!
//! let helper = MockHelper::new();
//! helper
//!     .increment_git_tag(Path::new("/tmp/repo"), VersionComponent::Patch)
//!     .unwrap();
//!
//! let calls = helper.calls();
//! assert_eq!(calls.len(), 1);
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use semver::Version;

use crate::helper::process::ProcessOutcome;
use crate::helper::traits::{
    BuildConfiguration, Credentials, Helpable, HelperError, VersionComponent,
};

/// One recorded call with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum HelperCall {
    /// `fetch_packages` was invoked
    FetchPackages {
        /// Source path handed to the helper
        source: PathBuf,
        /// Whether the Linux/Docker variant was requested
        linux: bool,
        /// Docker image name
        image: String,
    },
    /// `update_packages` was invoked
    UpdatePackages {
        /// Source path handed to the helper
        source: PathBuf,
        /// Whether the Linux/Docker variant was requested
        linux: bool,
        /// Docker image name
        image: String,
    },
    /// `build` was invoked
    Build {
        /// Source path handed to the helper
        source: PathBuf,
        /// Parsed build configuration
        configuration: BuildConfiguration,
        /// Docker image name
        image: String,
    },
    /// `clean` was invoked
    Clean {
        /// Source path handed to the helper
        source: PathBuf,
    },
    /// `create_archive` was invoked
    CreateArchive {
        /// Destination archive path
        archive: PathBuf,
        /// Files to include
        files: Vec<PathBuf>,
        /// Whether directory structure is dropped
        flat: bool,
    },
    /// `upload_archive` was invoked
    UploadArchive {
        /// Archive to upload
        archive: PathBuf,
        /// Target bucket
        bucket: String,
        /// Bucket region
        region: String,
        /// Credentials chosen by the handler
        credentials: Credentials,
    },
    /// `git_tag` was invoked
    GitTag {
        /// Repository path
        source: PathBuf,
        /// Exact version tagged
        version: Version,
    },
    /// `increment_git_tag` was invoked
    IncrementGitTag {
        /// Repository path
        source: PathBuf,
        /// Component bumped
        component: VersionComponent,
    },
}

/// Internal mutable state shared across clones.
#[derive(Debug, Default)]
struct MockHelperInner {
    calls: Vec<HelperCall>,
    increment_result: Option<Version>,
}

/// Recording helper for tests.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockHelper {
    inner: Arc<Mutex<MockHelperInner>>,
}

impl MockHelper {
    /// A mock with no scripted results.
    pub fn new() -> Self {
        MockHelper::default()
    }

    /// Script the version `increment_git_tag` returns.
    pub fn set_increment_result(&self, version: Version) {
        self.inner.lock().unwrap().increment_result = Some(version);
    }

    /// Everything recorded so far, in call order.
    pub fn calls(&self) -> Vec<HelperCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    fn record(&self, call: HelperCall) {
        self.inner.lock().unwrap().calls.push(call);
    }
}

impl Helpable for MockHelper {
    fn fetch_packages(
        &self,
        source: &Path,
        linux: bool,
        image: &str,
    ) -> Result<ProcessOutcome, HelperError> {
        self.record(HelperCall::FetchPackages {
            source: source.to_path_buf(),
            linux,
            image: image.to_string(),
        });
        Ok(ProcessOutcome::default())
    }

    fn update_packages(
        &self,
        source: &Path,
        linux: bool,
        image: &str,
    ) -> Result<ProcessOutcome, HelperError> {
        self.record(HelperCall::UpdatePackages {
            source: source.to_path_buf(),
            linux,
            image: image.to_string(),
        });
        Ok(ProcessOutcome::default())
    }

    fn build(
        &self,
        source: &Path,
        configuration: BuildConfiguration,
        image: &str,
    ) -> Result<ProcessOutcome, HelperError> {
        self.record(HelperCall::Build {
            source: source.to_path_buf(),
            configuration,
            image: image.to_string(),
        });
        Ok(ProcessOutcome::default())
    }

    fn clean(&self, source: &Path) -> Result<ProcessOutcome, HelperError> {
        self.record(HelperCall::Clean {
            source: source.to_path_buf(),
        });
        Ok(ProcessOutcome::default())
    }

    fn create_archive(
        &self,
        archive: &Path,
        files: &[PathBuf],
        flat: bool,
    ) -> Result<(), HelperError> {
        self.record(HelperCall::CreateArchive {
            archive: archive.to_path_buf(),
            files: files.to_vec(),
            flat,
        });
        Ok(())
    }

    fn upload_archive(
        &self,
        archive: &Path,
        bucket: &str,
        region: &str,
        credentials: &Credentials,
    ) -> Result<(), HelperError> {
        self.record(HelperCall::UploadArchive {
            archive: archive.to_path_buf(),
            bucket: bucket.to_string(),
            region: region.to_string(),
            credentials: credentials.clone(),
        });
        Ok(())
    }

    fn git_tag(&self, source: &Path, version: &Version) -> Result<(), HelperError> {
        self.record(HelperCall::GitTag {
            source: source.to_path_buf(),
            version: version.clone(),
        });
        Ok(())
    }

    fn increment_git_tag(
        &self,
        source: &Path,
        component: VersionComponent,
    ) -> Result<Version, HelperError> {
        self.record(HelperCall::IncrementGitTag {
            source: source.to_path_buf(),
            component,
        });
        let scripted = self.inner.lock().unwrap().increment_result.clone();
        Ok(scripted.unwrap_or_else(|| Version::new(0, 0, 1)))
    }
}
