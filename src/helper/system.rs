//! helper::system
//!
//! Production [`Helpable`] implementation.
//!
//! Package-manager operations shell out to `cargo`, either on the host or
//! inside a Docker container (`docker run` with the source mounted at its
//! own path). Archives shell out to `tar`, uploads to the `aws` CLI. Git
//! tagging goes through libgit2 rather than a subprocess, so tag listing
//! and creation get typed errors.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use git2::Repository;
use semver::Version;

use crate::helper::process::{self, ProcessOutcome};
use crate::helper::traits::{
    BuildConfiguration, Credentials, Helpable, HelperError, VersionComponent,
};
use crate::ui::output::Verbosity;

/// Docker image used when none is configured.
pub const DEFAULT_DOCKER_IMAGE: &str = "rust:alpine";

/// Shells out to the real tools.
#[derive(Debug, Clone, Copy)]
pub struct SystemHelper {
    verbosity: Verbosity,
}

impl SystemHelper {
    /// Helper with normal output.
    pub fn new() -> Self {
        SystemHelper {
            verbosity: Verbosity::Normal,
        }
    }

    /// Helper with an explicit verbosity.
    pub fn with_verbosity(verbosity: Verbosity) -> Self {
        SystemHelper { verbosity }
    }

    /// Run `cargo` with `args` inside `image`, with `source` mounted at its
    /// own absolute path so diagnostics reference real file locations.
    fn cargo_in_docker(
        &self,
        source: &Path,
        image: &str,
        cargo_args: &[&str],
    ) -> Result<ProcessOutcome, HelperError> {
        let mount = format!("{0}:{0}", source.display());
        let workdir = source.display().to_string();
        let mut args: Vec<OsString> = ["run", "--rm", "-v"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(mount.into());
        args.push("-w".into());
        args.push(workdir.into());
        args.push(image.into());
        args.push("cargo".into());
        args.extend(cargo_args.iter().map(OsString::from));
        Ok(process::run("docker", args, None, &[], self.verbosity)?)
    }

    /// Run `cargo` with `args` on the host at `source`.
    fn cargo_on_host(
        &self,
        source: &Path,
        cargo_args: &[&str],
    ) -> Result<ProcessOutcome, HelperError> {
        Ok(process::run(
            "cargo",
            cargo_args,
            Some(source),
            &[],
            self.verbosity,
        )?)
    }

    /// The highest tag at `source` that parses as a semantic version.
    fn highest_semver_tag(&self, source: &Path) -> Result<Option<Version>, HelperError> {
        let repo = Repository::open(source)?;
        let names = repo.tag_names(None)?;
        Ok(names
            .iter()
            .flatten()
            .filter_map(|name| Version::parse(name).ok())
            .max())
    }
}

impl Default for SystemHelper {
    fn default() -> Self {
        SystemHelper::new()
    }
}

/// Bump one component, resetting the lower ones.
fn bump(current: &Version, component: VersionComponent) -> Version {
    match component {
        VersionComponent::Major => Version::new(current.major + 1, 0, 0),
        VersionComponent::Minor => Version::new(current.major, current.minor + 1, 0),
        VersionComponent::Patch => Version::new(current.major, current.minor, current.patch + 1),
    }
}

impl Helpable for SystemHelper {
    fn fetch_packages(
        &self,
        source: &Path,
        linux: bool,
        image: &str,
    ) -> Result<ProcessOutcome, HelperError> {
        let outcome = if linux {
            self.cargo_in_docker(source, image, &["fetch"])?
        } else {
            self.cargo_on_host(source, &["fetch"])?
        };
        if !outcome.success() {
            return Err(HelperError::Fetch {
                message: outcome.failure_message(),
            });
        }
        Ok(outcome)
    }

    fn update_packages(
        &self,
        source: &Path,
        linux: bool,
        image: &str,
    ) -> Result<ProcessOutcome, HelperError> {
        let outcome = if linux {
            self.cargo_in_docker(source, image, &["update"])?
        } else {
            self.cargo_on_host(source, &["update"])?
        };
        if !outcome.success() {
            return Err(HelperError::Update {
                message: outcome.failure_message(),
            });
        }
        Ok(outcome)
    }

    fn build(
        &self,
        source: &Path,
        configuration: BuildConfiguration,
        image: &str,
    ) -> Result<ProcessOutcome, HelperError> {
        let args: &[&str] = match configuration {
            BuildConfiguration::Debug => &["build"],
            BuildConfiguration::Release => &["build", "--release"],
        };
        let outcome = self.cargo_in_docker(source, image, args)?;
        if !outcome.success() {
            return Err(HelperError::Build {
                message: outcome.failure_message(),
                exit_code: outcome.exit_code,
            });
        }
        Ok(outcome)
    }

    fn clean(&self, source: &Path) -> Result<ProcessOutcome, HelperError> {
        let outcome = self.cargo_on_host(source, &["clean"])?;
        if !outcome.success() {
            return Err(HelperError::Clean {
                message: outcome.failure_message(),
            });
        }
        Ok(outcome)
    }

    fn create_archive(
        &self,
        archive: &Path,
        files: &[PathBuf],
        flat: bool,
    ) -> Result<(), HelperError> {
        let mut args: Vec<OsString> = vec!["-cf".into(), archive.as_os_str().to_os_string()];
        if flat {
            // One -C per file drops the directory structure.
            for file in files {
                let name = file.file_name().ok_or_else(|| HelperError::Archive {
                    message: format!("not a file path: {}", file.display()),
                })?;
                let parent = match file.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent,
                    _ => Path::new("."),
                };
                args.push("-C".into());
                args.push(parent.as_os_str().to_os_string());
                args.push(name.to_os_string());
            }
        } else {
            for file in files {
                args.push(file.as_os_str().to_os_string());
            }
        }
        let outcome = process::run("tar", args, None, &[], self.verbosity)?;
        if !outcome.success() {
            return Err(HelperError::Archive {
                message: outcome.failure_message(),
            });
        }
        Ok(())
    }

    fn upload_archive(
        &self,
        archive: &Path,
        bucket: &str,
        region: &str,
        credentials: &Credentials,
    ) -> Result<(), HelperError> {
        let name = archive.file_name().ok_or_else(|| HelperError::Upload {
            message: format!("not a file path: {}", archive.display()),
        })?;
        let destination = format!("s3://{}/{}", bucket, name.to_string_lossy());
        let envs = match credentials {
            Credentials::Pair { key, secret } => vec![
                ("AWS_ACCESS_KEY_ID".to_string(), key.clone()),
                ("AWS_SECRET_ACCESS_KEY".to_string(), secret.clone()),
            ],
            Credentials::File(path) => vec![(
                "AWS_SHARED_CREDENTIALS_FILE".to_string(),
                path.display().to_string(),
            )],
        };
        let source = archive.display().to_string();
        let outcome = process::run(
            "aws",
            ["s3", "cp", source.as_str(), destination.as_str(), "--region", region],
            None,
            &envs,
            self.verbosity,
        )?;
        if !outcome.success() {
            return Err(HelperError::Upload {
                message: outcome.failure_message(),
            });
        }
        Ok(())
    }

    fn git_tag(&self, source: &Path, version: &Version) -> Result<(), HelperError> {
        let repo = Repository::open(source)?;
        let head = repo.head()?.peel(git2::ObjectType::Commit)?;
        repo.tag_lightweight(&version.to_string(), &head, false)?;
        Ok(())
    }

    fn increment_git_tag(
        &self,
        source: &Path,
        component: VersionComponent,
    ) -> Result<Version, HelperError> {
        let next = match self.highest_semver_tag(source)? {
            // No semver tag yet: start the history at 0.0.1.
            None => Version::new(0, 0, 1),
            Some(current) => bump(&current, component),
        };
        self.git_tag(source, &next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_resets_lower_components() {
        let current = Version::new(1, 2, 3);
        assert_eq!(bump(&current, VersionComponent::Patch), Version::new(1, 2, 4));
        assert_eq!(bump(&current, VersionComponent::Minor), Version::new(1, 3, 0));
        assert_eq!(bump(&current, VersionComponent::Major), Version::new(2, 0, 0));
    }

    #[test]
    fn tagging_a_fresh_repository_starts_at_0_0_1() {
        let dir = tempfile::TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        commit_file(&repo, "README.md", "# test");

        let helper = SystemHelper::with_verbosity(Verbosity::Quiet);
        let tagged = helper
            .increment_git_tag(dir.path(), VersionComponent::Patch)
            .unwrap();
        assert_eq!(tagged, Version::new(0, 0, 1));

        let tagged = helper
            .increment_git_tag(dir.path(), VersionComponent::Patch)
            .unwrap();
        assert_eq!(tagged, Version::new(0, 0, 2));
    }

    #[test]
    fn increment_ignores_non_semver_tags() {
        let dir = tempfile::TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        commit_file(&repo, "README.md", "# test");

        let helper = SystemHelper::with_verbosity(Verbosity::Quiet);
        helper.git_tag(dir.path(), &Version::new(1, 4, 0)).unwrap();
        let head = repo.head().unwrap().peel(git2::ObjectType::Commit).unwrap();
        repo.tag_lightweight("nightly-build", &head, false).unwrap();

        let tagged = helper
            .increment_git_tag(dir.path(), VersionComponent::Minor)
            .unwrap();
        assert_eq!(tagged, Version::new(1, 5, 0));
    }

    /// Write one file and commit it so the repository has a HEAD to tag.
    fn commit_file(repo: &Repository, name: &str, content: &str) {
        let workdir = repo.workdir().unwrap().to_path_buf();
        std::fs::write(workdir.join(name), content).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let signature = git2::Signature::now("Test User", "test@example.com").unwrap();
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            "Initial commit",
            &tree,
            &[],
        )
        .unwrap();
    }
}
