//! upload-archive command - push an archive to S3.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};

use crate::cli::{ArgumentIndex, CliOption};
use crate::helper::{Credentials, Helpable};

/// Command aliases.
pub const KEYS: [&str; 2] = ["upload-archive", "UPLOAD_ARCHIVE"];

/// The bare command definition.
pub fn command() -> CliOption {
    CliOption::new(&KEYS, "Upload an archive to S3.")
        .usage(
            "capstan upload-archive ARCHIVE_PATH [OPTIONS]. ARCHIVE_PATH is the path of \
             the archive that you want to upload to S3.",
        )
        .requires_value()
}

fn bucket() -> CliOption {
    CliOption::new(
        &["-b", "--bucket", "UPLOAD_ARCHIVE_S3_BUCKET"],
        "The bucket that you want to upload your archive to.",
    )
    .requires_value()
}

fn region() -> CliOption {
    CliOption::new(
        &["-r", "--region", "UPLOAD_ARCHIVE_S3_REGION"],
        "The bucket's region.",
    )
    .requires_value()
    .default_value("us-east-1")
}

fn key() -> CliOption {
    CliOption::new(
        &["-k", "--key", "UPLOAD_ARCHIVE_S3_KEY"],
        "The S3 access key for the bucket.",
    )
    .requires_value()
}

fn secret() -> CliOption {
    CliOption::new(
        &["-s", "--secret", "UPLOAD_ARCHIVE_S3_SECRET"],
        "The secret for the key.",
    )
    .requires_value()
}

fn credentials_file() -> CliOption {
    CliOption::new(
        &["-c", "--credentials", "UPLOAD_ARCHIVE_CREDENTIALS"],
        "Path to a shared credentials file to authenticate with.",
    )
    .requires_value()
}

/// The fully assembled command with its handler bound.
///
/// Bucket and region are enforced by the dispatcher; the key/secret versus
/// credentials-file choice is validated in the handler because either form
/// satisfies it.
pub fn option<H: Helpable + 'static>(helper: Arc<H>) -> CliOption {
    command()
        .with_required(vec![bucket(), region()])
        .with_optional(vec![key(), secret(), credentials_file()])
        .with_action(Box::new(move |index| handle(helper.as_ref(), index)))
}

/// Read the resolved index and call the collaborator.
pub fn handle(helper: &dyn Helpable, index: &ArgumentIndex) -> Result<()> {
    let Some(archive) = index.first(KEYS[0]) else {
        bail!("you didn't provide the path to the archive that you want to upload");
    };
    let Some(bucket) = index.first("-b") else {
        bail!("you didn't provide the S3 bucket to upload to");
    };
    let Some(region) = index.first("-r") else {
        bail!("you didn't provide the region for the bucket");
    };

    let credentials = if let Some(key) = index.first("-k") {
        let Some(secret) = index.first("-s") else {
            bail!("you didn't provide the secret for the key");
        };
        Credentials::Pair {
            key: key.to_string(),
            secret: secret.to_string(),
        }
    } else if let Some(file) = index.first("-c") {
        Credentials::File(PathBuf::from(file))
    } else {
        bail!("you must provide either a credentials file or a key and secret");
    };

    helper.upload_archive(Path::new(archive), bucket, region, &credentials)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::resolve;
    use crate::helper::mock::{HelperCall, MockHelper};
    use std::collections::HashMap;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn key_and_secret_become_pair_credentials() {
        let helper = MockHelper::new();
        let command = option(Arc::new(helper.clone()));
        let index = resolve::resolve(
            &command,
            &args(&[
                "/tmp/out.tar",
                "-b",
                "artifacts",
                "-k",
                "AKIA123",
                "-s",
                "shhh",
            ]),
            &HashMap::new(),
            None,
        )
        .unwrap();

        handle(&helper, &index).unwrap();

        assert_eq!(
            helper.calls(),
            vec![HelperCall::UploadArchive {
                archive: PathBuf::from("/tmp/out.tar"),
                bucket: "artifacts".to_string(),
                region: "us-east-1".to_string(),
                credentials: Credentials::Pair {
                    key: "AKIA123".to_string(),
                    secret: "shhh".to_string(),
                },
            }]
        );
    }

    #[test]
    fn credentials_file_is_the_fallback_form() {
        let helper = MockHelper::new();
        let command = option(Arc::new(helper.clone()));
        let index = resolve::resolve(
            &command,
            &args(&["/tmp/out.tar", "-b", "artifacts", "-c", "/home/me/.aws/credentials"]),
            &HashMap::new(),
            None,
        )
        .unwrap();

        handle(&helper, &index).unwrap();

        match helper.calls().first() {
            Some(HelperCall::UploadArchive { credentials, .. }) => assert_eq!(
                credentials,
                &Credentials::File(PathBuf::from("/home/me/.aws/credentials"))
            ),
            other => panic!("expected UploadArchive, got {:?}", other),
        }
    }

    #[test]
    fn key_without_secret_is_an_error() {
        let helper = MockHelper::new();
        let command = option(Arc::new(helper.clone()));
        let index = resolve::resolve(
            &command,
            &args(&["/tmp/out.tar", "-b", "artifacts", "-k", "AKIA123"]),
            &HashMap::new(),
            None,
        )
        .unwrap();

        let error = handle(&helper, &index).unwrap_err();
        assert!(error.to_string().contains("secret"));
        assert!(helper.calls().is_empty());
    }

    #[test]
    fn no_credentials_at_all_is_an_error() {
        let helper = MockHelper::new();
        let command = option(Arc::new(helper.clone()));
        let index = resolve::resolve(
            &command,
            &args(&["/tmp/out.tar", "-b", "artifacts"]),
            &HashMap::new(),
            None,
        )
        .unwrap();

        let error = handle(&helper, &index).unwrap_err();
        assert!(error
            .to_string()
            .contains("either a credentials file or a key and secret"));
    }
}
