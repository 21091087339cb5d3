//! create-archive command - tar a list of files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};

use crate::cli::{ArgumentIndex, CliOption};
use crate::helper::Helpable;

/// Command aliases.
pub const KEYS: [&str; 2] = ["create-archive", "CREATE_ARCHIVE"];

/// The bare command definition.
pub fn command() -> CliOption {
    CliOption::new(&KEYS, "Archive files with tar.").usage(
        "capstan create-archive ARCHIVE_PATH FILES [OPTIONS]. ARCHIVE_PATH is the full \
         path and filename for the archive to be created. FILES is a space separated \
         list of full paths to the files you want to archive.",
    )
}

fn flat_list() -> CliOption {
    CliOption::new(
        &["-f", "--flat-list", "CREATE_ARCHIVE_FLAT_LIST"],
        "Put all the files in a flat list instead of maintaining directory structure.",
    )
    .requires_value()
    .default_value("true")
}

/// The fully assembled command with its handler bound.
pub fn option<H: Helpable + 'static>(helper: Arc<H>) -> CliOption {
    command()
        .with_optional(vec![flat_list()])
        .with_action(Box::new(move |index| handle(helper.as_ref(), index)))
}

/// Split the positional list into archive path and file list, then call the
/// collaborator.
pub fn handle(helper: &dyn Helpable, index: &ArgumentIndex) -> Result<()> {
    let Some(paths) = index.get(KEYS[0]) else {
        bail!("you didn't provide any paths");
    };
    let Some((archive, files)) = paths.split_first() else {
        bail!("you didn't provide the archive path");
    };
    if files.is_empty() {
        bail!("you didn't provide any files to archive");
    }
    let files: Vec<PathBuf> = files.iter().map(PathBuf::from).collect();
    helper.create_archive(Path::new(archive), &files, index.flag("-f"))?;
    Ok(())
}
