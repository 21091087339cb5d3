//! clean command - remove build artifacts.

use std::sync::Arc;

use anyhow::Result;

use crate::cli::{ArgumentIndex, CliOption};
use crate::commands::{change_directory, source_path};
use crate::helper::Helpable;

/// Command aliases.
pub const KEYS: [&str; 2] = ["clean", "CLEAN"];

/// The bare command definition.
pub fn command() -> CliOption {
    CliOption::new(&KEYS, "Run 'cargo clean' on your package.").usage("capstan clean [OPTIONS]")
}

/// The fully assembled command with its handler bound.
pub fn option<H: Helpable + 'static>(helper: Arc<H>) -> CliOption {
    command()
        .with_optional(vec![change_directory()])
        .with_action(Box::new(move |index| handle(helper.as_ref(), index)))
}

/// Read the resolved index and call the collaborator.
pub fn handle(helper: &dyn Helpable, index: &ArgumentIndex) -> Result<()> {
    helper.clean(&source_path(index))?;
    Ok(())
}
