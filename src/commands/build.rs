//! build command - compile the package in Linux inside a Docker container.

use std::sync::Arc;

use anyhow::{bail, Result};

use crate::cli::{ArgumentIndex, CliOption};
use crate::commands::{change_directory, source_path};
use crate::helper::{BuildConfiguration, Helpable, DEFAULT_DOCKER_IMAGE};

/// Command aliases.
pub const KEYS: [&str; 2] = ["build", "BUILD"];

/// The bare command definition.
pub fn command() -> CliOption {
    CliOption::new(
        &KEYS,
        "Build the package in Linux and surface the build errors locally.",
    )
    .usage("capstan build [OPTIONS]")
}

fn build_configuration() -> CliOption {
    CliOption::new(
        &["-c", "--build-configuration", "BUILD_CONFIGURATION"],
        "debug or release mode.",
    )
    .requires_value()
    .default_value("debug")
}

fn image_name() -> CliOption {
    CliOption::new(
        &["-i", "--image-name", "BUILD_DOCKER_IMAGE_NAME"],
        "The Docker image name to run the commands in.",
    )
    .requires_value()
    .default_value(DEFAULT_DOCKER_IMAGE)
}

/// The fully assembled command with its handler bound.
pub fn option<H: Helpable + 'static>(helper: Arc<H>) -> CliOption {
    command()
        .with_optional(vec![change_directory(), build_configuration(), image_name()])
        .with_action(Box::new(move |index| handle(helper.as_ref(), index)))
}

/// Read the resolved index and call the collaborator.
pub fn handle(helper: &dyn Helpable, index: &ArgumentIndex) -> Result<()> {
    let source = source_path(index);
    let Some(configuration) = index.first("-c") else {
        bail!("a build configuration was not provided (-c, --build-configuration)");
    };
    let configuration: BuildConfiguration = configuration.parse()?;
    let Some(image) = index.first("-i") else {
        bail!("an image name was not provided (-i, --image-name)");
    };
    helper.build(&source, configuration, image)?;
    Ok(())
}
