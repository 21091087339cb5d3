//! Capstan - a release helper for packages that ship from Linux
//!
//! Capstan is a single-binary tool that wraps the usual release chores behind
//! one CLI: building a package inside a Linux Docker image, archiving the
//! produced artifacts with tar, uploading archives to S3, and bumping the
//! repository's semantic-version git tag.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - The declarative option engine (definitions, multi-source
//!   resolution, dispatch). Knows nothing about any particular command.
//! - [`commands`] - The command set and the composition root that binds each
//!   command to a handler.
//! - [`helper`] - The collaborator seam: every external tool (docker, cargo,
//!   tar, git, aws) is reached through the [`helper::Helpable`] trait.
//! - [`ui`] - Output utilities.
//!
//! # Configuration sources
//!
//! Every flag can arrive from four places, highest precedence first:
//!
//! 1. A command-line token (`-i value` / `--image-name value`)
//! 2. An environment variable (the flag's upper-snake key, e.g.
//!    `BUILD_DOCKER_IMAGE_NAME`)
//! 3. A `.capstan.toml` file in the effective working directory
//! 4. The default declared on the option definition

pub mod cli;
pub mod commands;
pub mod helper;
pub mod ui;
