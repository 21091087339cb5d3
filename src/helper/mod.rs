//! helper
//!
//! The collaborator seam.
//!
//! Every external operation a command performs - package-manager runs,
//! Docker invocations, tar, S3 transfer, git tagging - goes through the
//! [`Helpable`] trait. The composition root injects an implementation;
//! handlers never reach for an external tool directly. [`SystemHelper`] is
//! the production implementation, [`mock::MockHelper`] the deterministic one
//! for tests.

pub mod mock;
pub mod process;
pub mod system;
mod traits;

pub use system::{SystemHelper, DEFAULT_DOCKER_IMAGE};
pub use traits::{
    BuildConfiguration, Credentials, Helpable, HelperError, VersionComponent,
};
