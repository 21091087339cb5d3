//! Thin executable around [`Capstan`].
//!
//! Collects argv and the environment, runs the app once, prints any failure,
//! and picks the exit code: a collaborator's subprocess exit code when one is
//! known, otherwise 1.

use std::collections::HashMap;
use std::process::exit;

use capstan::cli::{CliError, Runnable};
use capstan::commands::Capstan;
use capstan::helper::{HelperError, SystemHelper};
use capstan::ui::output;

fn main() {
    let arguments: Vec<String> = std::env::args().collect();
    let environment: HashMap<String, String> = std::env::vars().collect();

    let app = Capstan::new(SystemHelper::new());
    if let Err(error) = app.run(&arguments, &environment) {
        output::error(&error);
        exit(exit_code(&error));
    }
}

/// Adopt a collaborator's exit code when the failure carries one.
fn exit_code(error: &CliError) -> i32 {
    if let CliError::Handler(source) = error {
        if let Some(helper) = source.downcast_ref::<HelperError>() {
            if let Some(code) = helper.exit_code() {
                return code;
            }
        }
    }
    1
}
