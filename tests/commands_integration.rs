//! Integration tests for the full run path at the library level.
//!
//! These drive `Capstan::run` with a recording mock helper, so they exercise
//! command selection, multi-source resolution, required-argument validation,
//! and handler dispatch without touching docker, tar, git, or the network.

use std::collections::HashMap;
use std::path::PathBuf;

use tempfile::TempDir;

use capstan::cli::{CliError, Runnable};
use capstan::commands::Capstan;
use capstan::helper::mock::{HelperCall, MockHelper};
use capstan::helper::{BuildConfiguration, VersionComponent};

fn argv(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

#[test]
fn create_archive_splits_positionals_for_the_handler() {
    let helper = MockHelper::new();
    let app = Capstan::new(helper.clone());

    app.run(
        &argv(&[
            "capstan",
            "create-archive",
            "/tmp/out.tar",
            "/tmp/a.txt",
            "/tmp/b.txt",
        ]),
        &HashMap::new(),
    )
    .unwrap();

    assert_eq!(
        helper.calls(),
        vec![HelperCall::CreateArchive {
            archive: PathBuf::from("/tmp/out.tar"),
            files: vec![PathBuf::from("/tmp/a.txt"), PathBuf::from("/tmp/b.txt")],
            flat: true,
        }]
    );
}

#[test]
fn unknown_command_is_reported() {
    let app = Capstan::new(MockHelper::new());
    match app.run(&argv(&["capstan", "bogus-command"]), &HashMap::new()) {
        Err(CliError::UnknownCommand { name }) => assert_eq!(name, "bogus-command"),
        other => panic!("expected UnknownCommand, got {:?}", other),
    }
}

#[test]
fn missing_required_bucket_names_the_keys_and_skips_the_handler() {
    let helper = MockHelper::new();
    let app = Capstan::new(helper.clone());

    match app.run(
        &argv(&["capstan", "upload-archive", "/tmp/out.tar"]),
        &HashMap::new(),
    ) {
        Err(CliError::MissingRequiredArgument { keys }) => {
            assert!(keys.contains("--bucket"), "keys were: {}", keys);
        }
        other => panic!("expected MissingRequiredArgument, got {:?}", other),
    }
    assert!(helper.calls().is_empty());
}

#[test]
fn build_flags_resolve_from_the_environment() {
    let dir = TempDir::new().unwrap();
    let helper = MockHelper::new();
    let app = Capstan::new(helper.clone());
    let env = HashMap::from([
        ("BUILD_CONFIGURATION".to_string(), "release".to_string()),
        ("BUILD_DOCKER_IMAGE_NAME".to_string(), "rust:1.80".to_string()),
        (
            "CAPSTAN_CHDIR".to_string(),
            dir.path().to_string_lossy().into_owned(),
        ),
    ]);

    app.run(&argv(&["capstan", "build"]), &env).unwrap();

    assert_eq!(
        helper.calls(),
        vec![HelperCall::Build {
            source: dir.path().to_path_buf(),
            configuration: BuildConfiguration::Release,
            image: "rust:1.80".to_string(),
        }]
    );
}

#[test]
fn config_file_fills_in_what_argv_and_env_leave_out() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".capstan.toml"),
        "[build]\nbuild-configuration = \"release\"\nimage-name = \"rust:slim\"\n",
    )
    .unwrap();

    let helper = MockHelper::new();
    let app = Capstan::new(helper.clone());
    let path = dir.path().to_string_lossy().into_owned();

    app.run(&argv(&["capstan", "build", "-C", &path]), &HashMap::new())
        .unwrap();

    assert_eq!(
        helper.calls(),
        vec![HelperCall::Build {
            source: dir.path().to_path_buf(),
            configuration: BuildConfiguration::Release,
            image: "rust:slim".to_string(),
        }]
    );
}

#[test]
fn command_line_beats_environment_beats_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".capstan.toml"),
        "[build]\nimage-name = \"from-file\"\n",
    )
    .unwrap();
    let path = dir.path().to_string_lossy().into_owned();
    let env = HashMap::from([(
        "BUILD_DOCKER_IMAGE_NAME".to_string(),
        "from-env".to_string(),
    )]);

    // All three present: the command line wins.
    let helper = MockHelper::new();
    let app = Capstan::new(helper.clone());
    app.run(
        &argv(&["capstan", "build", "-C", &path, "-i", "from-cli"]),
        &env,
    )
    .unwrap();
    match helper.calls().first() {
        Some(HelperCall::Build { image, .. }) => assert_eq!(image, "from-cli"),
        other => panic!("expected Build, got {:?}", other),
    }

    // No command-line flag: the environment wins over the file.
    let helper = MockHelper::new();
    let app = Capstan::new(helper.clone());
    app.run(&argv(&["capstan", "build", "-C", &path]), &env)
        .unwrap();
    match helper.calls().first() {
        Some(HelperCall::Build { image, .. }) => assert_eq!(image, "from-env"),
        other => panic!("expected Build, got {:?}", other),
    }
}

#[test]
fn git_tag_components_dispatch_typed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().to_string_lossy().into_owned();
    for (input, expected) in [
        ("patch", VersionComponent::Patch),
        ("minor", VersionComponent::Minor),
        ("major", VersionComponent::Major),
    ] {
        let helper = MockHelper::new();
        let app = Capstan::new(helper.clone());

        app.run(
            &argv(&["capstan", "git-tag", "-C", &path, "-i", input]),
            &HashMap::new(),
        )
        .unwrap();

        assert_eq!(
            helper.calls(),
            vec![HelperCall::IncrementGitTag {
                source: dir.path().to_path_buf(),
                component: expected,
            }]
        );
    }
}

#[test]
fn git_tag_rejects_a_bogus_component() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().to_string_lossy().into_owned();
    let helper = MockHelper::new();
    let app = Capstan::new(helper.clone());

    let error = app
        .run(
            &argv(&["capstan", "git-tag", "-C", &path, "-i", "bogus"]),
            &HashMap::new(),
        )
        .unwrap_err();

    assert!(error.to_string().contains("bogus"));
    assert!(helper.calls().is_empty());
}

#[test]
fn help_is_rendered_without_dispatching() {
    let helper = MockHelper::new();
    let app = Capstan::new(helper.clone());

    app.run(&argv(&["capstan"]), &HashMap::new()).unwrap();
    app.run(&argv(&["capstan", "help"]), &HashMap::new()).unwrap();
    app.run(&argv(&["capstan", "--help"]), &HashMap::new()).unwrap();

    assert!(helper.calls().is_empty());
}

#[test]
fn malformed_config_file_is_reported_not_ignored() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".capstan.toml"), "not [ valid toml").unwrap();
    let path = dir.path().to_string_lossy().into_owned();

    let app = Capstan::new(MockHelper::new());
    match app.run(&argv(&["capstan", "build", "-C", &path]), &HashMap::new()) {
        Err(CliError::Config { .. }) => {}
        other => panic!("expected Config error, got {:?}", other),
    }
}
