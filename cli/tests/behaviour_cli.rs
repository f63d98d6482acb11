//! End-to-end behaviour tests for the `treelingo` binary.
//!
//! Each scenario writes a small project into a temporary directory, runs the
//! binary there and checks its exit code and output.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;
use treelingo::{CONFIG_FILE_NAME, LOCALE_ENV_VAR};

const TRANSLATIONS: &str = concat!(
    "Translations\n",
    "  de\n",
    "    greeting \"Hallo {name}\"\n",
    "    name Welt\n",
    "  End\n",
    "  en\n",
    "    greeting \"Hello {name}\"\n",
    "    name World\n",
    "    nav\n",
    "      home Home\n",
    "    End\n",
    "  End\n",
    "End\n",
);

#[derive(Default)]
struct CliWorld {
    project: RefCell<Option<TempDir>>,
    args: RefCell<Vec<String>>,
    locale_env: RefCell<Option<String>>,
    output: RefCell<Option<Output>>,
}

#[fixture]
fn cli_world() -> CliWorld {
    CliWorld::default()
}

fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap_or_else(|error| {
            panic!("failed to create {}: {error}", parent.display());
        });
    }
    fs::write(&path, contents)
        .unwrap_or_else(|error| panic!("failed to write {}: {error}", path.display()));
}

fn with_output<R>(cli_world: &CliWorld, inspect: impl FnOnce(&Output) -> R) -> R {
    let output = cli_world.output.borrow();
    inspect(
        output
            .as_ref()
            .unwrap_or_else(|| panic!("treelingo should have run")),
    )
}

#[given("a project with German and English translations")]
fn given_project(cli_world: &CliWorld) {
    let temp = TempDir::new().unwrap_or_else(|error| panic!("failed to create temp dir: {error}"));
    write_file(temp.path(), CONFIG_FILE_NAME, "translations = \"i18n\"\n");
    write_file(temp.path(), "i18n/app.sml", TRANSLATIONS);
    cli_world.project.replace(Some(temp));
}

#[given("the arguments {args:string}")]
fn given_arguments(cli_world: &CliWorld, args: &str) {
    cli_world
        .args
        .replace(args.split_whitespace().map(str::to_owned).collect());
}

#[given("TREELINGO_LOCALE is set to {value:string}")]
fn given_locale_env(cli_world: &CliWorld, value: &str) {
    cli_world.locale_env.replace(Some(value.to_owned()));
}

#[when("treelingo runs")]
fn when_treelingo_runs(cli_world: &CliWorld) {
    let project = cli_world.project.borrow();
    let root = project
        .as_ref()
        .unwrap_or_else(|| panic!("a project should have been created"))
        .path();

    let mut command = Command::new(env!("CARGO_BIN_EXE_treelingo"));
    command.args(cli_world.args.borrow().iter()).current_dir(root);
    command.env_remove(LOCALE_ENV_VAR);
    if let Some(locale) = cli_world.locale_env.borrow().as_deref() {
        command.env(LOCALE_ENV_VAR, locale);
    }

    let output = command
        .output()
        .unwrap_or_else(|error| panic!("failed to run treelingo: {error}"));
    cli_world.output.replace(Some(output));
}

#[then("the exit code is {code}")]
fn then_exit_code(cli_world: &CliWorld, code: i32) {
    with_output(cli_world, |output| {
        assert_eq!(
            output.status.code(),
            Some(code),
            "stdout: {}, stderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    });
}

#[then("stdout reads {text:string}")]
fn then_stdout_reads(cli_world: &CliWorld, text: &str) {
    let stdout = with_output(cli_world, |output| {
        String::from_utf8_lossy(&output.stdout).into_owned()
    });

    assert_eq!(stdout, format!("{text}\n"));
}

#[then("stdout lists {items:string}")]
fn then_stdout_lists(cli_world: &CliWorld, items: &str) {
    let stdout = with_output(cli_world, |output| {
        String::from_utf8_lossy(&output.stdout).into_owned()
    });
    let expected: Vec<&str> = items.split(", ").collect();

    assert_eq!(stdout.lines().collect::<Vec<_>>(), expected);
}

#[then("stderr mentions {text:string}")]
fn then_stderr_mentions(cli_world: &CliWorld, text: &str) {
    let stderr = with_output(cli_world, |output| {
        String::from_utf8_lossy(&output.stderr).into_owned()
    });

    assert!(
        stderr.contains(text),
        "expected stderr to mention {text:?}, got {stderr:?}"
    );
}

#[scenario(path = "tests/features/cli.feature", index = 0)]
fn scenario_default_locale(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(path = "tests/features/cli.feature", index = 1)]
fn scenario_subtag_fallback(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(path = "tests/features/cli.feature", index = 2)]
fn scenario_substitution(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(path = "tests/features/cli.feature", index = 3)]
fn scenario_environment_locale(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(path = "tests/features/cli.feature", index = 4)]
fn scenario_keys(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(path = "tests/features/cli.feature", index = 5)]
fn scenario_locales(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(path = "tests/features/cli.feature", index = 6)]
fn scenario_malformed_substitution(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(path = "tests/features/cli.feature", index = 7)]
fn scenario_missing_default_translations(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(path = "tests/features/cli.feature", index = 8)]
fn scenario_unknown_subcommand(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(path = "tests/features/cli.feature", index = 9)]
fn scenario_unknown_explicit_locale(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(path = "tests/features/cli.feature", index = 10)]
fn scenario_unknown_environment_locale(cli_world: CliWorld) {
    let _ = cli_world;
}
