//! Settings assembly and subcommand execution.

use std::env;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use treelingo::{Settings, Substitutions, Translator, locale_from_environment};

use crate::cli::{Cli, Command, TranslateArgs};
use crate::error::{CliError, Result};
use crate::output::{format_keys, format_locales};

/// Run the parsed command line, writing results to `out`.
///
/// Relative paths given on the command line are resolved against
/// `working_dir`, which is also searched for `treelingo.toml` when
/// `--config` is absent.
///
/// # Errors
///
/// Returns [`CliError`] when configuration, loading, substitution parsing,
/// a lookup or writing the output fails.
pub fn run(cli: &Cli, working_dir: &Utf8Path, out: &mut dyn Write) -> Result<()> {
    let settings = load_settings(cli, working_dir)?;
    let configured = settings.build(cli.locale.as_deref(), locale_from_environment())?;
    let translator = configured.translator();

    match &cli.command {
        Command::Translate(args) => translate(translator, args, out)?,
        Command::Keys => keys(translator, out)?,
        Command::Locales => locales(translator, out)?,
    }

    out.flush()?;
    Ok(())
}

/// Read `--config` or discover `treelingo.toml`, then apply the
/// command-line overrides.
///
/// # Errors
///
/// Returns [`CliError::Config`] when the configuration file cannot be read
/// or parsed.
pub fn load_settings(cli: &Cli, working_dir: &Utf8Path) -> Result<Settings> {
    let mut settings = cli.config.as_deref().map_or_else(
        || Settings::discover(working_dir).map(Option::unwrap_or_default),
        |path| Settings::load(&working_dir.join(path)),
    )?;

    if let Some(directory) = &cli.dir {
        settings.translations = Some(working_dir.join(directory));
    }
    if let Some(default_locale) = &cli.default_locale {
        settings.default_locale.clone_from(default_locale);
    }
    if let Some(fallback) = &cli.fallback_locale {
        settings.forced_fallback_locale = Some(fallback.clone());
    }

    debug!(target: "treelingo::cli", "effective settings: {settings:?}");
    Ok(settings)
}

/// Split a `--set NAME=VALUE` argument at its first `=`.
///
/// # Errors
///
/// Returns [`CliError::InvalidSubstitution`] when `raw` has no `=` or an
/// empty name.
///
/// ```
/// use treelingo_cli::commands::parse_substitution;
///
/// let (name, value) = parse_substitution("query=a=b").expect("valid substitution");
/// assert_eq!((name.as_str(), value.as_str()), ("query", "a=b"));
/// ```
pub fn parse_substitution(raw: &str) -> Result<(String, String)> {
    raw.split_once('=')
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, value)| (name.trim().to_owned(), value.to_owned()))
        .ok_or_else(|| CliError::InvalidSubstitution {
            raw: raw.to_owned(),
        })
}

/// The process working directory as a UTF-8 path.
///
/// # Errors
///
/// Returns [`CliError::WorkingDirectory`] when the directory cannot be read
/// or is not valid UTF-8.
pub fn working_directory() -> Result<Utf8PathBuf> {
    let cwd = env::current_dir().map_err(|error| CliError::WorkingDirectory {
        reason: error.to_string(),
    })?;
    Utf8PathBuf::try_from(cwd).map_err(|error| CliError::WorkingDirectory {
        reason: format!("path is not valid UTF-8: {error}"),
    })
}

fn translate(translator: &Translator, args: &TranslateArgs, out: &mut dyn Write) -> Result<()> {
    let substitutions = args
        .substitutions
        .iter()
        .map(|raw| parse_substitution(raw))
        .collect::<Result<Substitutions>>()?;

    let text = translator.translate(&args.key, &substitutions)?;
    writeln!(out, "{text}")?;
    Ok(())
}

fn keys(translator: &Translator, out: &mut dyn Write) -> Result<()> {
    let resolved = translator.resolved_locale()?;
    out.write_all(format_keys(&resolved.tree().key_paths()).as_bytes())?;
    Ok(())
}

fn locales(translator: &Translator, out: &mut dyn Write) -> Result<()> {
    let active = translator
        .resolved_locale()
        .ok()
        .map(|resolved| resolved.locale());
    out.write_all(format_locales(translator.available_translations(), active).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;
    use treelingo::{CONFIG_FILE_NAME, LOCALE_ENV_VAR};

    struct Project {
        _temp: TempDir,
        root: Utf8PathBuf,
    }

    impl Project {
        fn write(&self, relative: &str, contents: &str) {
            let path = self.root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .unwrap_or_else(|error| panic!("failed to create {parent}: {error}"));
            }
            fs::write(&path, contents)
                .unwrap_or_else(|error| panic!("failed to write {path}: {error}"));
        }

        fn run(&self, args: &[&str]) -> Result<String> {
            let cli = Cli::try_parse_from(std::iter::once("treelingo").chain(args.iter().copied()))
                .unwrap_or_else(|error| panic!("arguments should parse: {error}"));
            let mut out = Vec::new();
            temp_env::with_var_unset(LOCALE_ENV_VAR, || run(&cli, &self.root, &mut out))?;
            Ok(String::from_utf8(out).unwrap_or_else(|error| panic!("output not UTF-8: {error}")))
        }
    }

    #[fixture]
    fn project() -> Project {
        let temp = tempfile::tempdir().unwrap_or_else(|error| panic!("temp dir: {error}"));
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .unwrap_or_else(|path| panic!("non UTF-8 temp path: {}", path.display()));
        let project = Project { _temp: temp, root };
        project.write(
            "i18n/app.toml",
            concat!(
                "[de]\n",
                "greeting = \"Hallo {name}\"\n",
                "name = \"Welt\"\n",
                "\n",
                "[en]\n",
                "greeting = \"Hello {name}\"\n",
                "name = \"World\"\n",
                "nav = { home = \"Home\" }\n",
            ),
        );
        project
    }

    #[rstest]
    #[case::default_locale(&["--dir", "i18n", "translate", "greeting"], "Hallo Welt\n")]
    #[case::subtag_fallback(
        &["--dir", "i18n", "--locale", "en_GB", "translate", "greeting"],
        "Hello World\n"
    )]
    #[case::substitution(
        &["--dir", "i18n", "--locale", "en", "translate", "greeting", "--set", "name=Ada"],
        "Hello Ada\n"
    )]
    #[case::missing_key(&["--dir", "i18n", "translate", "absent"], "\n")]
    #[case::keys(&["--dir", "i18n", "--locale", "en", "keys"], "greeting\nname\nnav.home\n")]
    #[case::locales(&["--dir", "i18n", "--locale", "en_US", "locales"], "de\nen (active)\n")]
    fn commands_write_their_results(
        project: Project,
        #[case] args: &[&str],
        #[case] expected: &str,
    ) {
        let output = project
            .run(args)
            .unwrap_or_else(|error| panic!("command should succeed: {error}"));

        assert_eq!(output, expected);
    }

    #[rstest]
    fn discovered_configuration_is_used(project: Project) {
        project.write(CONFIG_FILE_NAME, "translations = \"i18n\"\nlocale = \"en\"\n");

        let output = project
            .run(&["translate", "greeting"])
            .unwrap_or_else(|error| panic!("command should succeed: {error}"));

        assert_eq!(output, "Hello World\n");
    }

    #[rstest]
    fn command_line_overrides_the_configuration(project: Project) {
        project.write(
            "conf/custom.toml",
            "translations = \"../missing\"\ndefault_locale = \"en\"\n",
        );

        let output = project
            .run(&[
                "--config",
                "conf/custom.toml",
                "--dir",
                "i18n",
                "--default-locale",
                "de",
                "translate",
                "name",
            ])
            .unwrap_or_else(|error| panic!("command should succeed: {error}"));

        assert_eq!(output, "Welt\n");
    }

    #[rstest]
    fn forced_fallback_precedes_the_language_subtag(project: Project) {
        let output = project
            .run(&[
                "--dir",
                "i18n",
                "--locale",
                "en_GB",
                "--fallback-locale",
                "de",
                "translate",
                "name",
            ])
            .unwrap_or_else(|error| panic!("command should succeed: {error}"));

        assert_eq!(output, "Welt\n");
    }

    #[rstest]
    fn missing_default_translations_fail(project: Project) {
        let outcome = project.run(&["--dir", "i18n", "--default-locale", "fr", "keys"]);

        assert!(matches!(
            outcome,
            Err(CliError::Engine(treelingo::I18nError::NoDefaultTranslations { .. }))
        ));
    }

    #[rstest]
    #[case::explicit(&["--dir", "i18n", "--locale", "xx_YY", "translate", "greeting"])]
    #[case::configured_default(&["--dir", "i18n", "--default-locale", "xx_YY", "keys"])]
    fn unknown_locales_on_the_command_line_fail(project: Project, #[case] args: &[&str]) {
        assert!(matches!(
            project.run(args),
            Err(CliError::Config(treelingo::ConfigError::Engine(
                treelingo::I18nError::InvalidLocale { .. }
            )))
        ));
    }

    #[rstest]
    fn unknown_environment_locales_are_ignored(project: Project) {
        let cli = Cli::try_parse_from(["treelingo", "--dir", "i18n", "translate", "name"])
            .unwrap_or_else(|error| panic!("arguments should parse: {error}"));
        let mut out = Vec::new();

        temp_env::with_var(LOCALE_ENV_VAR, Some("xx_YY"), || run(&cli, &project.root, &mut out))
            .unwrap_or_else(|error| panic!("command should succeed: {error}"));

        assert_eq!(out, b"Welt
");
    }

    #[rstest]
    fn missing_configuration_files_fail(project: Project) {
        let outcome = project.run(&["--config", "absent.toml", "locales"]);

        assert!(matches!(outcome, Err(CliError::Config(_))));
    }

    #[rstest]
    fn environment_locale_applies_without_an_override(project: Project) {
        let cli = Cli::try_parse_from(["treelingo", "--dir", "i18n", "translate", "name"])
            .unwrap_or_else(|error| panic!("arguments should parse: {error}"));
        let mut out = Vec::new();

        temp_env::with_var(LOCALE_ENV_VAR, Some("en"), || run(&cli, &project.root, &mut out))
            .unwrap_or_else(|error| panic!("command should succeed: {error}"));

        assert_eq!(out, b"World\n");
    }

    #[rstest]
    #[case("name=Ada", "name", "Ada")]
    #[case("name=", "name", "")]
    #[case(" name =a=b", "name", "a=b")]
    fn parses_substitutions(#[case] raw: &str, #[case] name: &str, #[case] value: &str) {
        let parsed = parse_substitution(raw)
            .unwrap_or_else(|error| panic!("substitution should parse: {error}"));

        assert_eq!(parsed, (name.to_owned(), value.to_owned()));
    }

    #[rstest]
    #[case("name")]
    #[case("=Ada")]
    #[case(" =Ada")]
    fn rejects_malformed_substitutions(#[case] raw: &str) {
        assert!(matches!(
            parse_substitution(raw),
            Err(CliError::InvalidSubstitution { raw: reported }) if reported == raw
        ));
    }
}
