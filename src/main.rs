//! Command-line interface for the badgegen binary.
//!
//! The CLI lists the catalogs and composes badge snippets or HTML previews
//! for a repository from the selection given on the command line.

use std::{
    io::{self, Write},
    path::PathBuf,
    process
};

use badgegen::{
    Catalog, Error, SelectionState, compose_enabled, load_catalog, output_error, render_preview,
    render_snippet, should_preview
};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Command line interface for composing repository status badges.
#[derive(Debug, Parser)]
#[command(name = "badgegen", version, about = "Compose repository status badge snippets")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging on stderr.
    #[arg(long = "verbose", short = 'v', global = true, action = ArgAction::SetTrue)]
    verbose: bool
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List badge services with their keys.
    Services(CatalogArgs),
    /// List badge styles.
    Styles(CatalogArgs),
    /// List snippet formats.
    Formats(CatalogArgs),
    /// Print the badge snippet for a repository.
    Generate(GenerateArgs),
    /// Print an HTML preview of the badges for a repository.
    Preview(SelectionArgs)
}

#[derive(Debug, Args)]
struct CatalogArgs {
    /// YAML file replacing the built-in service catalog.
    #[arg(long = "catalog", value_name = "PATH", env = "BADGEGEN_CATALOG")]
    catalog: Option<PathBuf>
}

#[derive(Debug, Args)]
struct SelectionArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Repository identifier, e.g. "facebook/react" or an npm package name.
    #[arg(long = "repository", short = 'r', value_name = "ID")]
    repository: String,

    /// Enable only these services instead of the catalog defaults.
    #[arg(long = "service", short = 's', value_name = "KEY")]
    services: Vec<String>,

    /// Flip a service after defaults and --service were applied.
    #[arg(long = "toggle", value_name = "KEY")]
    toggles: Vec<String>,

    /// Badge style identifier.
    #[arg(long = "style", value_name = "STYLE")]
    style: Option<String>,

    /// Snippet format identifier.
    #[arg(long = "format", short = 'f', value_name = "FORMAT")]
    format: Option<String>
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// Print the resolved badges as JSON instead of a snippet.
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(error) = run(cli.command) {
        eprintln!("{}", error.to_display_string());
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Executes the parsed command against stdout.
///
/// # Errors
///
/// Propagates catalog loading, selection and serialization errors.
fn run(command: Command) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    run_with_writer(command, &mut handle)
}

fn run_with_writer<W: Write>(command: Command, writer: &mut W) -> Result<(), Error> {
    match command {
        Command::Services(args) => with_catalog(&args, |catalog| write_services(writer, catalog)),
        Command::Styles(args) => with_catalog(&args, |catalog| write_styles(writer, catalog)),
        Command::Formats(args) => with_catalog(&args, |catalog| write_formats(writer, catalog)),
        Command::Generate(args) => with_catalog(&args.selection.catalog, |catalog| {
            let selection = build_selection(catalog, &args.selection)?;
            write_generate(writer, &selection, args.json)
        }),
        Command::Preview(args) => with_catalog(&args.catalog, |catalog| {
            let selection = build_selection(catalog, &args)?;
            write_preview(writer, &selection)
        })
    }
}

fn with_catalog<T, F>(args: &CatalogArgs, action: F) -> Result<T, Error>
where
    F: FnOnce(&Catalog) -> Result<T, Error>
{
    match args.catalog.as_deref() {
        Some(path) => {
            let catalog = load_catalog(path)?;
            action(&catalog)
        }
        None => action(Catalog::builtin())
    }
}

/// Applies the command line selection to a fresh [`SelectionState`].
///
/// Order: repository, explicit services (replacing defaults), toggles,
/// style, format.
///
/// # Errors
///
/// Returns [`Error::UnknownService`], [`Error::UnknownFormat`] or
/// [`Error::InvalidStyle`] for values missing from the catalog.
fn build_selection<'c>(
    catalog: &'c Catalog,
    args: &SelectionArgs
) -> Result<SelectionState<'c>, Error> {
    let mut selection = SelectionState::new(catalog);
    selection.set_repository(args.repository.as_str());

    if !args.services.is_empty() {
        for index in 0..catalog.services().len() {
            selection.set_service_enabled(index, false)?;
        }
        for key in &args.services {
            selection.set_service_enabled(catalog.find_service(key)?, true)?;
        }
    }

    for key in &args.toggles {
        selection.toggle_service(catalog.find_service(key)?)?;
    }

    if let Some(style) = args.style.as_deref() {
        selection.set_style(style)?;
    }

    if let Some(format) = args.format.as_deref() {
        selection.set_format(catalog.find_format(format)?)?;
    }

    debug!(
        repository = selection.repository(),
        style = %selection.style(),
        format = selection.format().identifier,
        "Selection built"
    );

    Ok(selection)
}

fn write_generate<W: Write>(
    writer: &mut W,
    selection: &SelectionState<'_>,
    json: bool
) -> Result<(), Error> {
    let badges = compose_enabled(selection);
    if !should_preview(selection, &badges) {
        info!("Nothing to render: repository is empty or no service is enabled");
        return Ok(());
    }

    if json {
        serde_json::to_writer_pretty(&mut *writer, &badges)?;
        writeln!(writer).map_err(output_error)?;
    } else {
        write!(writer, "{}", render_snippet(&badges, selection.format())).map_err(output_error)?;
    }

    Ok(())
}

fn write_preview<W: Write>(writer: &mut W, selection: &SelectionState<'_>) -> Result<(), Error> {
    let badges = compose_enabled(selection);
    if !should_preview(selection, &badges) {
        info!("Nothing to preview: repository is empty or no service is enabled");
        return Ok(());
    }

    writeln!(writer, "{}", render_preview(&badges)).map_err(output_error)
}

fn write_services<W: Write>(writer: &mut W, catalog: &Catalog) -> Result<(), Error> {
    for service in catalog.services() {
        let marker = if service.enabled_by_default { " (default)" } else { "" };
        writeln!(
            writer,
            "{:<28}{}{marker}",
            service.key().unwrap_or_default(),
            service.name
        )
        .map_err(output_error)?;
    }
    Ok(())
}

fn write_styles<W: Write>(writer: &mut W, catalog: &Catalog) -> Result<(), Error> {
    let default = catalog.default_style();
    for style in catalog.styles() {
        let marker = if *style == default { " (default)" } else { "" };
        writeln!(writer, "{:<16}{}{marker}", style.as_str(), style.label()).map_err(output_error)?;
    }
    Ok(())
}

fn write_formats<W: Write>(writer: &mut W, catalog: &Catalog) -> Result<(), Error> {
    for format in catalog.formats() {
        let marker = if format.is_default { " (default)" } else { "" };
        writeln!(writer, "{:<16}{}{marker}", format.identifier, format.label)
            .map_err(output_error)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Cursor};

    use clap::Parser;
    use tempfile::tempdir;

    use super::{Cli, Command, run_with_writer};

    fn run_cli(arguments: &[&str]) -> Result<String, badgegen::Error> {
        let mut argv = vec![env!("CARGO_PKG_NAME")];
        argv.extend_from_slice(arguments);
        let cli = Cli::try_parse_from(argv).expect("failed to parse CLI");

        let mut buffer = Cursor::new(Vec::new());
        run_with_writer(cli.command, &mut buffer)?;
        Ok(String::from_utf8(buffer.into_inner()).expect("invalid UTF-8"))
    }

    #[test]
    fn generate_uses_catalog_defaults() {
        let output = run_cli(&["generate", "--repository", "octo/cat"]).expect("generate failed");

        assert_eq!(
            output,
            "[![Build Status](https://img.shields.io/travis/octo/cat/master.svg?style=flat)](https://travis-ci.org/octo/cat)\n\
             [![Coverage Status](https://img.shields.io/codecov/c/github/octo/cat/master.svg?style=flat)](https://codecov.io/gh/octo/cat)\n"
        );
    }

    #[test]
    fn generate_keeps_catalog_order_for_explicit_services() {
        let output = run_cli(&[
            "generate",
            "-r",
            "serde",
            "--service",
            "docs-rs",
            "--service",
            "crates-io-version",
            "--style",
            "flat-square",
            "--format",
            "rst"
        ])
        .expect("generate failed");

        let crate_position = output.find("crates.io/crates/serde").expect("crate badge");
        let docs_position = output.find("docs.rs/serde").expect("docs badge");
        assert!(crate_position < docs_position);
        assert!(output.contains("style=flat-square"));
        assert!(output.starts_with(".. image:: "));
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn generate_json_lists_resolved_badges() {
        let output = run_cli(&["generate", "-r", "octo/cat", "--toggle", "codecov", "--json"])
            .expect("generate failed");

        let value: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
        let badges = value.as_array().expect("array of badges");
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0]["title"], "Build Status");
        assert_eq!(badges[0]["link_url"], "https://travis-ci.org/octo/cat");
    }

    #[test]
    fn generate_prints_nothing_for_empty_repository() {
        let output = run_cli(&["generate", "--repository", ""]).expect("generate failed");
        assert!(output.is_empty());
    }

    #[test]
    fn generate_prints_nothing_without_services() {
        let output = run_cli(&[
            "generate",
            "-r",
            "octo/cat",
            "--toggle",
            "travis-ci",
            "--toggle",
            "codecov"
        ])
        .expect("generate failed");
        assert!(output.is_empty());
    }

    #[test]
    fn generate_rejects_unknown_values() {
        let error = run_cli(&["generate", "-r", "octo/cat", "--style", "not-a-real-style"])
            .expect_err("invalid style");
        assert!(matches!(error, badgegen::Error::InvalidStyle { .. }));

        let error = run_cli(&["generate", "-r", "octo/cat", "--service", "jenkins"])
            .expect_err("unknown service");
        assert!(matches!(error, badgegen::Error::UnknownService { .. }));

        let error = run_cli(&["generate", "-r", "octo/cat", "--format", "wiki"])
            .expect_err("unknown format");
        assert!(matches!(error, badgegen::Error::UnknownFormat { .. }));
    }

    #[test]
    fn preview_renders_html() {
        let output = run_cli(&["preview", "-r", "octo/cat"]).expect("preview failed");
        assert!(output.starts_with("<a href=\"https://travis-ci.org/octo/cat\""));
        assert_eq!(output.matches("<img ").count(), 2);
    }

    #[test]
    fn listings_mark_defaults() {
        let services = run_cli(&["services"]).expect("services failed");
        assert!(services.lines().next().expect("first service").starts_with("travis-ci"));
        assert!(services.contains("(default)"));

        let styles = run_cli(&["styles"]).expect("styles failed");
        assert!(styles.lines().next().expect("first style").ends_with("Flat (default)"));

        let formats = run_cli(&["formats"]).expect("formats failed");
        assert!(formats.contains("markdown") && formats.contains("Markdown (default)"));
    }

    #[test]
    fn custom_catalog_file_replaces_services() {
        let temp = tempdir().expect("failed to create tempdir");
        let path = temp.path().join("catalog.yaml");
        fs::write(
            &path,
            r#"
services:
  - name: build
    title: Build Status
    url: https://ci.example/{repository}
    image_url: https://ci.example/{repository}/badge
    enabled: true
"#
        )
        .expect("failed to write catalog");

        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "generate",
            "--catalog",
            path.to_str().expect("utf8"),
            "-r",
            "octo/cat"
        ])
        .expect("failed to parse CLI");
        assert!(matches!(cli.command, Command::Generate(_)));

        let mut buffer = Cursor::new(Vec::new());
        run_with_writer(cli.command, &mut buffer).expect("generate failed");
        let output = String::from_utf8(buffer.into_inner()).expect("invalid UTF-8");
        assert_eq!(
            output,
            "[![Build Status](https://ci.example/octo/cat/badge?style=flat)](https://ci.example/octo/cat)\n"
        );
    }
}
