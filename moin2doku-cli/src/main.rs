//! Command-line interface for moin2doku
//! Converts the pages of a MoinMoin wiki into a DokuWiki pages directory.
//!
//! Usage:
//!   moin2doku [-p `<moinmoin pages dir>`] [-o `<dokuwiki pages dir>`] [-f] [-t]   - Convert all pages
//!   moin2doku --list-incompatibilities                                         - List the checked sequences
//!
//! Settings are read from the built-in defaults, then from `--config <file>`, then from the
//! flags. Set `RUST_LOG` to control the log output on stderr.

use chrono::Local;
use clap::{Arg, ArgAction, ArgMatches, Command};
use encoding_rs::Encoding;
use moin2doku::pages::{
    IncompatibilityDefinitions, IncompatibilityReport, PageCrawler, PageWriter, Transliterator,
};
use moin2doku::Options;
use moin2doku_config::{ConverterConfig, Loader, Overrides};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const ABOUT: &str = "Convert MoinMoin wiki pages to DokuWiki pages";

const LONG_ABOUT: &str = "Convert MoinMoin wiki pages to DokuWiki pages.\n\
Not all of MoinMoin's features are recognized; constructs that need manual work are listed in \
a warnings file.\n\n\
The MoinMoin pages are expected in MoinMoin/wiki/data/pages and the DokuWiki pages are written \
to dokuwiki/data/pages, both relative to the current directory. Use --inputdir and --outputdir \
to change them.";

fn build_cli() -> Command {
    Command::new("moin2doku")
        .about(ABOUT)
        .long_about(LONG_ABOUT)
        .version(VERSION)
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .help("Show version info")
                .action(ArgAction::Version),
        )
        .arg(
            Arg::new("inputdir")
                .short('p')
                .long("inputdir")
                .value_name("DIR")
                .help("Path to the MoinMoin pages directory (default: MoinMoin/wiki/data/pages)"),
        )
        .arg(
            Arg::new("outputdir")
                .short('o')
                .long("outputdir")
                .value_name("DIR")
                .help("Path to the DokuWiki pages directory, created if missing (default: dokuwiki/data/pages)"),
        )
        .arg(
            Arg::new("charset")
                .short('c')
                .long("charset")
                .value_name("NAME")
                .help("Encoding of the MoinMoin page files (default: utf-8)"),
        )
        .arg(
            Arg::new("fixme")
                .short('f')
                .long("fixme")
                .help("Add a fixme message at the start of each generated page")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tagcleaner")
                .short('t')
                .long("tagcleaner")
                .help("Remove formats without content (e.g. ****)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("mappingfile")
                .short('m')
                .long("mappingfile")
                .value_name("FILE")
                .help("File with character mappings used for DokuWiki file names"),
        )
        .arg(
            Arg::new("incompatibilities")
                .short('i')
                .long("incompatibilities")
                .value_name("FILE")
                .help("JSON file defining which sequences are reported as incompatible"),
        )
        .arg(
            Arg::new("no-report")
                .long("no-report")
                .help("Do not write the incompatibility report")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("TOML file layered over the default settings"),
        )
        .arg(
            Arg::new("list-incompatibilities")
                .short('l')
                .long("list-incompatibilities")
                .help("List the sequences reported as incompatible")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    init_logging();
    let matches = build_cli().get_matches();

    if matches.get_flag("list-incompatibilities") {
        handle_list_incompatibilities_command(&matches);
        return;
    }

    let config = load_config(&matches).unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid configuration");
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = handle_convert_command(&config) {
        tracing::error!(error = %e, "conversion failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Layers the config file and the flags over the defaults.
fn load_config(matches: &ArgMatches) -> Result<ConverterConfig, Box<dyn Error>> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    let path = |arg: &str| matches.get_one::<String>(arg).map(PathBuf::from);
    let overrides = Overrides {
        input_dir: path("inputdir"),
        output_dir: path("outputdir"),
        charset: matches.get_one::<String>("charset").cloned(),
        mapping_file: path("mappingfile"),
        incompatibilities_file: path("incompatibilities"),
        fixme_banner: matches.get_flag("fixme"),
        clean_tags: matches.get_flag("tagcleaner"),
        no_report: matches.get_flag("no-report"),
    };

    Ok(loader.with_overrides(&overrides)?.build()?)
}

fn load_definitions(path: Option<&Path>) -> Result<IncompatibilityDefinitions, Box<dyn Error>> {
    let definitions = match path {
        Some(path) => IncompatibilityDefinitions::from_file(path)?,
        None => IncompatibilityDefinitions::builtin()?,
    };
    Ok(definitions)
}

/// Handle the list-incompatibilities command
fn handle_list_incompatibilities_command(matches: &ArgMatches) {
    let path = matches
        .get_one::<String>("incompatibilities")
        .map(Path::new);
    match load_definitions(path) {
        Ok(definitions) => {
            tracing::debug!(source = ?path, "loaded incompatibility definitions");
            println!("{}", definitions.listing());
        }
        Err(e) => {
            tracing::error!(error = %e, "could not load the incompatibility definitions");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the conversion of all pages
fn handle_convert_command(config: &ConverterConfig) -> Result<(), Box<dyn Error>> {
    let encoding = Encoding::for_label(config.input.charset.as_bytes())
        .ok_or_else(|| format!("Unknown charset: {}", config.input.charset))?;

    println!("== Starting conversion ==");
    tracing::info!(
        input = %config.input.pages_dir.display(),
        output = %config.output.pages_dir.display(),
        charset = encoding.name(),
        "starting conversion"
    );
    let pages = PageCrawler::new(&config.input.pages_dir, encoding).crawl()?;
    tracing::info!(count = pages.len(), "crawled pages");
    if pages.is_empty() {
        println!("No pages found in {}", config.input.pages_dir.display());
    }

    let definitions = load_definitions(config.report.incompatibilities_file.as_deref())?;
    let report = IncompatibilityReport::new(definitions).check(&pages, VERSION);
    if config.report.write_report {
        let path = format!(
            "moin2doku-warnings-{}.txt",
            Local::now().format("%Y-%m-%d-%H-%M-%S")
        );
        fs::write(&path, report)?;
        tracing::info!(path = %path, "incompatibility report written");
        println!("Written: {}", path);
    }

    let transliterator = match &config.transliteration.mapping_file {
        Some(path) => Transliterator::with_mapping_file(path)?,
        None => Transliterator::default(),
    };
    let options = Options::default()
        .with_fixme_banner(config.output.fixme_banner)
        .with_clean_tags(config.output.clean_tags);
    let written = PageWriter::new(&config.output.pages_dir, options, transliterator).write(&pages);

    tracing::info!(
        written,
        skipped = pages.len() - written,
        "conversion finished"
    );
    println!("== Converted {} pages ==", written);
    Ok(())
}
