//! # automap
//!
//! A CLI tool that maps the JavaScript files of a project to short logical
//! names and writes the `use.json` manifest consumed by name-based module
//! resolution.
//!
//! ## Overview
//!
//! automap is built on top of automaplib and provides a command-line
//! interface for generating the manifest. It walks a project tree (or takes
//! an explicit file list), honors `/* use-automapper: Name */` annotations
//! embedded in file comments, and resolves name collisions
//! deterministically.
//!
//! ## Usage
//!
//! ```bash
//! # Map the current directory, manifest at ./use.json
//! automap .
//!
//! # Qualify names with their directory path (lib/Class1)
//! automap . --path-names
//!
//! # Java-style package names (lib.package.MyClass)
//! automap . --java-names
//!
//! # Map explicit files against a project root
//! automap --file src/a.js --file src/b.js --root .
//!
//! # Walk on a worker pool, reporting progress
//! automap . --concurrent --workers 8 --verbose
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;

use automaplib::{
    map_files, map_path, ExecutionMode, MapOptions, NamingStrategy, ProgressEvent, ProgressSink,
    DEFAULT_POOL_SIZE,
};

/// Progress sink that prints dim one-liners to stderr.
struct VerboseSink {
    style: Style,
}

impl VerboseSink {
    fn new() -> Self {
        Self {
            style: Style::new().dim().for_stderr(),
        }
    }
}

impl ProgressSink for VerboseSink {
    fn record(&self, event: ProgressEvent) {
        let line = match event {
            ProgressEvent::WalkStarted { root } => format!("walking {}", root.display()),
            ProgressEvent::WalkCompleted { file_count } => {
                format!("found {file_count} files")
            }
            ProgressEvent::AnnotationScanCompleted { name_count } => {
                format!("{name_count} annotated names")
            }
            ProgressEvent::MappingResolved { entry_count } => {
                format!("resolved {entry_count} mapping entries")
            }
            ProgressEvent::ManifestWritten { path } => format!("wrote {}", path.display()),
        };
        eprintln!("{}", self.style.apply_to(line));
    }
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("automap")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Maps JavaScript project files to short logical names and writes use.json")
        .arg(
            Arg::new("path")
                .help("Project directory to map (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .action(ArgAction::Append)
                .requires("root")
                .help("Map an explicit file instead of walking (repeatable, requires --root)"),
        )
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("DIR")
                .help("Project root directory for --file mode"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Write the manifest here instead of <root>/use.json"),
        )
        .arg(
            Arg::new("no-parse")
                .long("no-parse")
                .action(ArgAction::SetTrue)
                .help("Do not scan file contents for use-automapper annotations"),
        )
        .arg(
            Arg::new("include-node-modules")
                .long("include-node-modules")
                .action(ArgAction::SetTrue)
                .help("Descend into node_modules while walking"),
        )
        .arg(
            Arg::new("path-names")
                .long("path-names")
                .action(ArgAction::SetTrue)
                .conflicts_with("java-names")
                .help("Qualify names with their directory path (lib/Class1)"),
        )
        .arg(
            Arg::new("java-names")
                .long("java-names")
                .action(ArgAction::SetTrue)
                .help("Use Java-style package names (lib.package.MyClass)"),
        )
        .arg(
            Arg::new("concurrent")
                .long("concurrent")
                .action(ArgAction::SetTrue)
                .help("Run filesystem work on a bounded worker pool"),
        )
        .arg(
            Arg::new("workers")
                .long("workers")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .requires("concurrent")
                .help("Worker ceiling for --concurrent (default 10)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Report progress to stderr"),
        )
}

/// Translate CLI flags into library options and run the mapping.
fn run(matches: &ArgMatches) -> anyhow::Result<PathBuf> {
    let mut options = MapOptions::new()
        .parse_annotations(!matches.get_flag("no-parse"))
        .include_vendor_dir(matches.get_flag("include-node-modules"));

    if matches.get_flag("path-names") {
        options = options.strategy(NamingStrategy::PathQualified);
    } else if matches.get_flag("java-names") {
        options = options.strategy(NamingStrategy::PackageQualified);
    }

    if matches.get_flag("concurrent") {
        let workers = matches
            .get_one::<usize>("workers")
            .copied()
            .unwrap_or(DEFAULT_POOL_SIZE);
        options = options.execution(ExecutionMode::Pooled { workers });
    }

    if let Some(output) = matches.get_one::<String>("output") {
        options = options.output_path(output);
    }

    if matches.get_flag("verbose") {
        options = options.progress(Arc::new(VerboseSink::new()));
    }

    let files: Vec<PathBuf> = matches
        .get_many::<String>("file")
        .map(|values| values.map(PathBuf::from).collect())
        .unwrap_or_default();

    let manifest_path = if files.is_empty() {
        let path = matches
            .get_one::<String>("path")
            .map(String::as_str)
            .unwrap_or(".");
        map_path(path, &options)?
    } else {
        let root = matches
            .get_one::<String>("root")
            .context("--file requires --root")?;
        options = options.root_dir(root);
        map_files(&files, &options)?
    };

    Ok(manifest_path)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    match run(&matches) {
        Ok(manifest_path) => {
            println!("{}", manifest_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            let error_style = Style::new().red().bold().for_stderr();
            eprintln!("{} {err:#}", error_style.apply_to("Error:"));
            ExitCode::FAILURE
        }
    }
}
