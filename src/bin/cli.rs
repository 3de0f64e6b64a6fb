//! DTO Converter CLI
//!
//! Manages project aliases and runs C# → TypeScript conversion.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser, Subcommand};
use dto_converter::projects::normalize_path;
use dto_converter::{
    BatchReport, ConvertOutcome, ConverterConfig, ConverterRegistry, Direction, Project,
    TypeScriptWriter,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dto-converter")]
#[command(about = "Convert C# record DTOs into TypeScript types")]
#[command(version)]
struct Cli {
    /// Config file (default: platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty config file if it doesn't exist
    #[command(visible_alias = "i")]
    Init,

    /// Add a project (replaces an existing one with the same name)
    #[command(visible_alias = "a")]
    Add {
        /// Project name
        name: String,
        /// Source language (e.g. csharp)
        language: String,
        /// Directory containing source files
        input: PathBuf,
        /// Directory to write TypeScript files into
        output: PathBuf,
    },

    /// List project names, or show one project
    #[command(visible_alias = "p")]
    Projects {
        /// Project to show
        name: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all projects with their directories
    #[command(visible_alias = "l")]
    List,

    /// Set a project's input or output directory
    #[command(visible_alias = "s")]
    Set {
        /// Project name
        name: String,
        /// `in` or `out`
        direction: String,
        /// New directory (`.` for the current directory)
        path: PathBuf,
    },

    /// Remove a project
    #[command(visible_aliases = ["r", "rm"])]
    Remove {
        /// Project name
        name: String,
    },

    /// Convert one project, or every project when no name is given
    #[command(visible_alias = "go")]
    Run {
        /// Project name
        name: Option<String>,
    },

    /// Convert a single file without a project
    File {
        /// Source file
        path: PathBuf,
        /// Source language
        #[arg(short, long, default_value = "csharp")]
        language: String,
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Convert the named project
    #[command(external_subcommand)]
    External(Vec<String>),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command ran but some conversions failed
fn run(cli: Cli) -> anyhow::Result<bool> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(true);
    };

    let config_path = match cli.config {
        Some(path) => path,
        None => ConverterConfig::default_path().context("no config directory for this platform")?,
    };
    let mut config = ConverterConfig::load_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let registry = ConverterRegistry::new();

    match command {
        Commands::Init => {
            if ConverterConfig::init(&config_path)? {
                println!("✅ Created {}", config_path.display());
            } else {
                println!("Config already exists at {}", config_path.display());
            }
            Ok(true)
        }

        Commands::Add { name, language, input, output } => {
            if !registry.is_supported(&language) {
                bail!(
                    "Language `{}` is not supported (supported: {})",
                    language,
                    registry.languages().join(", ")
                );
            }
            let project = Project {
                name,
                language,
                input_dir: normalize_path(&input)?,
                output_dir: normalize_path(&output)?,
            };
            println!("✅ {}: {}, in={}, out={}", project.name, project.language, project.input_dir.display(), project.output_dir.display());
            config.add_project(project)?;
            config.save(&config_path)?;
            Ok(true)
        }

        Commands::Projects { name: None, json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&config.projects)?);
            } else {
                for project in &config.projects {
                    println!("{}", project.name);
                }
            }
            Ok(true)
        }

        Commands::Projects { name: Some(name), json } => {
            let project = config
                .find_project(&name)
                .with_context(|| format!("Project `{}` doesn't exist", name))?;
            if json {
                println!("{}", serde_json::to_string_pretty(project)?);
            } else {
                println!(
                    "Language: {}, In={}, Out={}",
                    project.language,
                    project.input_dir.display(),
                    project.output_dir.display()
                );
            }
            Ok(true)
        }

        Commands::List => {
            for line in config.project_listing() {
                println!("{}", line);
            }
            Ok(true)
        }

        Commands::Set { name, direction, path } => {
            let direction: Direction = direction.parse()?;
            let path = if path == Path::new(".") {
                std::env::current_dir()?
            } else {
                normalize_path(&path)?
            };
            println!("{}", path.display());
            config.set_project_dir(&name, direction, path)?;
            config.save(&config_path)?;
            Ok(true)
        }

        Commands::Remove { name } => {
            config.remove_project(&name)?;
            config.save(&config_path)?;
            println!("🗑️  Removed {}", name);
            Ok(true)
        }

        Commands::Run { name: Some(name) } => run_named(&config, &registry, &name),

        Commands::Run { name: None } => {
            let mut all_ok = true;
            for project in &config.projects {
                match run_project(&config, &registry, project) {
                    Ok(ok) => all_ok &= ok,
                    Err(e) => {
                        eprintln!("❌ {}: {:#}", project.name, e);
                        all_ok = false;
                    }
                }
            }
            Ok(all_ok)
        }

        Commands::File { path, language, out } => {
            let writer = TypeScriptWriter::new(out).with_header(config.output.header);
            let converter = registry.create(&language, writer)?;
            match converter.convert(&path)? {
                ConvertOutcome::Written { path: output, type_count } => {
                    println!("✅ {} → {} ({} types)", path.display(), output.display(), type_count);
                }
                ConvertOutcome::NoDeclarations => {
                    println!("⚠️  No record declarations in {}", path.display());
                }
            }
            Ok(true)
        }

        Commands::External(args) => match args.as_slice() {
            [name] => run_named(&config, &registry, name),
            _ => bail!("unexpected arguments: {}", args.join(" ")),
        },
    }
}

fn run_named(config: &ConverterConfig, registry: &ConverterRegistry, name: &str) -> anyhow::Result<bool> {
    let project = config
        .find_project(name)
        .with_context(|| format!("Project `{}` not found", name))?;
    run_project(config, registry, project)
}

fn run_project(config: &ConverterConfig, registry: &ConverterRegistry, project: &Project) -> anyhow::Result<bool> {
    let converter = registry.create(&project.language, config.writer_for(project))?;
    println!("🔄 {} ({}): {}", project.name, project.language, project.input_dir.display());
    let report = converter.convert_directory(&project.input_dir);
    print_report(&report);
    Ok(report.is_clean())
}

fn print_report(report: &BatchReport) {
    for converted in &report.converted {
        println!(
            "  ✅ {} → {} ({} types)",
            converted.input.display(),
            converted.output.display(),
            converted.type_count
        );
    }
    for skipped in &report.skipped {
        println!("  ⏭️  {} (no records)", skipped.display());
    }
    for (path, err) in &report.failures {
        println!("  ❌ {}: {}", path.display(), err);
    }
    for collision in &report.collisions {
        println!(
            "  ⚠️  {} overwritten: {} replaced output of {}",
            collision.output.display(),
            collision.kept.display(),
            collision.overwritten.display()
        );
    }
    println!(
        "  {} files, {} types, {} skipped, {} failed",
        report.converted.len(),
        report.type_count(),
        report.skipped.len(),
        report.failures.len()
    );
}
