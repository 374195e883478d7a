use anyhow::{Context, Result};
use autoload_core::{composer, AutoloadMappings, ClassLoader, HACK_EXTENSION};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;

/// Include path used when `--include-path` is given
const INCLUDE_PATH_ENV: &str = "AUTOLOAD_INCLUDE_PATH";

#[derive(Parser)]
#[command(name = "autoload")]
#[command(version)]
#[command(about = "Resolve PHP class names to files using PSR-0 / PSR-4 mappings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve class names to the files defining them
    Resolve {
        /// Fully-qualified class names
        #[arg(value_name = "CLASS", required = true)]
        classes: Vec<String>,

        #[command(flatten)]
        sources: Sources,

        /// Probe the include path (from $AUTOLOAD_INCLUDE_PATH) as a last resort
        #[arg(long)]
        include_path: bool,

        /// Extension retried when the primary one finds nothing
        #[arg(long, value_name = "EXT", num_args = 0..=1, default_missing_value = HACK_EXTENSION)]
        alt_ext: Option<String>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the merged mappings as JSON
    Dump {
        #[command(flatten)]
        sources: Sources,
    },

    /// List files that must be loaded eagerly
    Files {
        /// Composer vendor directory
        #[arg(long, value_name = "DIR", default_value = "vendor")]
        vendor: PathBuf,
    },
}

#[derive(Args)]
struct Sources {
    /// Composer vendor directory
    #[arg(long, value_name = "DIR")]
    vendor: Option<PathBuf>,

    /// JSON mapping file (namespaces, psr4, classmap, files)
    #[arg(long, value_name = "FILE")]
    mappings: Option<PathBuf>,

    /// Extra PSR-4 mapping, e.g. 'App\=src' (empty prefix = fallback)
    #[arg(long, value_name = "PREFIX=DIR")]
    psr4: Vec<String>,

    /// Extra PSR-0 mapping, e.g. 'Twig_=lib' (empty prefix = fallback)
    #[arg(long, value_name = "PREFIX=DIR")]
    psr0: Vec<String>,
}

impl Sources {
    /// Merge every source in order: vendor, mapping file, command line
    fn collect(&self) -> Result<AutoloadMappings> {
        let mut mappings = match &self.vendor {
            Some(vendor) => composer::load_vendor(vendor)?,
            None => AutoloadMappings::default(),
        };

        if let Some(path) = &self.mappings {
            let file = AutoloadMappings::from_file(path)?;
            for (prefix, dirs) in file.namespaces {
                mappings.add_namespace(&prefix, dirs.to_vec());
            }
            for (prefix, dirs) in file.psr4 {
                mappings.add_psr4(&prefix, dirs.to_vec());
            }
            mappings.classmap.extend(file.classmap);
            mappings.files.extend(file.files);
        }

        for entry in &self.psr4 {
            let (prefix, dir) = parse_mapping(entry)?;
            mappings.add_psr4(prefix, [dir]);
        }
        for entry in &self.psr0 {
            let (prefix, dir) = parse_mapping(entry)?;
            mappings.add_namespace(prefix, [dir]);
        }

        Ok(mappings)
    }
}

fn parse_mapping(entry: &str) -> Result<(&str, PathBuf)> {
    let (prefix, dir) = entry
        .split_once('=')
        .with_context(|| format!("Expected PREFIX=DIR, got '{}'", entry))?;
    Ok((prefix, PathBuf::from(dir)))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            classes,
            sources,
            include_path,
            alt_ext,
            json,
        } => {
            let mappings = sources.collect()?;
            let mut loader =
                ClassLoader::from_mappings(&mappings).context("Invalid autoload mappings")?;

            if include_path {
                let dirs: Vec<PathBuf> = std::env::var_os(INCLUDE_PATH_ENV)
                    .map(|paths| std::env::split_paths(&paths).collect())
                    .unwrap_or_default();
                log::info!("Include path: {:?}", dirs);
                loader.set_include_path(dirs);
                loader.set_use_include_path(true);
            }
            loader.set_alternate_extension(alt_ext);

            let mut missing = 0;
            let mut results = serde_json::Map::new();

            for class in &classes {
                let file = loader.find_file(class);
                if file.is_none() {
                    missing += 1;
                }

                if json {
                    let value = match &file {
                        Some(path) => serde_json::Value::String(path.display().to_string()),
                        None => serde_json::Value::Null,
                    };
                    results.insert(class.clone(), value);
                } else {
                    match &file {
                        Some(path) => println!("{} => {}", class, path.display()),
                        None => println!("{} => not found", class),
                    }
                }
            }

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::Value::Object(results))?
                );
            }

            if missing > 0 {
                log::debug!("{} of {} classes not found", missing, classes.len());
                process::exit(1);
            }
        }

        Commands::Dump { sources } => {
            let mappings = sources.collect()?;
            println!("{}", mappings.to_json()?);
        }

        Commands::Files { vendor } => {
            let mappings = composer::load_vendor(&vendor)?;
            for file in &mappings.files {
                println!("{}", file.display());
            }
        }
    }

    Ok(())
}
