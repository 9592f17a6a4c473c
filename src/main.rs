use clap::{Parser, Subcommand};
use registry_press::{check, config, links, manifest, output, publish};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "registry-press")]
#[command(about = "Publish a component registry as static JSON")]
#[command(long_about = "\
Publish a component registry as static JSON

Reads a registry manifest and writes one directory per item, each holding a
descriptor with the item's source files embedded, an index with its resolved
registry dependencies, and a placeholder stylesheet.

Manifest (registry.json):

  {
    \"name\": \"my-registry\",
    \"homepage\": \"https://example.com\",
    \"items\": [
      {
        \"name\": \"hello-world\",
        \"type\": \"registry:block\",
        \"title\": \"Hello World\",
        \"description\": \"A simple component\",
        \"dependencies\": [\"lucide-react\"],
        \"registryDependencies\": [\"button\"],
        \"files\": [{ \"path\": \"registry/hello-world.tsx\", \"type\": \"registry:component\" }]
      }
    ]
  }

Output:

  public/r/
  ├── index.json                     # Catalog of every item
  └── hello-world/
      ├── registry-item.json         # Descriptor with file contents
      ├── index.json                 # Identity + registry dependencies
      └── styles/style.css           # Placeholder

Source paths are resolved against the working directory. A missing source file
is a warning; the item is published with empty content.

Run 'registry-press gen-config' to generate a documented registry.toml.")]
#[command(version)]
struct Cli {
    /// Config file (optional; stock defaults apply when absent)
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Registry manifest (overrides `manifest` in the config file)
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    /// Output root (overrides `output` in the config file)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Log filter for stderr diagnostics, e.g. `info` or `registry_press=debug`
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Publish the registry into the output directory
    Build,
    /// Validate the manifest without writing anything
    Check,
    /// Print the "open in" URL for an item
    Link {
        /// Item name
        name: String,
    },
    /// Print a stock registry.toml with all options documented
    GenConfig,
}

/// Config and paths shared by the commands that read a manifest.
struct Context {
    config: config::PublishConfig,
    manifest_path: PathBuf,
    output_root: PathBuf,
}

impl Context {
    /// Load the config file, then let command-line paths override it.
    fn load(cli: &Cli) -> Result<Self, config::ConfigError> {
        let config = config::load_config(&cli.config)?;
        let manifest_path = cli
            .manifest
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.manifest));
        let output_root = cli
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output));
        Ok(Self {
            config,
            manifest_path,
            output_root,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match &cli.command {
        Command::Build => {
            let ctx = Context::load(&cli)?;
            init_thread_pool(&ctx.config.processing);
            let report =
                publish::publish_from_path(&ctx.manifest_path, &ctx.output_root, &ctx.config)?;
            output::print_publish_output(&report);
        }
        Command::Check => {
            let ctx = Context::load(&cli)?;
            let report = check::check_path(&ctx.manifest_path)?;
            output::print_check_output(&report);
            let errors = report.error_count();
            if errors > 0 {
                return Err(check::CheckError::Failed(errors).into());
            }
        }
        Command::Link { name } => {
            let ctx = Context::load(&cli)?;
            let manifest = manifest::load_manifest(&ctx.manifest_path)?;
            let registry_url = ctx.config.registry_url(&manifest.homepage);
            println!(
                "{}",
                links::open_in_url(&ctx.config.links.open_in, &registry_url, name)
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Diagnostics go to stderr; `RUST_LOG` takes precedence over `--log-level`.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
