//! Native wrapper generator CLI

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "native-gen")]
#[command(about = "Generate typed native wrappers from declarations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate wrapper modules
    Generate {
        /// Side to generate wrappers for (default: all)
        #[arg(short, long)]
        side: Option<String>,
    },

    /// Check that wrapper modules are in sync with declarations
    Check {
        /// Side to check (default: all)
        #[arg(short, long)]
        side: Option<String>,
    },

    /// Print the parsed declarations
    List {
        /// Side to list (default: all)
        #[arg(short, long)]
        side: Option<String>,

        /// Print the model as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let root = native_gen::find_workspace_root()?;

    let sides = |side: Option<String>| -> Result<Vec<String>> {
        match side {
            Some(s) => Ok(vec![s]),
            None => native_gen::get_sides(&root),
        }
    };

    match cli.command {
        Commands::Generate { side } => {
            for s in sides(side)? {
                native_gen::generate_for_side(&root, &s)?;
            }
            println!("✓ Done!");
        }
        Commands::Check { side } => {
            let mut all_in_sync = true;
            for s in sides(side)? {
                if !native_gen::check_for_side(&root, &s)? {
                    all_in_sync = false;
                }
            }
            if all_in_sync {
                println!("✓ All wrappers are in sync!");
            } else {
                anyhow::bail!(
                    "Wrappers are out of sync. Run 'native-gen generate' to regenerate."
                );
            }
        }
        Commands::List { side, json } => {
            for s in sides(side)? {
                let model = native_gen::model_for_side(&root, &s)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&model)?);
                    continue;
                }

                println!("{} ({} natives)", s, model.natives.len());
                for native in &model.natives {
                    println!(
                        "  0x{:08x}:0x{:08x}  {:<40} -> {}",
                        native.namespace,
                        native.hash,
                        native.name,
                        native.value_type()
                    );
                }
            }
        }
    }

    Ok(())
}
