use clap::{Parser, Subcommand};
use memento::{Memento, MementoConfig};
use memento_common::Attributes;
use memento_kernel::{Entity, Record};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod script;

use script::Script;

#[derive(Parser)]
#[command(name = "memento-cli", about = "CLI tool for memento snapshot/restore runs")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Walk through store, restore and an ignore-list override on a record
    Demo,
    /// Run a JSON script of store/set/unset/restore/restart steps
    Run {
        /// Path to the script file
        script: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("memento-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("core: {}", memento::crate_info());
            println!("kernel: {}", memento_kernel::crate_info());
            println!("common: {}", memento_common::crate_info());
        }
        Commands::Demo => demo()?,
        Commands::Run { script } => {
            let script = Script::from_path(&script)?;
            tracing::info!(kind = ?script.kind, steps = script.steps.len(), "running script");
            let transcript = script.run()?;
            for (i, (step, state)) in script.steps.iter().zip(&transcript.states).enumerate() {
                println!("{i:>3} {step:?} -> {}", render(state));
            }
            println!("depth: {}", transcript.depth);
        }
    }

    Ok(())
}

fn demo() -> anyhow::Result<()> {
    let mut record = Record::new();
    record.insert("a", json!(1))?;
    println!("initial:            {}", render(&record.to_json()));

    let mut memento = Memento::with_defaults(&mut record);
    memento.store();
    memento
        .entity_mut()
        .set(&json_object(json!({"a": 2, "b": 3}))?)?;
    println!("after set:          {}", render(&memento.entity().to_json()));

    memento.restore()?;
    println!("after restore:      {}", render(&memento.entity().to_json()));

    memento.store();
    memento.entity_mut().insert("a", json!(5))?;
    memento.restore_with(MementoConfig::new().with_ignore(["a"]))?;
    println!("restore ignoring a: {}", render(&memento.entity().to_json()));
    println!("depth: {}", memento.depth());
    Ok(())
}

fn json_object(value: serde_json::Value) -> anyhow::Result<Attributes> {
    let serde_json::Value::Object(map) = value else {
        anyhow::bail!("expected a JSON object, got {value}");
    };
    Ok(map)
}

fn render(attrs: &Attributes) -> String {
    serde_json::Value::Object(attrs.clone()).to_string()
}
