use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use draftkit::{
    DraftError,
    data::{
        DataPath, Draft, SchemaNode, format, infer, path::Overwrite, sample,
        tree::{self, DisplayNode},
        walker::{self, FieldKind},
    },
};
use log::{LevelFilter, warn};
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(
    name = "draftkit",
    version,
    about = "Edit template test data driven by a JSON Schema"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a sample data instance for a schema
    Sample {
        /// Schema file (.json or .toml)
        schema: PathBuf,
    },
    /// List the form fields of a schema
    Fields {
        /// Schema file (.json or .toml)
        schema: PathBuf,
        /// Path the fields live under, e.g. `positions[0]`
        #[arg(long, default_value = "")]
        prefix: String,
    },
    /// Print a data file as a sorted tree
    Show {
        /// Data file (.json or .toml)
        data: PathBuf,
    },
    /// Write a value into a data file
    Set {
        /// Data file (.json or .toml)
        data: PathBuf,
        /// Target path, e.g. `customer.positions[2].name`
        path: String,
        /// Value; parsed as JSON when possible, otherwise stored as a string
        value: String,
    },
    /// Append a blank row to an array in a data file
    AddItem {
        /// Data file (.json or .toml)
        data: PathBuf,
        /// Schema file describing the data
        schema: PathBuf,
        /// Array path, e.g. `positions`
        path: String,
    },
    /// Remove a row from an array in a data file
    RemoveItem {
        /// Data file (.json or .toml)
        data: PathBuf,
        /// Array path, e.g. `positions`
        path: String,
        /// Zero-based row index
        index: usize,
    },
    /// Build a schema from template field names
    Infer {
        /// Dot-notation field name, repeatable
        #[arg(long = "field", value_name = "NAME")]
        fields: Vec<String>,
        /// Repetition group path, repeatable
        #[arg(long = "array", value_name = "PATH")]
        arrays: Vec<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sample { schema } => {
            let schema = load_schema(&schema)?;
            print_json(&sample::generate(&schema))?;
        }
        Commands::Fields { schema, prefix } => {
            let schema = load_schema(&schema)?;
            let prefix = DataPath::parse(&prefix);
            for field in walker::walk(Some(&schema), &prefix) {
                let detail = match field.kind {
                    FieldKind::Leaf { leaf_type, .. } => leaf_type.name(),
                    kind => kind.name(),
                };
                println!("{}\t{detail}", field.path);
            }
        }
        Commands::Show { data } => {
            let draft = load_draft(&data)?;
            let nodes: Vec<DisplayNode> = draft.display_tree();
            print!("{}", tree::render_text(&nodes));
        }
        Commands::Set { data, path, value } => {
            let mut draft = load_draft(&data)?;
            let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
            let Some(overwrites) = draft.set(&DataPath::parse(&path), value) else {
                bail!("cannot write `{path}`");
            };
            report_overwrites(&overwrites);
            save_draft(&mut draft, &data)?;
        }
        Commands::AddItem { data, schema, path } => {
            let schema = load_schema(&schema)?;
            let mut draft = load_draft(&data)?;
            let added = draft.add_item_by_schema(&schema, &DataPath::parse(&path))?;
            report_overwrites(&added.overwrites);
            save_draft(&mut draft, &data)?;
            println!("added {path}[{}]", added.index);
        }
        Commands::RemoveItem { data, path, index } => {
            let mut draft = load_draft(&data)?;
            if draft.remove_item(&DataPath::parse(&path), index).is_none() {
                bail!("no item {index} in `{path}`");
            }
            save_draft(&mut draft, &data)?;
        }
        Commands::Infer { fields, arrays } => {
            let schema = infer::infer_schema(fields.as_slice(), arrays.as_slice());
            print_json(&schema.to_value())?;
        }
    }
    Ok(())
}

fn load_schema(path: &Path) -> Result<SchemaNode> {
    let value = format::read_value(path)
        .with_context(|| format!("failed to read schema {}", path.display()))?;
    SchemaNode::from_value(&value).ok_or_else(|| DraftError::InvalidSchema(path.into()).into())
}

fn load_draft(path: &Path) -> Result<Draft> {
    Draft::load(path).with_context(|| format!("failed to load draft {}", path.display()))
}

fn save_draft(draft: &mut Draft, path: &Path) -> Result<()> {
    draft
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn report_overwrites(overwrites: &[Overwrite]) {
    for overwrite in overwrites {
        warn!(
            "dropped {} previously stored at `{}`",
            overwrite.replaced, overwrite.at
        );
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
