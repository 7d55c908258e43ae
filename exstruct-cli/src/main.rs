//! Command-line interface for structured extraction.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use exstruct::{
    list_schemas, load_schema, templates, CostSummary, ExtractionResult, Extractor,
    ExtractorConfig,
};

mod logging;

#[derive(Parser)]
#[command(name = "exstruct")]
#[command(about = "Extract structured data from text using LLM structured outputs")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in extraction templates
    Templates,

    /// List schema documents in a directory
    Schemas {
        /// Directory containing schema YAML documents
        #[arg(long, default_value = "schemas")]
        dir: PathBuf,
    },

    /// Extract data using a built-in template
    Extract {
        /// Template name (see `templates`)
        template: String,

        /// Override the template's extraction prompt
        #[arg(long)]
        prompt: Option<String>,

        #[command(flatten)]
        io: IoArgs,
    },

    /// Extract data using a custom JSON schema
    ExtractCustom {
        /// JSON schema file
        #[arg(short = 's', long)]
        schema_file: PathBuf,

        /// System prompt text
        #[arg(long)]
        prompt: Option<String>,

        /// File containing the system prompt
        #[arg(short = 'p', long, conflicts_with = "prompt")]
        prompt_file: Option<PathBuf>,

        #[command(flatten)]
        io: IoArgs,
    },

    /// Extract data using a schema document loaded by name
    ExtractSchema {
        /// Schema name (file stem in the schema directory)
        name: String,

        /// Directory containing schema YAML documents
        #[arg(long, default_value = "schemas")]
        dir: PathBuf,

        #[command(flatten)]
        io: IoArgs,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input text file
    #[arg(short = 'i', long)]
    input_file: Option<PathBuf>,

    /// Input text directly
    #[arg(short = 't', long)]
    text: Option<String>,

    /// Output JSON file (default: auto-generated in the data directory)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Directory for auto-generated outputs
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    /// Don't save to file, only print to stdout
    #[arg(long)]
    no_save: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Templates => {
            println!("Available templates:");
            for (name, description) in templates::list() {
                println!("  {name}: {description}");
            }
            Ok(())
        }

        Commands::Schemas { dir } => {
            let entries = list_schemas(&dir)?;
            if entries.is_empty() {
                println!("No schema documents found in {}", dir.display());
                return Ok(());
            }
            println!("Available schemas in {}:", dir.display());
            for (name, description) in entries {
                if description.is_empty() {
                    println!("  {name}");
                } else {
                    println!("  {name}: {description}");
                }
            }
            Ok(())
        }

        Commands::Extract {
            template,
            prompt,
            io,
        } => {
            let Some(schema) = templates::get(&template) else {
                bail!("Unknown template `{template}`, run `exstruct templates` to list them");
            };
            let extractor = build_extractor(cli.debug)?;
            let input = read_input(&io)?;

            let result = extractor
                .extract_with_prompt(schema, &input, prompt.as_deref())
                .await;
            report(&result, &template, &io, &extractor.cost_summary())
        }

        Commands::ExtractCustom {
            schema_file,
            prompt,
            prompt_file,
            io,
        } => {
            let raw = std::fs::read_to_string(&schema_file)
                .with_context(|| format!("Error loading schema: {}", schema_file.display()))?;
            let schema: Value = serde_json::from_str(&raw)
                .with_context(|| format!("Error loading schema: {}", schema_file.display()))?;
            let system_prompt = resolve_prompt(prompt_file.as_deref(), prompt.as_deref())?;

            let extractor = build_extractor(cli.debug)?;
            let input = read_input(&io)?;

            let result = extractor
                .extract_with_custom_schema(&input, &schema, &system_prompt)
                .await;
            report(&result, "custom", &io, &extractor.cost_summary())
        }

        Commands::ExtractSchema { name, dir, io } => {
            let schema = load_schema(&dir, &name)?;
            let extractor = build_extractor(cli.debug)?;
            let input = read_input(&io)?;

            let result = extractor.extract_with_loaded_schema(&schema, &input).await;
            report(&result, &name, &io, &extractor.cost_summary())
        }
    }
}

/// Load configuration, set up logging, and construct the extractor.
fn build_extractor(debug: bool) -> Result<Extractor> {
    let mut config = ExtractorConfig::from_env()?;
    if debug {
        config.log_level = "debug".to_string();
    }
    logging::init(&config);
    Ok(Extractor::new(config)?)
}

/// Resolve input text from a file or inline argument.
fn read_input(io: &IoArgs) -> Result<String> {
    if let Some(path) = &io.input_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Error reading input file: {}", path.display()));
    }
    if let Some(text) = &io.text {
        return Ok(text.clone());
    }
    bail!("Error: Must provide either --input-file or --text");
}

/// Resolve the system prompt from a file or inline argument.
fn resolve_prompt(prompt_file: Option<&Path>, prompt: Option<&str>) -> Result<String> {
    if let Some(path) = prompt_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Error reading prompt file: {}", path.display()));
    }
    if let Some(text) = prompt {
        return Ok(text.to_string());
    }
    bail!("Error: Must provide either --prompt-file or --prompt");
}

/// Write the extracted data as indented JSON, returning the path used.
fn save_extraction_result(
    data: &Value,
    name: &str,
    output: Option<&Path>,
    data_dir: &Path,
) -> Result<PathBuf> {
    let save_path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            data_dir.join(format!("{name}_extraction_{timestamp}.json"))
        }
    };

    if let Some(parent) = save_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Error creating directory: {}", parent.display()))?;
        }
    }

    std::fs::write(&save_path, serde_json::to_string_pretty(data)?)
        .with_context(|| format!("Error writing results: {}", save_path.display()))?;
    Ok(save_path)
}

/// Print and persist the outcome of one extraction.
fn report(result: &ExtractionResult, name: &str, io: &IoArgs, cost: &CostSummary) -> Result<()> {
    if !result.success() {
        bail!(
            "Extraction failed: {}",
            result.error_message().unwrap_or("unknown error")
        );
    }
    let Some(data) = result.data() else {
        bail!("Error: Extraction succeeded but no data returned");
    };

    let output_json = if io.pretty {
        serde_json::to_string_pretty(data)?
    } else {
        serde_json::to_string(data)?
    };

    if !io.no_save {
        let path = save_extraction_result(data, name, io.output.as_deref(), &io.data_dir)?;
        println!("✅ Results saved to {}", path.display());
    }

    if io.output.is_none() || io.pretty || io.no_save {
        println!("📄 Extraction Result:");
        println!("{output_json}");
    }

    if let Some(tokens) = result.tokens_used() {
        println!("📊 Tokens used: {tokens}");
        println!("💰 Estimated cost: ~${:.4}", cost.total_cost);
    }
    Ok(())
}
