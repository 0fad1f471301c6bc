use chunkmill::{
    config::Config,
    logging,
    processing::DocumentService,
};
use clap::Parser;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Chunk a document into indexable pieces and print one JSON document per line.
#[derive(Parser)]
#[command(name = "chunkmill", version, about)]
struct Cli {
    /// Path to the document to process.
    input: PathBuf,

    /// Declared file type (pdf, txt, md); defaults to the file extension.
    #[arg(long)]
    file_type: Option<String>,

    /// Metadata attached to every chunk, as key=value pairs.
    #[arg(long = "meta", value_parser = parse_key_value)]
    meta: Vec<(String, String)>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing();
    let cli = Cli::parse();

    let config = Config::from_env()?;
    let service = DocumentService::new(&config);

    let file_name = cli
        .input
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("input path has no usable file name"))?;
    let file_type = match cli.file_type {
        Some(declared) => declared,
        None => cli
            .input
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| anyhow::anyhow!("cannot infer file type; pass --file-type"))?,
    };

    let mut metadata = Map::new();
    metadata.insert("source".to_string(), Value::String(file_name.clone()));
    for (key, value) in cli.meta {
        metadata.insert(key, Value::String(value));
    }

    let bytes = tokio::fs::read(&cli.input).await?;
    let documents = service
        .process_file(&bytes, &file_name, &file_type, metadata)
        .await?;

    for document in &documents {
        println!("{}", serde_json::to_string(document)?);
    }
    Ok(())
}
