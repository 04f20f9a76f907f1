//! Contact Form - command line driver
//!
//! Runs one edit session: loads the contact given by `--id` (or starts a new
//! one), applies the JSON edits from `--edits`, waits for the address to
//! settle, and prints the resulting contact. With `--save` the contact is
//! persisted afterwards.
//!
//! Logs go to stderr; stdout carries only the JSON result.

use anyhow::{bail, Context, Result};
use contact_form::form::FieldEdit;
use contact_form::{
    Config, ContactEditor, ContactStore, ContactsClient, HttpContactStore, InMemoryContactStore,
    RouteParams, TracingNavigator,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    id: Option<String>,
    edits: Option<PathBuf>,
    save: bool,
}

impl Args {
    fn parse() -> Result<Self> {
        let mut args = Args::default();
        let mut iter = std::env::args().skip(1);

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--id" => args.id = Some(iter.next().context("--id needs a value")?),
                "--edits" => {
                    args.edits = Some(PathBuf::from(
                        iter.next().context("--edits needs a file path")?,
                    ))
                }
                "--save" => args.save = true,
                "-h" | "--help" => {
                    eprintln!("usage: contact-form [--id ID] [--edits FILE] [--save]");
                    std::process::exit(0);
                }
                other => bail!("unknown argument: {}", other),
            }
        }

        Ok(args)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize logging (stderr only to keep stdout for the JSON result)
    let fallback = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let args = Args::parse()?;

    let store: Arc<dyn ContactStore> = match ContactsClient::from_config(&config) {
        Some(client) => {
            info!("Using contacts API at {}", client.base_url());
            Arc::new(HttpContactStore::new(client))
        }
        None => {
            info!("No CONTACTS_API_URL set; using in-memory contact store");
            Arc::new(InMemoryContactStore::new())
        }
    };

    let mut editor = ContactEditor::from_config(&config, store, Arc::new(TracingNavigator))?;

    let route = match &args.id {
        Some(id) => RouteParams::for_contact(id.clone()),
        None => RouteParams::new(),
    };
    if let Err(e) = editor.initialize(&route).await {
        error!("{}", e);
    }

    if let Some(path) = &args.edits {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading edits from {}", path.display()))?;
        let edits: Vec<FieldEdit> =
            serde_json::from_str(&raw).context("edits must be a JSON array of field edits")?;

        info!("Applying {} edits", edits.len());
        for edit in edits {
            editor.apply(edit)?;
        }
    }

    if let Some(state) = editor.settle().await {
        info!("Address settled: {:?}", state);
    }

    let summary = editor.form().validation_summary();
    for (field, errors) in &summary {
        for err in errors {
            eprintln!("{}: {}", field, err);
        }
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&editor.form().raw_value())?
    );

    if args.save {
        editor.save().await?;
        info!("Contact saved");
    }

    Ok(())
}
