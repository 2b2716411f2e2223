//! Submit command - submit a form and print the reconciled state

use crate::cli::progress::CliProgress;
use crate::cli::style::Stylize;
use anstream::println;
use clap::Args;
use formsync::config::Config;
use formsync::error::{Error, Result};
use formsync::form::{FormElement, SubmitEvent};
use formsync::mediator::{Capabilities, FormMediator};
use formsync::navigation::{FnNavigator, MemoryHistory, RouteTable};
use formsync::state::SharedState;
use formsync::transport::HttpTransport;
use formsync::types::{FileBlob, FormFieldSet, Parameters};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Arguments for `formsync submit`
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Page location the form lives on (absolute URL)
    pub location: String,

    /// Form method attribute
    #[arg(short, long, default_value = "get")]
    pub method: String,

    /// Form action attribute (body submissions only)
    #[arg(short, long)]
    pub action: Option<String>,

    /// Text field, repeatable
    #[arg(short = 'f', long = "field", value_name = "NAME=VALUE", value_parser = parse_pair)]
    pub fields: Vec<(String, String)>,

    /// File field read from disk, repeatable
    #[arg(long = "file", value_name = "NAME=PATH", value_parser = parse_pair)]
    pub files: Vec<(String, String)>,

    /// Initial page state as a JSON object
    #[arg(long)]
    pub state: Option<String>,

    /// Route used to resolve redirects, repeatable
    #[arg(long = "route", value_name = "PATH=PAGE", value_parser = parse_pair)]
    pub routes: Vec<(String, String)>,
}

fn parse_pair(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))
}

async fn read_file_field(path: &Path) -> Result<FileBlob> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    Ok(FileBlob::new(file_name, bytes))
}

/// Run the submit command.
///
/// Returns `false` when the submission failed; the failure has already
/// been printed.
pub async fn run_submit(args: SubmitArgs, config: Config) -> Result<bool> {
    let location = Url::parse(&args.location)?;

    let mut fields: FormFieldSet = args.fields.into_iter().collect();
    for (name, path) in args.files {
        let blob = read_file_field(&PathBuf::from(path)).await?;
        fields.append(name, blob);
    }

    let mut form = FormElement::new(args.method).with_fields(fields);
    if let Some(action) = args.action {
        form = form.with_action(action);
    }

    let state = match args.state.as_deref() {
        Some(raw) => SharedState::from_value(serde_json::from_str(raw)?)?,
        None => SharedState::new(),
    };

    let routes = args
        .routes
        .into_iter()
        .fold(RouteTable::new(), |table, (path, page)| table.with(path, page));

    let capabilities = Capabilities::new(state.clone())
        .with_navigator(Arc::new(FnNavigator::new(
            |page: &str, _parameters: &Parameters| debug!(page, "navigation requested"),
        )))
        .with_resolver(Arc::new(routes));

    let history = Arc::new(MemoryHistory::new(location));
    let transport = Arc::new(HttpTransport::new(&config)?);
    let mediator = FormMediator::new(transport, history)
        .with_config(config)
        .with_observer(Arc::new(CliProgress::new()));

    let mut event = SubmitEvent::new(form);
    if mediator.handle_submit(&mut event, &capabilities).await.is_err() {
        return Ok(false);
    }

    let rendered = serde_json::to_string_pretty(&serde_json::Value::Object(state.snapshot()))
        .map_err(|e| Error::Internal(format!("failed to render state: {e}")))?;
    println!("{}", "State:".emphasis());
    println!("{rendered}");

    Ok(true)
}
