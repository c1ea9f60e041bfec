use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, info, warn};

use matrix_cli::logging::redact_value;
use matrix_cli::media::guess_media_type;
use matrix_cli::render::Renderer;
use matrix_client::{ApiClient, ClientConfig, GameClient};
use matrix_model::{AnalysisKind, AnalysisResult};
use matrix_sources::SourceCatalog;
use matrix_submit::{Applied, SubmissionRunner};

use crate::cli::{AnalyzeArgs, ConfigArgs, GameCommand, SourcesArgs};

/// Submit one input and print the normalized result.
pub async fn run_analyze(config: &ClientConfig, args: &AnalyzeArgs, renderer: Renderer) -> Result<()> {
    let kind = AnalysisKind::from(args.kind);
    let client = ApiClient::new(config).context("failed to build HTTP client")?;
    debug!(kind = %kind, base_url = %client.base_url(), endpoint = kind.endpoint(), "submitting");
    let mut runner = SubmissionRunner::new(client);

    let selected = if kind.input_kind().is_file() {
        let path = Path::new(&args.input);
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let media_type = args
            .media_type
            .clone()
            .unwrap_or_else(|| guess_media_type(path).to_string());
        let name = path
            .file_name()
            .map_or_else(|| args.input.clone(), |name| name.to_string_lossy().into_owned());
        debug!(
            file = redact_value(&name),
            media_type = %media_type,
            bytes = bytes.len(),
            "selected file"
        );
        runner.select_file(kind, name, media_type, bytes).await
    } else {
        let text = read_text_input(&args.input)?;
        debug!(input = redact_value(&text), "selected text");
        runner.select_text(kind, text).await
    };
    selected.map_err(|error| anyhow!(error.user_message().to_string()))?;

    match runner.submit().await {
        Ok(Applied::Applied) => {}
        Ok(Applied::Stale) => bail!("the analysis was superseded before it completed"),
        Err(error) => bail!(error.user_message().to_string()),
    }

    match runner.outcome() {
        Some(Ok(result)) => {
            info!(kind = %kind, headline = %result.headline(), "analysis complete");
            if let Some(path) = &args.graph_out {
                write_knowledge_graph(result, path)?;
            }
            if args.json {
                println!("{}", serde_json::to_string_pretty(result)?);
            } else {
                print!("{}", renderer.result(result));
            }
            Ok(())
        }
        Some(Err(error)) => {
            warn!(kind = %kind, error = %error, retryable = error.is_retryable(), "analysis failed");
            Err(anyhow!(error.user_message().to_string()))
        }
        None => bail!("the analysis did not complete"),
    }
}

/// `-` reads the whole of stdin; anything else is the input itself.
fn read_text_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        Ok(text)
    } else {
        Ok(input.to_string())
    }
}

fn write_knowledge_graph(result: &AnalysisResult, path: &Path) -> Result<()> {
    let AnalysisResult::TextFactCheck(text) = result else {
        bail!("--graph-out only applies to text fact-checks");
    };
    let Some(data_url) = &text.knowledge_graph else {
        warn!("no knowledge graph in the result");
        return Ok(());
    };
    let encoded = data_url
        .split_once("base64,")
        .map_or(data_url.as_str(), |(_, data)| data);
    let bytes = STANDARD
        .decode(encoded.trim())
        .context("knowledge graph is not valid base64")?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote knowledge graph");
    Ok(())
}

/// List the top trusted news sources.
pub fn run_sources(config: &ClientConfig, args: &SourcesArgs, renderer: Renderer) -> Result<()> {
    let path: PathBuf = args
        .file
        .clone()
        .or_else(|| config.sources_file.clone())
        .context("no sources file; pass --file or set sources_file in the config")?;
    let catalog = SourceCatalog::new(path);
    let top = catalog.top(args.top)?;
    debug!(path = %catalog.path().display(), shown = top.len(), "loaded sources");
    if args.json {
        println!("{}", serde_json::to_string_pretty(&top)?);
    } else {
        println!("{}", renderer.sources(&top));
    }
    Ok(())
}

/// One step of the spot-the-fake game.
pub async fn run_game(config: &ClientConfig, command: &GameCommand, renderer: Renderer) -> Result<()> {
    let client = GameClient::new(config).context("failed to build HTTP client")?;
    match command {
        GameCommand::Pair => {
            let pair = client
                .pair()
                .await
                .map_err(|error| anyhow!(error.user_message().to_string()))?;
            println!("{}", renderer.pair(&pair));
        }
        GameCommand::Vote { pair_id, choice } => {
            client
                .vote(pair_id, *choice)
                .await
                .map_err(|error| anyhow!(error.user_message().to_string()))?;
            println!("Vote recorded for item {choice} of pair {pair_id}.");
        }
        GameCommand::Answer { pair_id, choice } => {
            let answer = client
                .answer(pair_id)
                .await
                .map_err(|error| anyhow!(error.user_message().to_string()))?;
            println!("{}", renderer.answer(&answer, *choice));
        }
    }
    Ok(())
}

/// Show or save the effective configuration.
pub fn run_config(config: &ClientConfig, path: &Path, args: &ConfigArgs) -> Result<()> {
    if args.path {
        println!("{}", path.display());
    } else if args.save {
        config
            .save_to(path)
            .with_context(|| format!("failed to save config to {}", path.display()))?;
        println!("Saved configuration to {}", path.display());
    } else {
        print!("{}", toml::to_string_pretty(config)?);
    }
    Ok(())
}
