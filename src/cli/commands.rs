//! Non-interactive commands

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::agent::{AgentDraft, CreateAgentRequest, build_create_request, parse_personality};
use crate::api::{AgentApiClient, AgentBackend};
use crate::config::{Config, crabtrader_home};
use crate::wizard::{CREATE_FAILED_MESSAGE, WizardStep, validate_step};

/// Load a draft from a `.json` file or, for any other extension, TOML.
///
/// Fields the file omits take their defaults; a missing `template_name`
/// comes from `agent.template_name` in the config.
pub fn load_draft(path: &Path, config: &Config) -> Result<AgentDraft> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft file: {:?}", path))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let mut doc: Value = if is_json {
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON draft: {:?}", path))?
    } else {
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML draft: {:?}", path))?
    };

    if let Some(map) = doc.as_object_mut() {
        map.entry("template_name")
            .or_insert_with(|| Value::String(config.agent.template_name.clone()));
    }

    let draft: AgentDraft =
        serde_json::from_value(doc).with_context(|| format!("Invalid draft: {:?}", path))?;
    tracing::debug!("Loaded draft '{}' from {:?}", draft.name, path);
    Ok(draft)
}

/// Validate every wizard step against the draft and build the request
fn prepare_request(config: &Config, draft_path: &Path) -> Result<CreateAgentRequest> {
    let draft = load_draft(draft_path, config)?;
    validate_step(&draft, WizardStep::Review)
        .with_context(|| format!("Draft {:?} is incomplete", draft_path))?;
    Ok(build_create_request(
        &draft,
        &config.agent.character_defaults(),
    ))
}

pub(super) fn cmd_parse(text: Option<String>, file: Option<&Path>) -> Result<()> {
    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read personality file: {:?}", path))?,
        (None, None) => anyhow::bail!("Provide personality text or --file <PATH>"),
    };

    let profile = parse_personality(&text);
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

pub(super) fn cmd_preview(config: &Config, draft_path: &Path) -> Result<()> {
    let request = prepare_request(config, draft_path)?;
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

pub(super) async fn cmd_create(config: &Config, draft_path: &Path) -> Result<()> {
    let request = prepare_request(config, draft_path)?;
    let client = AgentApiClient::new(&config.api)?;
    let summary = submit(&client, &request).await?;
    println!("{}", summary);
    Ok(())
}

pub(super) fn cmd_init(force: bool) -> Result<()> {
    let path = crabtrader_home().join("config.toml");
    write_starter_config(&path, force)?;
    println!("Configuration initialized at: {}", path.display());
    println!("Edit [api] base_url to point at your agent backend.");
    Ok(())
}

/// Save the default config to `path`, refusing to clobber unless `force`
fn write_starter_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at: {}\nUse --force to overwrite",
            path.display()
        );
    }
    Config::default().save(path)
}

async fn submit(backend: &dyn AgentBackend, request: &CreateAgentRequest) -> Result<String> {
    match backend.create_agent(request).await {
        Ok(created) => Ok(created.summary(&request.name)),
        Err(e) => {
            tracing::error!("Agent creation failed: {}", e);
            Err(anyhow::Error::new(e).context(CREATE_FAILED_MESSAGE))
        }
    }
}
