use crate::client::RpcGateway;
use crate::config::{global_settings_path, global_state_root, load_settings, Settings};
use crate::engine::eligibility::allowed_types;
use crate::engine::form::{validate_form, ProposalForm};
use crate::engine::slots::SlotUpdate;
use crate::engine::submit::ProposalComposer;
use crate::governance::GovernanceAccount;
use crate::instructions::{InstructionResolver, InstructionResult, InstructionType, StaticResolver};
use crate::shared::logging::append_submit_log_line;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Validate,
    Plan,
    Submit,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "validate" => CliVerb::Validate,
        "plan" => CliVerb::Plan,
        "submit" => CliVerb::Submit,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  validate <file>                      Check a proposal definition without submitting"
            .to_string(),
        "  plan <file>                          Print the canonical instruction plan".to_string(),
        "  submit <file> [--draft] [--config <path>]  Submit the proposal for voting".to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

/// One slot of a proposal definition file. Payloads arrive pre-encoded, so
/// the slot's editor is a static resolver around the stated result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDefinition {
    #[serde(rename = "type")]
    pub instruction_type: Option<InstructionType>,
    #[serde(default)]
    pub governed_account: Option<GovernanceAccount>,
    #[serde(default)]
    pub result: Option<InstructionResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDefinition {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub vote_by_council: bool,
    #[serde(default)]
    pub instructions: Vec<SlotDefinition>,
}

pub fn load_definition(path: &Path) -> Result<ProposalDefinition, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    serde_yaml::from_str(&raw).map_err(|err| format!("invalid yaml in {}: {err}", path.display()))
}

/// Builds a composer from a definition, slot 0 first so the authority reset
/// rule fires before any later slot exists.
pub fn build_composer(definition: &ProposalDefinition) -> Result<ProposalComposer, String> {
    let mut composer = ProposalComposer::new();
    composer.form = ProposalForm {
        title: definition.title.clone(),
        description: definition.description.clone(),
        vote_by_council: definition.vote_by_council,
    };
    for (index, slot) in definition.instructions.iter().enumerate() {
        if index > 0 {
            composer.slots.add_slot();
        }
        if let Some(instruction_type) = slot.instruction_type {
            composer
                .slots
                .set_slot_type(index, instruction_type)
                .map_err(|err| err.to_string())?;
        }
        let resolver: Option<Box<dyn InstructionResolver>> = slot
            .result
            .as_ref()
            .map(|result| Box::new(StaticResolver::new(result.clone())) as Box<dyn InstructionResolver>);
        composer
            .slots
            .update_slot(
                index,
                SlotUpdate {
                    governed_account: slot.governed_account.clone(),
                    resolver,
                    ..SlotUpdate::default()
                },
            )
            .map_err(|err| err.to_string())?;
    }
    Ok(composer)
}

/// Static checks over a definition, mirroring what the engine would reject
/// at submit time plus the slot-ordering rules left to the caller.
pub fn validate_definition(definition: &ProposalDefinition) -> Vec<String> {
    let mut issues: Vec<String> = validate_form(&ProposalForm {
        title: definition.title.clone(),
        description: definition.description.clone(),
        vote_by_council: definition.vote_by_council,
    })
    .into_iter()
    .map(|(field, message)| format!("{field}: {message}"))
    .collect();

    let authority = definition
        .instructions
        .iter()
        .find_map(|slot| slot.governed_account.as_ref());
    if authority.is_none() {
        issues.push("no slot resolves a governance authority".to_string());
    }

    let slot_count = definition.instructions.len();
    for (index, slot) in definition.instructions.iter().enumerate() {
        match slot.instruction_type {
            None if index + 1 != slot_count => {
                issues.push(format!("slot {index} has no instruction type selected"));
            }
            Some(instruction_type) => {
                if !allowed_types(index, authority).contains(&instruction_type) {
                    issues.push(format!(
                        "slot {index} type `{instruction_type}` is not selectable under the current authority"
                    ));
                }
                match &slot.result {
                    None => issues.push(format!("slot {index} has no instruction result")),
                    Some(result) if !result.is_valid => {
                        issues.push(format!("slot {index} instruction is not valid"));
                    }
                    Some(_) => {}
                }
            }
            None => {}
        }
    }
    issues
}

fn cmd_validate(path: &Path) -> Result<String, String> {
    let definition = load_definition(path)?;
    let issues = validate_definition(&definition);
    if issues.is_empty() {
        Ok(format!(
            "proposal definition is valid ({} instruction slots)",
            definition.instructions.len()
        ))
    } else {
        Err(issues.join("\n"))
    }
}

fn cmd_plan(path: &Path) -> Result<String, String> {
    let definition = load_definition(path)?;
    let issues = validate_definition(&definition);
    if !issues.is_empty() {
        return Err(issues.join("\n"));
    }
    let composer = build_composer(&definition)?;
    let authority = composer
        .slots
        .resolved_authority()
        .ok_or_else(|| "no governance authority selected".to_string())?;
    let results: Vec<InstructionResult> = definition
        .instructions
        .iter()
        .filter_map(|slot| slot.result.clone())
        .collect();
    let plan =
        crate::engine::assembly::assemble(&results, authority).map_err(|err| err.to_string())?;

    let mut lines = vec![format!(
        "{} instructions under authority {} ({})",
        plan.len(),
        authority.pubkey,
        authority.kind
    )];
    for (position, instruction) in plan.iter().enumerate() {
        lines.push(format!(
            "  {position}. program={} accounts={} data={}B holdUp={}s",
            instruction.data.program_id,
            instruction.data.accounts.len(),
            instruction.data.data.len(),
            instruction.hold_up_time
        ));
    }
    Ok(lines.join("\n"))
}

fn cmd_submit(path: &Path, is_draft: bool, config_path: Option<PathBuf>) -> Result<String, String> {
    let settings_path = match config_path {
        Some(path) => path,
        None => global_settings_path().map_err(|err| err.to_string())?,
    };
    let settings: Settings = load_settings(&settings_path).map_err(|err| err.to_string())?;

    let definition = load_definition(path)?;
    if definition.vote_by_council && !settings.council_available {
        return Err("voteByCouncil requires a realm with a council".to_string());
    }
    let mut composer = build_composer(&definition)?;
    let gateway = RpcGateway::new(&settings.rpc_base);
    let outcome = composer.submit(&gateway, is_draft);

    if let Ok(state_root) = global_state_root() {
        let line = format!(
            "{} file={} draft={} outcome={}",
            chrono::Utc::now().to_rfc3339(),
            path.display(),
            is_draft,
            match &outcome {
                Ok(address) => format!("created proposal={address}"),
                Err(err) => format!("error `{err}`"),
            }
        );
        let _ = append_submit_log_line(&state_root, &line);
    }

    let address = outcome.map_err(|err| err.to_string())?;
    Ok(format!(
        "{} proposal created at {address}",
        if is_draft { "draft" } else { "signed" }
    ))
}

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    let Some(first) = args.first() else {
        return Ok(cli_help_lines().join("\n"));
    };
    match parse_cli_verb(first) {
        CliVerb::Help => Ok(cli_help_lines().join("\n")),
        CliVerb::Validate => {
            let file = args
                .get(1)
                .ok_or_else(|| "usage: validate <file>".to_string())?;
            cmd_validate(Path::new(file))
        }
        CliVerb::Plan => {
            let file = args.get(1).ok_or_else(|| "usage: plan <file>".to_string())?;
            cmd_plan(Path::new(file))
        }
        CliVerb::Submit => {
            let file = args
                .get(1)
                .ok_or_else(|| "usage: submit <file> [--draft] [--config <path>]".to_string())?;
            let is_draft = args.iter().any(|arg| arg == "--draft");
            let config_path = args
                .iter()
                .position(|arg| arg == "--config")
                .and_then(|pos| args.get(pos + 1))
                .map(PathBuf::from);
            cmd_submit(Path::new(file), is_draft, config_path)
        }
        CliVerb::Unknown => Err(format!(
            "unknown command `{first}`\n\n{}",
            cli_help_lines().join("\n")
        )),
    }
}
