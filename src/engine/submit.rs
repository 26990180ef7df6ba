use crate::engine::assembly::{assemble, AssemblyError, CanonicalInstruction};
use crate::engine::form::{validate_form, ProposalForm};
use crate::engine::slots::SlotStore;
use crate::governance::{GovernanceAccount, Pubkey};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Request(String),
    #[error("gateway rejected the call: {0}")]
    Api(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    AlreadyInProgress,
    #[error("proposal validation failed")]
    ValidationFailed {
        field_errors: BTreeMap<String, String>,
    },
    #[error("no governance authority selected")]
    NoAuthoritySelected,
    #[error("instruction resolution failed for slot {index}: {reason}")]
    InstructionResolution { index: usize, reason: String },
    #[error("instruction assembly failed: {0}")]
    Assembly(#[from] AssemblyError),
    #[error("downstream submission failed: {0}")]
    Downstream(#[from] GatewayError),
}

/// Everything the downstream creation collaborator needs for one proposal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalRequest {
    pub title: String,
    pub description: String,
    pub governance: GovernanceAccount,
    pub instructions: Vec<CanonicalInstruction>,
    pub vote_by_council: bool,
    pub is_draft: bool,
}

/// Downstream governance collaborators: authority refresh and proposal
/// creation. Calls are blocking and issued from the single control thread.
pub trait GovernanceGateway {
    fn fetch_governance(&self, pubkey: &Pubkey) -> Result<GovernanceAccount, GatewayError>;
    fn create_proposal(&self, request: &CreateProposalRequest) -> Result<Pubkey, GatewayError>;
}

/// Two busy flags, one per submission mode, so each trigger can show its own
/// progress. Callers treat them as mutually exclusive; `finish` clears both
/// unconditionally so no failure path can leave the form permanently busy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionController {
    loading_draft: bool,
    loading_signed: bool,
}

impl SubmissionController {
    pub fn begin(&mut self, is_draft: bool) -> Result<(), SubmitError> {
        if self.loading_draft || self.loading_signed {
            return Err(SubmitError::AlreadyInProgress);
        }
        if is_draft {
            self.loading_draft = true;
        } else {
            self.loading_signed = true;
        }
        Ok(())
    }

    pub fn finish(&mut self) {
        self.loading_draft = false;
        self.loading_signed = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading_draft || self.loading_signed
    }

    pub fn is_loading_draft(&self) -> bool {
        self.loading_draft
    }

    pub fn is_loading_signed(&self) -> bool {
        self.loading_signed
    }
}

/// The assembly and validation engine: owns the form, the slot store, and
/// the busy-flag guard, and drives one submission attempt end to end.
#[derive(Debug, Default)]
pub struct ProposalComposer {
    pub form: ProposalForm,
    pub slots: SlotStore,
    controller: SubmissionController,
}

impl ProposalComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    /// Runs one submission attempt: guard, validate, resolve slots in order,
    /// flatten, refresh the authority, delegate to the gateway. The busy
    /// flags are cleared on every exit path.
    pub fn submit(
        &mut self,
        gateway: &dyn GovernanceGateway,
        is_draft: bool,
    ) -> Result<Pubkey, SubmitError> {
        self.controller.begin(is_draft)?;
        let outcome = self.submit_inner(gateway, is_draft);
        self.controller.finish();
        outcome
    }

    fn submit_inner(
        &self,
        gateway: &dyn GovernanceGateway,
        is_draft: bool,
    ) -> Result<Pubkey, SubmitError> {
        let field_errors = validate_form(&self.form);

        // Slots without an attached editor are skipped, not failed; a slot
        // may legitimately sit in the "choose a type" state. Resolution runs
        // sequentially in slot order, and a resolver error aborts the whole
        // attempt.
        let mut results = Vec::new();
        for (index, slot) in self.slots.slots().iter().enumerate() {
            let Some(resolver) = &slot.resolver else {
                continue;
            };
            let result = resolver
                .resolve()
                .map_err(|err| SubmitError::InstructionResolution {
                    index,
                    reason: err.to_string(),
                })?;
            results.push(result);
        }

        // All-or-nothing: no downstream call happens unless the form and
        // every resolved instruction are valid.
        if !field_errors.is_empty() || results.iter().any(|result| !result.is_valid) {
            return Err(SubmitError::ValidationFailed { field_errors });
        }

        let authority = self
            .slots
            .resolved_authority()
            .ok_or(SubmitError::NoAuthoritySelected)?;
        let instructions = assemble(&results, authority)?;

        // Re-fetch right before creation so the proposal count and config
        // reflect current on-chain state, not the value cached at resolve
        // time.
        let governance = gateway.fetch_governance(&authority.pubkey)?;
        let request = CreateProposalRequest {
            title: self.form.title.clone(),
            description: self.form.description.clone(),
            governance,
            instructions,
            vote_by_council: self.form.vote_by_council,
            is_draft,
        };
        let address = gateway.create_proposal(&request)?;
        Ok(address)
    }
}
