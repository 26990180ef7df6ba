use crate::governance::{days_to_secs, GovernanceAccount, Pubkey};
use crate::instructions::{
    instruction_from_base64, EncodingError, InstructionData, InstructionResult,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("instruction {position} payload decode failed: {source}")]
    Decode {
        position: usize,
        #[source]
        source: EncodingError,
    },
}

/// One flattened, order-resolved instruction of the proposal body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalInstruction {
    pub data: InstructionData,
    /// Seconds the instruction must wait after approval before execution.
    pub hold_up_time: i64,
    pub prerequisite_instructions: Vec<InstructionData>,
    pub chunk_split_by_default: bool,
    pub signers: Vec<Pubkey>,
    pub should_split_into_separate_txs: Option<bool>,
}

fn hold_up_for(result: &InstructionResult, authority: &GovernanceAccount) -> i64 {
    result
        .custom_hold_up_days
        .map(days_to_secs)
        .unwrap_or(authority.config.min_instruction_hold_up_time)
}

/// Flattens slot results into the canonical instruction list: the additional
/// payloads of every result first, in result order with intra-result order
/// preserved, followed by every present primary payload in result order.
/// Absent primaries are omitted.
pub fn assemble(
    results: &[InstructionResult],
    authority: &GovernanceAccount,
) -> Result<Vec<CanonicalInstruction>, AssemblyError> {
    let mut plan = Vec::new();

    for result in results {
        for payload in &result.additional_payloads {
            let data = instruction_from_base64(payload).map_err(|source| AssemblyError::Decode {
                position: plan.len(),
                source,
            })?;
            plan.push(CanonicalInstruction {
                data,
                hold_up_time: hold_up_for(result, authority),
                prerequisite_instructions: Vec::new(),
                chunk_split_by_default: result.chunk_split_by_default.unwrap_or(false),
                signers: result.signers.clone(),
                should_split_into_separate_txs: result.should_split_into_separate_txs,
            });
        }
    }

    for result in results {
        let Some(payload) = &result.primary_payload else {
            continue;
        };
        let data = instruction_from_base64(payload).map_err(|source| AssemblyError::Decode {
            position: plan.len(),
            source,
        })?;
        plan.push(CanonicalInstruction {
            data,
            hold_up_time: hold_up_for(result, authority),
            prerequisite_instructions: result.prerequisite_instructions.clone(),
            chunk_split_by_default: result.chunk_split_by_default.unwrap_or(false),
            signers: result.signers.clone(),
            should_split_into_separate_txs: result.should_split_into_separate_txs,
        });
    }

    Ok(plan)
}
