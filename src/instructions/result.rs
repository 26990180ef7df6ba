use super::encoding::{EncodedPayload, InstructionData};
use crate::governance::Pubkey;
use serde::{Deserialize, Serialize};

/// The contract every instruction editor fulfills for its slot. Editors
/// report partial updates while the user edits; the slot store merges them
/// into this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionResult {
    pub is_valid: bool,
    #[serde(default)]
    pub primary_payload: Option<EncodedPayload>,
    #[serde(default)]
    pub additional_payloads: Vec<EncodedPayload>,
    #[serde(default)]
    pub custom_hold_up_days: Option<u32>,
    #[serde(default)]
    pub chunk_split_by_default: Option<bool>,
    #[serde(default)]
    pub should_split_into_separate_txs: Option<bool>,
    #[serde(default)]
    pub signers: Vec<Pubkey>,
    #[serde(default)]
    pub prerequisite_instructions: Vec<InstructionData>,
}

/// Partial update over [`InstructionResult`]. Only fields carrying a value
/// overwrite the target; everything else is left untouched.
#[derive(Debug, Clone, Default)]
pub struct ResultPatch {
    pub is_valid: Option<bool>,
    pub primary_payload: Option<EncodedPayload>,
    pub additional_payloads: Option<Vec<EncodedPayload>>,
    pub custom_hold_up_days: Option<u32>,
    pub chunk_split_by_default: Option<bool>,
    pub should_split_into_separate_txs: Option<bool>,
    pub signers: Option<Vec<Pubkey>>,
    pub prerequisite_instructions: Option<Vec<InstructionData>>,
}

impl ResultPatch {
    pub fn apply_to(self, target: &mut InstructionResult) {
        if let Some(is_valid) = self.is_valid {
            target.is_valid = is_valid;
        }
        if let Some(payload) = self.primary_payload {
            target.primary_payload = Some(payload);
        }
        if let Some(payloads) = self.additional_payloads {
            target.additional_payloads = payloads;
        }
        if let Some(days) = self.custom_hold_up_days {
            target.custom_hold_up_days = Some(days);
        }
        if let Some(flag) = self.chunk_split_by_default {
            target.chunk_split_by_default = Some(flag);
        }
        if let Some(flag) = self.should_split_into_separate_txs {
            target.should_split_into_separate_txs = Some(flag);
        }
        if let Some(signers) = self.signers {
            target.signers = signers;
        }
        if let Some(prerequisites) = self.prerequisite_instructions {
            target.prerequisite_instructions = prerequisites;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_overwrites_only_supplied_fields() {
        let mut result = InstructionResult {
            is_valid: false,
            primary_payload: Some(EncodedPayload::new("AAAA")),
            custom_hold_up_days: Some(3),
            ..InstructionResult::default()
        };

        ResultPatch {
            is_valid: Some(true),
            additional_payloads: Some(vec![EncodedPayload::new("BBBB")]),
            ..ResultPatch::default()
        }
        .apply_to(&mut result);

        assert!(result.is_valid);
        assert_eq!(result.primary_payload, Some(EncodedPayload::new("AAAA")));
        assert_eq!(result.additional_payloads, vec![EncodedPayload::new("BBBB")]);
        assert_eq!(result.custom_hold_up_days, Some(3));
    }

    #[test]
    fn later_patch_wins_per_field() {
        let mut result = InstructionResult::default();
        ResultPatch {
            primary_payload: Some(EncodedPayload::new("first")),
            ..ResultPatch::default()
        }
        .apply_to(&mut result);
        ResultPatch {
            primary_payload: Some(EncodedPayload::new("second")),
            ..ResultPatch::default()
        }
        .apply_to(&mut result);

        assert_eq!(result.primary_payload, Some(EncodedPayload::new("second")));
    }
}
