use crate::governance::{GovernanceAccount, Pubkey};
use crate::instructions::{InstructionResolver, InstructionResult, InstructionType, ResultPatch};

#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    #[error("slot index {index} is out of range (store holds {len} slots)")]
    InvalidIndex { index: usize, len: usize },
}

/// One row in the proposal composer. Identity is positional; removing a slot
/// shifts every later slot down by one.
#[derive(Debug, Default)]
pub struct Slot {
    pub instruction_type: Option<InstructionType>,
    pub governed_account: Option<GovernanceAccount>,
    pub result: Option<InstructionResult>,
    pub resolver: Option<Box<dyn InstructionResolver>>,
}

/// Partial update an editor reports into its slot. Only the supplied parts
/// are merged; the `result` patch itself merges field by field.
#[derive(Debug, Default)]
pub struct SlotUpdate {
    pub governed_account: Option<GovernanceAccount>,
    pub resolver: Option<Box<dyn InstructionResolver>>,
    pub result: Option<ResultPatch>,
}

/// Ordered slot collection plus the authority derivation that runs after
/// every mutation. The resolved authority is the governed account of the
/// lowest-indexed slot that has one; when slot 0's account key changes, all
/// later slots are discarded because their eligibility was computed for a
/// different authority.
#[derive(Debug)]
pub struct SlotStore {
    slots: Vec<Slot>,
    resolved_authority: Option<GovernanceAccount>,
    slot0_authority_key: Option<Pubkey>,
}

impl Default for SlotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotStore {
    /// Starts with a single unset slot, matching the composer's initial row.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot::default()],
            resolved_authority: None,
            slot0_authority_key: None,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn resolved_authority(&self) -> Option<&GovernanceAccount> {
        self.resolved_authority.as_ref()
    }

    /// Appends an unset slot. Always succeeds.
    pub fn add_slot(&mut self) {
        self.slots.push(Slot::default());
        self.refresh();
    }

    /// Removes the slot at `index`; later slots shift down. Out-of-range
    /// indices are a silent no-op. Removing index 0 promotes the next slot
    /// to authority position.
    pub fn remove_slot(&mut self, index: usize) {
        if index < self.slots.len() {
            self.slots.remove(index);
        }
        self.refresh();
    }

    /// Replaces the slot's selected type. Any previously attached result and
    /// resolver belong to the old editor and are cleared; the new editor
    /// reports fresh state through `update_slot`.
    pub fn set_slot_type(
        &mut self,
        index: usize,
        instruction_type: InstructionType,
    ) -> Result<(), SlotError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SlotError::InvalidIndex { index, len })?;
        slot.instruction_type = Some(instruction_type);
        slot.result = None;
        slot.resolver = None;
        self.refresh();
        Ok(())
    }

    /// Shallow-merges an editor update into the slot. Called repeatedly with
    /// partial state as the user edits, not only once at the end.
    pub fn update_slot(&mut self, index: usize, update: SlotUpdate) -> Result<(), SlotError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SlotError::InvalidIndex { index, len })?;
        if let Some(account) = update.governed_account {
            slot.governed_account = Some(account);
        }
        if let Some(resolver) = update.resolver {
            slot.resolver = Some(resolver);
        }
        if let Some(patch) = update.result {
            let result = slot.result.get_or_insert_with(InstructionResult::default);
            patch.apply_to(result);
        }
        self.refresh();
        Ok(())
    }

    // Runs at the end of every mutation: applies the slot-0 reset rule, then
    // recomputes the resolved authority.
    fn refresh(&mut self) {
        let slot0_key = self
            .slots
            .first()
            .and_then(|slot| slot.governed_account.as_ref())
            .map(|account| account.pubkey.clone());
        if slot0_key != self.slot0_authority_key {
            self.slots.truncate(1);
            self.slot0_authority_key = slot0_key;
        }
        self.resolved_authority = self
            .slots
            .iter()
            .find_map(|slot| slot.governed_account.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governance::{GovernanceConfig, GovernanceKind};
    use crate::instructions::StaticResolver;

    fn account(pubkey: &str, kind: GovernanceKind) -> GovernanceAccount {
        GovernanceAccount {
            pubkey: Pubkey::parse(pubkey).expect("test pubkey"),
            kind,
            config: GovernanceConfig {
                min_instruction_hold_up_time: 100,
            },
            proposal_count: 0,
        }
    }

    fn governed(pubkey: &str) -> SlotUpdate {
        SlotUpdate {
            governed_account: Some(account(pubkey, GovernanceKind::Token)),
            ..SlotUpdate::default()
        }
    }

    const AUTH_A: &str = "So11111111111111111111111111111111111111112";
    const AUTH_B: &str = "SysvarRent111111111111111111111111111111111";

    #[test]
    fn starts_with_one_unset_slot() {
        let store = SlotStore::new();
        assert_eq!(store.len(), 1);
        let slot = store.slot(0).expect("initial slot");
        assert!(slot.instruction_type.is_none());
        assert!(store.resolved_authority().is_none());
    }

    #[test]
    fn add_and_remove_shift_indices() {
        let mut store = SlotStore::new();
        store.add_slot();
        store.add_slot();
        store
            .set_slot_type(2, InstructionType::Mint)
            .expect("set type");

        store.remove_slot(1);
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.slot(1).expect("shifted slot").instruction_type,
            Some(InstructionType::Mint)
        );

        // Out of range removal is a no-op.
        store.remove_slot(9);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn set_slot_type_clears_previous_result_and_resolver() {
        let mut store = SlotStore::new();
        store
            .update_slot(
                0,
                SlotUpdate {
                    resolver: Some(Box::new(StaticResolver::new(InstructionResult::default()))),
                    result: Some(ResultPatch {
                        is_valid: Some(true),
                        ..ResultPatch::default()
                    }),
                    ..SlotUpdate::default()
                },
            )
            .expect("update");

        store
            .set_slot_type(0, InstructionType::Transfer)
            .expect("set type");
        let slot = store.slot(0).expect("slot");
        assert!(slot.result.is_none());
        assert!(slot.resolver.is_none());

        let err = store
            .set_slot_type(5, InstructionType::Mint)
            .expect_err("out of range");
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn update_slot_merges_result_fields_across_calls() {
        let mut store = SlotStore::new();
        store
            .update_slot(
                0,
                SlotUpdate {
                    result: Some(ResultPatch {
                        custom_hold_up_days: Some(2),
                        ..ResultPatch::default()
                    }),
                    ..SlotUpdate::default()
                },
            )
            .expect("first update");
        store
            .update_slot(
                0,
                SlotUpdate {
                    result: Some(ResultPatch {
                        is_valid: Some(true),
                        ..ResultPatch::default()
                    }),
                    ..SlotUpdate::default()
                },
            )
            .expect("second update");

        let result = store.slot(0).expect("slot").result.as_ref().expect("result");
        assert!(result.is_valid);
        assert_eq!(result.custom_hold_up_days, Some(2));
    }

    #[test]
    fn authority_is_taken_from_lowest_indexed_slot_with_account() {
        let mut store = SlotStore::new();
        store.add_slot();
        store.update_slot(1, governed(AUTH_B)).expect("slot 1");
        assert_eq!(
            store.resolved_authority().expect("authority").pubkey.as_str(),
            AUTH_B
        );

        // Setting slot 0 both wins the derivation and, because slot 0's key
        // changed, resets the store to a single slot.
        store.update_slot(0, governed(AUTH_A)).expect("slot 0");
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.resolved_authority().expect("authority").pubkey.as_str(),
            AUTH_A
        );
    }

    #[test]
    fn changing_slot0_authority_discards_later_slots() {
        let mut store = SlotStore::new();
        store.update_slot(0, governed(AUTH_A)).expect("slot 0");
        store.add_slot();
        store.add_slot();
        assert_eq!(store.len(), 3);

        store.update_slot(0, governed(AUTH_B)).expect("authority change");
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.resolved_authority().expect("authority").pubkey.as_str(),
            AUTH_B
        );
    }

    #[test]
    fn same_authority_key_does_not_reset() {
        let mut store = SlotStore::new();
        store.update_slot(0, governed(AUTH_A)).expect("slot 0");
        store.add_slot();

        // Re-reporting the same account (fresh fetch, same key) keeps slots.
        store.update_slot(0, governed(AUTH_A)).expect("same key");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn removing_slot0_promotes_next_slot_and_resets() {
        let mut store = SlotStore::new();
        store.update_slot(0, governed(AUTH_A)).expect("slot 0");
        store.add_slot();
        store.update_slot(1, governed(AUTH_B)).expect("slot 1");
        store.add_slot();
        assert_eq!(store.len(), 3);

        store.remove_slot(0);
        // Promoted slot carries a different authority key, so the reset rule
        // truncates to the new slot 0.
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.resolved_authority().expect("authority").pubkey.as_str(),
            AUTH_B
        );
    }
}
