use crate::governance::{GovernanceAccount, GovernanceKind};
use crate::instructions::{post_program_governance_types, registered_types, InstructionType};

/// Instruction types selectable at `index` under the resolved authority.
///
/// The first slot determines the authority, so it is never restricted. Later
/// slots narrow to the post-program-governance allow-list once the authority
/// governs an upgradeable program. The filter never mutates state; callers
/// prompt for re-selection when a slot's current type falls outside the set.
pub fn allowed_types(index: usize, authority: Option<&GovernanceAccount>) -> Vec<InstructionType> {
    if index == 0 {
        return registered_types().to_vec();
    }
    match authority.map(|account| account.kind) {
        Some(GovernanceKind::Program) => post_program_governance_types().to_vec(),
        _ => registered_types().to_vec(),
    }
}
