pub mod assembly;
pub mod eligibility;
pub mod form;
pub mod slots;
pub mod submit;

pub use assembly::{assemble, AssemblyError, CanonicalInstruction};
pub use eligibility::allowed_types;
pub use form::{validate_form, ProposalForm};
pub use slots::{Slot, SlotError, SlotStore, SlotUpdate};
pub use submit::{
    CreateProposalRequest, GatewayError, GovernanceGateway, ProposalComposer, SubmissionController,
    SubmitError,
};
