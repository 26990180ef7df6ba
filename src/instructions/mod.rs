use serde::{Deserialize, Serialize};

pub mod encoding;
pub mod resolver;
pub mod result;

pub use encoding::{
    instruction_from_base64, instruction_to_base64, AccountMeta, EncodedPayload, EncodingError,
    InstructionData,
};
pub use resolver::{InstructionResolver, ResolveError, StaticResolver};
pub use result::{InstructionResult, ResultPatch};

#[derive(Debug, thiserror::Error)]
pub enum InstructionTypeError {
    #[error("unknown instruction type `{0}`")]
    Unknown(String),
}

/// Registered instruction kinds a slot may select. The engine treats every
/// kind identically; the kind only matters for eligibility filtering and for
/// picking the editor that produces the slot's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionType {
    Transfer,
    Mint,
    ProgramUpgrade,
    Base64,
    CreateAssociatedTokenAccount,
    CloseTokenAccount,
    RealmConfig,
    Grant,
    Clawback,
    None,
}

impl InstructionType {
    pub fn as_str(self) -> &'static str {
        match self {
            InstructionType::Transfer => "transfer",
            InstructionType::Mint => "mint",
            InstructionType::ProgramUpgrade => "program_upgrade",
            InstructionType::Base64 => "base64",
            InstructionType::CreateAssociatedTokenAccount => "create_associated_token_account",
            InstructionType::CloseTokenAccount => "close_token_account",
            InstructionType::RealmConfig => "realm_config",
            InstructionType::Grant => "grant",
            InstructionType::Clawback => "clawback",
            InstructionType::None => "none",
        }
    }
}

impl std::fmt::Display for InstructionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for InstructionType {
    type Error = InstructionTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "transfer" => Ok(Self::Transfer),
            "mint" => Ok(Self::Mint),
            "program_upgrade" => Ok(Self::ProgramUpgrade),
            "base64" => Ok(Self::Base64),
            "create_associated_token_account" => Ok(Self::CreateAssociatedTokenAccount),
            "close_token_account" => Ok(Self::CloseTokenAccount),
            "realm_config" => Ok(Self::RealmConfig),
            "grant" => Ok(Self::Grant),
            "clawback" => Ok(Self::Clawback),
            "none" => Ok(Self::None),
            other => Err(InstructionTypeError::Unknown(other.to_string())),
        }
    }
}

/// The full registry, in selection order.
pub fn registered_types() -> &'static [InstructionType] {
    &[
        InstructionType::Transfer,
        InstructionType::Mint,
        InstructionType::ProgramUpgrade,
        InstructionType::Base64,
        InstructionType::CreateAssociatedTokenAccount,
        InstructionType::CloseTokenAccount,
        InstructionType::RealmConfig,
        InstructionType::Grant,
        InstructionType::Clawback,
        InstructionType::None,
    ]
}

/// Once the resolved authority governs an upgradeable program, only this
/// narrow set remains selectable for slots after the first.
pub fn post_program_governance_types() -> &'static [InstructionType] {
    &[InstructionType::Base64]
}
