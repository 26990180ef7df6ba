use super::result::InstructionResult;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("editor failed to produce an instruction: {0}")]
    Editor(String),
}

/// On-demand query the engine issues against each slot's editor at submit
/// time. Implementations are expected to return their latest state, not to
/// start new work.
pub trait InstructionResolver: std::fmt::Debug {
    fn resolve(&self) -> Result<InstructionResult, ResolveError>;
}

/// Resolver wrapping a prebuilt result. Used by the CLI, which loads fully
/// encoded instructions from a definition file, and by tests.
#[derive(Debug, Clone)]
pub struct StaticResolver {
    result: InstructionResult,
}

impl StaticResolver {
    pub fn new(result: InstructionResult) -> Self {
        Self { result }
    }
}

impl InstructionResolver for StaticResolver {
    fn resolve(&self) -> Result<InstructionResult, ResolveError> {
        Ok(self.result.clone())
    }
}
