use crate::governance::Pubkey;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("payload is not valid base64: {0}")]
    Base64(String),
    #[error("payload body is not a valid instruction: {0}")]
    Body(String),
}

/// Opaque serialized instruction body as produced by an editor. The engine
/// never interprets it beyond the generic decode step at assembly time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// Decoded instruction body: target program, account list, raw data bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionData {
    pub program_id: Pubkey,
    #[serde(default)]
    pub accounts: Vec<AccountMeta>,
    #[serde(default)]
    pub data: Vec<u8>,
}

pub fn instruction_from_base64(payload: &EncodedPayload) -> Result<InstructionData, EncodingError> {
    let bytes = STANDARD
        .decode(payload.as_str())
        .map_err(|err| EncodingError::Base64(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| EncodingError::Body(err.to_string()))
}

pub fn instruction_to_base64(instruction: &InstructionData) -> Result<EncodedPayload, EncodingError> {
    let body = serde_json::to_vec(instruction).map_err(|err| EncodingError::Body(err.to_string()))?;
    Ok(EncodedPayload(STANDARD.encode(body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_instruction() -> InstructionData {
        InstructionData {
            program_id: Pubkey::parse("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA")
                .expect("token program"),
            accounts: vec![AccountMeta {
                pubkey: Pubkey::parse("11111111111111111111111111111111").expect("system program"),
                is_signer: false,
                is_writable: true,
            }],
            data: vec![3, 0, 0, 0, 42],
        }
    }

    #[test]
    fn encoded_payload_decodes_to_instruction_body() {
        let payload = instruction_to_base64(&sample_instruction()).expect("encode");
        let decoded = instruction_from_base64(&payload).expect("decode");
        assert_eq!(decoded, sample_instruction());
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let err = instruction_from_base64(&EncodedPayload::new("%%%not-base64%%%"))
            .expect_err("bad alphabet");
        assert!(err.to_string().contains("not valid base64"));
    }

    #[test]
    fn non_instruction_body_is_rejected() {
        let payload = EncodedPayload::new(STANDARD.encode(b"{\"foo\": 1}"));
        let err = instruction_from_base64(&payload).expect_err("missing fields");
        assert!(err.to_string().contains("not a valid instruction"));
    }
}
