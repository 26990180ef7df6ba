use crate::shared::serde_ext::parse_via_string;
use serde::{Deserialize, Deserializer, Serialize};

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Converts a hold-up expressed in days into the on-chain seconds unit.
pub fn days_to_secs(days: u32) -> i64 {
    i64::from(days) * SECONDS_PER_DAY
}

#[derive(Debug, thiserror::Error)]
pub enum PubkeyError {
    #[error("pubkey `{0}` is not valid base58")]
    Base58(String),
    #[error("pubkey `{raw}` decodes to {len} bytes; expected 32")]
    Length { raw: String, len: usize },
}

/// Base58-encoded 32-byte account address. Validated on parse, stored as the
/// original string so round-trips preserve the canonical encoding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Pubkey(String);

impl Pubkey {
    pub fn parse(raw: &str) -> Result<Self, PubkeyError> {
        let decoded = bs58::decode(raw)
            .into_vec()
            .map_err(|_| PubkeyError::Base58(raw.to_string()))?;
        if decoded.len() != 32 {
            return Err(PubkeyError::Length {
                raw: raw.to_string(),
                len: decoded.len(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Pubkey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<&str> for Pubkey {
    type Error = PubkeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl<'de> Deserialize<'de> for Pubkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse_via_string(deserializer, "pubkey", |raw| {
            Pubkey::parse(raw).map_err(|err| err.to_string())
        })
    }
}

/// Kind of the governing authority. V1/V2 program-account variants of the
/// same bucket upstream collapse to a single kind here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernanceKind {
    Program,
    Token,
    Mint,
    Generic,
}

impl GovernanceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GovernanceKind::Program => "program",
            GovernanceKind::Token => "token",
            GovernanceKind::Mint => "mint",
            GovernanceKind::Generic => "generic",
        }
    }
}

impl std::fmt::Display for GovernanceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceConfig {
    /// Minimum delay in seconds before an approved instruction may execute.
    pub min_instruction_hold_up_time: i64,
}

/// The on-chain authority under whose permission proposal instructions run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceAccount {
    pub pubkey: Pubkey,
    pub kind: GovernanceKind,
    pub config: GovernanceConfig,
    #[serde(default)]
    pub proposal_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pubkey_accepts_known_system_addresses() {
        let system = Pubkey::parse("11111111111111111111111111111111").expect("system program");
        assert_eq!(system.as_str(), "11111111111111111111111111111111");

        let token =
            Pubkey::parse("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA").expect("token program");
        assert_eq!(token.to_string(), "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
    }

    #[test]
    fn pubkey_rejects_bad_encodings() {
        let err = Pubkey::parse("not-base58-0OIl").expect_err("invalid alphabet");
        assert!(err.to_string().contains("not valid base58"));

        let err = Pubkey::parse("abc").expect_err("too short");
        assert!(err.to_string().contains("expected 32"));
    }

    #[test]
    fn pubkey_deserialize_validates() {
        let ok: Pubkey =
            serde_json::from_str("\"11111111111111111111111111111111\"").expect("valid pubkey");
        assert_eq!(ok.as_str(), "11111111111111111111111111111111");

        let err = serde_json::from_str::<Pubkey>("\"abc\"").expect_err("short pubkey");
        assert!(err.to_string().contains("invalid pubkey"));
    }

    #[test]
    fn day_conversion_uses_whole_days() {
        assert_eq!(days_to_secs(0), 0);
        assert_eq!(days_to_secs(2), 172_800);
    }

    #[test]
    fn governance_account_round_trips_camel_case() {
        let raw = r#"{
            "pubkey": "11111111111111111111111111111111",
            "kind": "program",
            "config": { "minInstructionHoldUpTime": 300 },
            "proposalCount": 7
        }"#;
        let account: GovernanceAccount = serde_json::from_str(raw).expect("parse account");
        assert_eq!(account.kind, GovernanceKind::Program);
        assert_eq!(account.config.min_instruction_hold_up_time, 300);
        assert_eq!(account.proposal_count, 7);
    }
}
