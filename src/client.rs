use crate::engine::submit::{CreateProposalRequest, GatewayError, GovernanceGateway};
use crate::governance::{GovernanceAccount, Pubkey};
use serde::{Deserialize, Serialize};
use serde_json::json;

const DEFAULT_RPC_BASE: &str = "http://127.0.0.1:8899";

/// HTTP gateway to the governance RPC service. The base URL comes from
/// settings; `GOVFORGE_RPC_BASE` overrides it for local testing.
#[derive(Debug, Clone)]
pub struct RpcGateway {
    api_base: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RpcEnvelope<T> {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    data: T,
}

#[derive(Debug, Clone, Deserialize)]
struct GovernanceData {
    governance: GovernanceAccount,
}

#[derive(Debug, Clone, Deserialize)]
struct ProposalData {
    address: Pubkey,
}

impl Default for RpcGateway {
    fn default() -> Self {
        Self::new(DEFAULT_RPC_BASE)
    }
}

impl RpcGateway {
    pub fn new(api_base: &str) -> Self {
        let api_base = std::env::var("GOVFORGE_RPC_BASE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| api_base.to_string());
        Self { api_base }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path)
    }

    fn post_json<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let payload =
            serde_json::to_value(body).map_err(|e| GatewayError::Request(e.to_string()))?;
        let response = ureq::post(&self.endpoint(path))
            .send_json(payload)
            .map_err(|e| GatewayError::Request(e.to_string()))?;
        let envelope: RpcEnvelope<T> = response
            .into_json()
            .map_err(|e| GatewayError::Request(e.to_string()))?;
        if !envelope.ok {
            return Err(GatewayError::Api(
                envelope
                    .error
                    .unwrap_or_else(|| "unknown rpc error".to_string()),
            ));
        }
        Ok(envelope.data)
    }
}

impl GovernanceGateway for RpcGateway {
    fn fetch_governance(&self, pubkey: &Pubkey) -> Result<GovernanceAccount, GatewayError> {
        let data: GovernanceData =
            self.post_json("governance/fetch", &json!({ "pubkey": pubkey }))?;
        Ok(data.governance)
    }

    fn create_proposal(&self, request: &CreateProposalRequest) -> Result<Pubkey, GatewayError> {
        let data: ProposalData = self.post_json("proposal/create", request)?;
        Ok(data.address)
    }
}
