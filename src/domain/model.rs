use serde::{Deserialize, Serialize};

/// Service request form sent to the orchestrator. Field names are part of
/// the wire contract and serialize as camelCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestForm {
    pub requester_system: RequesterSystem,
    pub requested_service: RequestedService,
    pub orchestration_flags: OrchestrationFlags,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequesterSystem {
    pub system_name: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedService {
    pub service_definition: String,
    pub interfaces: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationFlags {
    pub override_store: bool,
    pub matchmaking: bool,
}

/// Orchestrator response. The matched entries arrive wrapped in a
/// `response` field; only the first entry is ever consulted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrchestrationResponse {
    #[serde(default)]
    pub response: Vec<OrchestrationEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrchestrationEntry {
    pub provider: ProviderSystem,
    #[serde(rename = "serviceURI")]
    pub service_uri: Option<String>,
}

/// Provider identity as reported by the orchestrator. The port may be zero
/// or negative when the provider listens on the default HTTP port.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderSystem {
    pub address: String,
    pub port: i32,
}

/// SenML readout returned by the provider: base name/time/unit plus an
/// entry list. Only `e[0].v` is consumed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SenmlReadout {
    pub bn: Option<String>,
    pub bt: Option<f64>,
    pub bu: Option<String>,
    pub ver: Option<i32>,
    #[serde(default)]
    pub e: Vec<MeasurementEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MeasurementEntry {
    pub n: Option<String>,
    pub t: Option<f64>,
    pub v: f64,
}
