use crate::quantity::ResourceList;
use serde::{Deserialize, Serialize};

pub const FEDERATED_RESOURCE_QUOTA_KIND: &str = "FederatedResourceQuota";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Federated resource quota: an overall budget split into per-cluster
/// static assignments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedResourceQuota {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: FederatedResourceQuotaSpec,
    #[serde(default)]
    pub status: FederatedResourceQuotaStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedResourceQuotaSpec {
    /// Total budget shared by all member clusters
    #[serde(default)]
    pub overall: ResourceList,
    /// Fixed sub-budgets; position matters for error addressing
    #[serde(default)]
    pub static_assignments: Vec<StaticClusterAssignment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticClusterAssignment {
    #[serde(default)]
    pub cluster_name: String,
    #[serde(default)]
    pub hard: ResourceList,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedResourceQuotaStatus {
    #[serde(default)]
    pub overall: ResourceList,
    #[serde(default)]
    pub overall_used: ResourceList,
    #[serde(default)]
    pub aggregated_status: Vec<ClusterQuotaStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterQuotaStatus {
    #[serde(default)]
    pub cluster_name: String,
    #[serde(default)]
    pub hard: ResourceList,
    #[serde(default)]
    pub used: ResourceList,
}
