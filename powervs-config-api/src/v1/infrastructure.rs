use kube::CustomResource;
use kube::KubeSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Platform type under which PowerVS service endpoints are published.
pub const PLATFORM_TYPE_POWERVS: &str = "PowerVS";

/// Cluster-wide infrastructure configuration singleton
/// (`config.openshift.io/v1`, named "cluster").
///
/// This object is owned by the cluster config operator; we model only the
/// fields the endpoint resolver reads and never write it back.
#[derive(
    CustomResource, KubeSchema, Serialize, Deserialize, Default, PartialEq, Eq, Clone, Debug,
)]
#[kube(
    group = "config.openshift.io",
    version = "v1",
    kind = "Infrastructure",
    status = "InfrastructureStatus",
    derive = "Default",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureSpec {}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_status: Option<PlatformStatus>,
}

/// Union of platform-specific status blocks; only the member matching
/// `type` is populated.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStatus {
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(rename = "powervs", default, skip_serializing_if = "Option::is_none")]
    pub power_vs: Option<PowerVSPlatformStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PowerVSPlatformStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,

    /// Custom base URLs overriding the SDK defaults, keyed by service name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_endpoints: Vec<PowerVSServiceEndpoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PowerVSServiceEndpoint {
    pub name: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_deserializes_powervs_endpoints() {
        let status: InfrastructureStatus = serde_json::from_value(serde_json::json!({
            "platform": "PowerVS",
            "platformStatus": {
                "type": "PowerVS",
                "powervs": {
                    "region": "osa",
                    "zone": "osa21",
                    "resourceGroup": "Default",
                    "serviceEndpoints": [
                        { "name": "IAM", "url": "https://iam.test.cloud.ibm.com" }
                    ]
                }
            }
        }))
        .expect("status");

        let platform_status = status.platform_status.expect("platform status");
        assert_eq!(platform_status.type_, PLATFORM_TYPE_POWERVS);
        let powervs = platform_status.power_vs.expect("powervs status");
        assert_eq!(powervs.resource_group.as_deref(), Some("Default"));
        assert_eq!(
            powervs.service_endpoints,
            vec![PowerVSServiceEndpoint {
                name: "IAM".into(),
                url: "https://iam.test.cloud.ibm.com".into(),
            }]
        );
    }

    #[test]
    fn test_status_tolerates_missing_platform_status() {
        let status: InfrastructureStatus =
            serde_json::from_value(serde_json::json!({ "platform": "None" })).expect("status");
        assert!(status.platform_status.is_none());
    }

    #[test]
    fn test_status_tolerates_foreign_platform() {
        let status: InfrastructureStatus = serde_json::from_value(serde_json::json!({
            "platform": "AWS",
            "platformStatus": { "type": "AWS" }
        }))
        .expect("status");

        let platform_status = status.platform_status.expect("platform status");
        assert_ne!(platform_status.type_, PLATFORM_TYPE_POWERVS);
        assert!(platform_status.power_vs.is_none());
    }
}
