pub mod v1;

/// Well-known name of the cluster-scoped Infrastructure singleton.
pub const INFRASTRUCTURE_NAME: &str = "cluster";
