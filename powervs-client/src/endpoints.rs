use std::collections::BTreeMap;
use std::future::Future;

use kube::Api;
use tracing::{debug, info};

use powervs_config_api::INFRASTRUCTURE_NAME;
use powervs_config_api::v1::{Infrastructure, PLATFORM_TYPE_POWERVS};

use crate::env::{EnvStore, set_environment_variable};
use crate::{Error, Result};

pub const SERVICE_KEY_IAM: &str = "IAM";
pub const SERVICE_KEY_RESOURCE_CONTROLLER: &str = "ResourceController";
pub const SERVICE_KEY_POWER: &str = "Power";

/// Service identifiers this client understands, in export order.
pub const ENDPOINT_KEYS: [&str; 3] = [
    SERVICE_KEY_IAM,
    SERVICE_KEY_RESOURCE_CONTROLLER,
    SERVICE_KEY_POWER,
];

/// Environment variable the IBM Cloud SDK reads for the target region.
pub const REGION_ENV_NAME: &str = "IBMCLOUD_REGION";

// Single source of truth for the variable names the SDK reads. A lookup
// miss means version skew between this client and the configuration it was
// handed, not a recoverable condition.
const ENDPOINT_KEY_TO_ENV_NAME: [(&str, &str); 3] = [
    (SERVICE_KEY_IAM, "IBMCLOUD_IAM_API_ENDPOINT"),
    (
        SERVICE_KEY_RESOURCE_CONTROLLER,
        "IBMCLOUD_RESOURCE_CONTROLLER_API_ENDPOINT",
    ),
    (SERVICE_KEY_POWER, "IBMCLOUD_POWER_API_ENDPOINT"),
];

/// Endpoint overrides keyed by canonical service identifier, built fresh on
/// every resolution.
pub type ResolvedEndpoints = BTreeMap<&'static str, String>;

pub fn env_name_for_key(key: &str) -> Result<&'static str> {
    ENDPOINT_KEY_TO_ENV_NAME
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, env_name)| *env_name)
        .ok_or_else(|| Error::UnknownServiceKey(key.to_string()))
}

fn canonical_key(name: &str) -> Option<&'static str> {
    ENDPOINT_KEYS.iter().find(|k| **k == name).copied()
}

/// Read access to the Infrastructure singleton. `Api<Infrastructure>` is
/// the production implementation; tests substitute an in-memory source.
pub trait InfrastructureSource {
    fn fetch(&self, name: &str) -> impl Future<Output = Result<Infrastructure>> + Send;
}

impl InfrastructureSource for Api<Infrastructure> {
    async fn fetch(&self, name: &str) -> Result<Infrastructure> {
        match self.get(name).await {
            Ok(infra) => Ok(infra),
            Err(kube::Error::Api(ae)) if ae.code == 404 => Err(Error::NotFound(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

/// Resolves custom service-endpoint overrides from the cluster-wide
/// Infrastructure config.
///
/// A missing status, a non-PowerVS platform, or an absent PowerVS block all
/// mean "no overrides" and yield an empty map. Entries with unrecognized
/// names are skipped so newer configuration may list services this version
/// does not understand; duplicate names resolve to the last entry seen.
///
/// Resolution never exports: callers inspect the returned map and apply it
/// with [`export_endpoints`].
pub async fn resolve_endpoints<S: InfrastructureSource>(source: &S) -> Result<ResolvedEndpoints> {
    let infra = source.fetch(INFRASTRUCTURE_NAME).await?;

    let mut resolved = ResolvedEndpoints::new();
    let Some(status) = infra.status else {
        debug!("infrastructure config has no status");
        return Ok(resolved);
    };
    let Some(platform_status) = status.platform_status else {
        debug!("infrastructure config has no platform status");
        return Ok(resolved);
    };
    if platform_status.type_ != PLATFORM_TYPE_POWERVS {
        debug!(
            "platform {} carries no PowerVS service endpoints",
            platform_status.type_
        );
        return Ok(resolved);
    }
    let Some(powervs) = platform_status.power_vs else {
        return Ok(resolved);
    };

    for endpoint in powervs.service_endpoints {
        match canonical_key(&endpoint.name) {
            Some(key) => {
                resolved.insert(key, endpoint.url);
            }
            None => debug!("skipping unrecognized service endpoint {:?}", endpoint.name),
        }
    }

    Ok(resolved)
}

/// Writes each resolved endpoint into the environment variable the SDK
/// expects, following the given key order. Fails fast on the first
/// translation or write error; earlier bindings stay applied since each is
/// independently meaningful to the SDK.
pub fn export_endpoints<E: EnvStore>(
    env: &mut E,
    endpoints: &ResolvedEndpoints,
    keys: &[&str],
) -> Result<()> {
    for &key in keys {
        let Some(url) = endpoints.get(key) else {
            continue;
        };
        let env_name = env_name_for_key(key)?;
        env.set(env_name, url)?;
    }
    Ok(())
}

/// One-shot environment preparation ahead of SDK client construction: the
/// region binding first, then every resolved endpoint override. Returns the
/// resolved map for inspection.
pub async fn prepare_environment<S, E>(
    source: &S,
    env: &mut E,
    region: &str,
) -> Result<ResolvedEndpoints>
where
    S: InfrastructureSource,
    E: EnvStore,
{
    set_environment_variable(env, REGION_ENV_NAME, region)?;
    let resolved = resolve_endpoints(source).await?;
    export_endpoints(env, &resolved, &ENDPOINT_KEYS)?;
    info!(
        "applied {} custom service endpoint override(s)",
        resolved.len()
    );
    Ok(resolved)
}
