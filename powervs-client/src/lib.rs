mod endpoints;
mod env;
mod error;

pub use endpoints::{
    ENDPOINT_KEYS, InfrastructureSource, REGION_ENV_NAME, ResolvedEndpoints, SERVICE_KEY_IAM,
    SERVICE_KEY_POWER, SERVICE_KEY_RESOURCE_CONTROLLER, env_name_for_key, export_endpoints,
    prepare_environment, resolve_endpoints,
};
pub use env::{EnvStore, ProcessEnv, set_environment_variable};
pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
