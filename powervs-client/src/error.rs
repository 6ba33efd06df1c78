use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("infrastructure config {0:?} not found")]
    NotFound(String),

    #[error("kube error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("no environment variable mapping for service key {0:?}")]
    UnknownServiceKey(String),

    #[error("failed to write environment variable {name:?}: {reason}")]
    EnvWrite { name: String, reason: String },
}
