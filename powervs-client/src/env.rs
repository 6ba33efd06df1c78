use std::env;

use crate::{Error, Result};

/// Process environment access behind a seam so tests can run against an
/// in-memory map instead of mutating real process state.
pub trait EnvStore {
    /// Writes a variable. A write is immediately visible to `get` on the
    /// same store.
    fn set(&mut self, name: &str, value: &str) -> Result<()>;

    /// Reads a variable, `None` if unset.
    fn get(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        validate_binding(name, value)?;
        // SAFETY: environment mutation is process-wide and unsynchronized.
        // The export path runs single-threaded during client construction,
        // before anything reads these variables concurrently.
        unsafe { env::set_var(name, value) };
        Ok(())
    }

    fn get(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

// `std::env::set_var` panics on these inputs instead of returning an error,
// so they are checked up front and surfaced as a write failure.
fn validate_binding(name: &str, value: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains('=') {
        "name contains '='"
    } else if name.contains('\0') {
        "name contains a NUL byte"
    } else if value.contains('\0') {
        "value contains a NUL byte"
    } else {
        return Ok(());
    };
    Err(Error::EnvWrite {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

/// Writes a single scalar configuration value, e.g. the target region.
pub fn set_environment_variable<E: EnvStore>(env: &mut E, name: &str, value: &str) -> Result<()> {
    env.set(name, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_env_read_after_write() {
        let mut env = ProcessEnv;
        set_environment_variable(&mut env, "IBMCLOUD_REGION", "test-region").expect("set region");
        assert_eq!(env.get("IBMCLOUD_REGION").as_deref(), Some("test-region"));
    }

    #[test]
    fn test_get_unset_variable() {
        let env = ProcessEnv;
        assert_eq!(env.get("POWERVS_CLIENT_UNSET_VARIABLE"), None);
    }

    #[test]
    fn test_set_rejects_invalid_names() {
        let mut env = ProcessEnv;
        for (name, value) in [("", "v"), ("A=B", "v"), ("A\0B", "v"), ("A", "v\0")] {
            let err = env.set(name, value).expect_err("invalid binding");
            assert!(matches!(err, Error::EnvWrite { .. }), "got {err:?}");
        }
    }
}
