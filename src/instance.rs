use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Host name of this process, resolved once at startup so every response
/// reports the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceId(Arc<str>);

impl InstanceId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::from(name.into()))
    }

    // [library] hostname crate - same lookup the OS `hostname` command performs
    pub fn from_host() -> Self {
        match hostname::get() {
            Ok(name) => Self::new(name.to_string_lossy().into_owned()),
            Err(e) => {
                warn!("Could not resolve host name: {}", e);
                Self::new("unknown")
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_name_is_not_empty() {
        assert!(!InstanceId::from_host().as_str().is_empty());
    }

    #[test]
    fn test_clones_share_value() {
        let id = InstanceId::new("api-1");
        assert_eq!(id.clone(), id);
        assert_eq!(id.to_string(), "api-1");
    }
}
