use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Render surface lost: {0}")]
    SurfaceLost(String),

    #[error("Invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot {action} while {from}")]
    InvalidTransition { from: String, action: &'static str },
}

impl SimError {
    /// Whether the driver may keep scheduling after this error
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimError::SurfaceLost(_) => false,
            SimError::InvalidTransition { .. } => true,
            SimError::InvalidConfig { .. } => false,
            SimError::ConfigParse(_) => false,
            SimError::Io(_) => false,
        }
    }

    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidConfig { field, reason: reason.into() }
    }
}

impl From<serde_yaml::Error> for SimError {
    fn from(err: serde_yaml::Error) -> Self {
        SimError::ConfigParse(err.to_string())
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SimError::invalid_config("arena.width", "must be positive");
        assert_eq!(err.to_string(), "Invalid config `arena.width`: must be positive");

        let err = SimError::InvalidTransition { from: "RUNNING".into(), action: "continue" };
        assert_eq!(err.to_string(), "Cannot continue while RUNNING");
    }

    #[test]
    fn test_recoverability() {
        assert!(!SimError::SurfaceLost("context gone".into()).is_recoverable());
        assert!(SimError::InvalidTransition { from: "PAUSED".into(), action: "tick" }
            .is_recoverable());
    }

    #[test]
    fn test_json_error_converts() {
        let err: SimError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, SimError::ConfigParse(_)));
    }
}
