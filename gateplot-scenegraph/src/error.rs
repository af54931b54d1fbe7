use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneGraphError {
    #[error("Invalid {mark} mark `{name}`: {reason}")]
    InvalidMark {
        mark: &'static str,
        name: String,
        reason: String,
    },
}

impl SceneGraphError {
    pub(crate) fn invalid(mark: &'static str, name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidMark {
            mark,
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
