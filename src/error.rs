use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid tracker config: `{field}` = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },

    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
}
