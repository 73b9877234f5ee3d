use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Feed error: {0}")]
    Feed(#[from] shiftdesk_common::CommonError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("No shift selected")]
    NothingSelected,

    #[error("TUI error: {0}")]
    Tui(String),

    #[error("{0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
