use thiserror::Error;

#[derive(Error, Debug)]
pub enum V2exError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Could not parse page: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl V2exError {
    /// Network failure, timeout or non-success status.
    pub fn is_transport(&self) -> bool {
        matches!(self, V2exError::Transport(_))
    }

    /// Text for an inline error in the UI. Transport failures get a hint
    /// pointing at the `[network]` settings.
    pub fn display_message(&self) -> String {
        if self.is_transport() {
            format!("{} (check the connection or the proxy setting)", self)
        } else {
            self.to_string()
        }
    }
}

pub type Result<T> = std::result::Result<T, V2exError>;
