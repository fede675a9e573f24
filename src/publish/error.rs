use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to build module archive: {0}")]
    Archive(#[from] std::io::Error),

    #[error("failed to reach registry: {0}")]
    Network(#[from] reqwest::Error),

    #[error("registry rejected upload (status {status}): {body}")]
    Rejected { status: u16, body: String },
}
