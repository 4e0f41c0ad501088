pub type SidleResult<T> = Result<T, SidleError>;

#[derive(thiserror::Error, Debug)]
pub enum SidleError {
    #[error("config error: {0}")]
    Config(String),

    #[error("asset error: {0}")]
    Asset(String),

    #[error("discovery error: {0}")]
    Discovery(String),

    #[error("scheduler fault: {0}")]
    Scheduler(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SidleError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    pub fn scheduler(msg: impl Into<String>) -> Self {
        Self::Scheduler(msg.into())
    }
}
