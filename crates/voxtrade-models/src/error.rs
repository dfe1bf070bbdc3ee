use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid exchange selected: {0}")]
    UnknownExchange(String),

    #[error("Invalid product type selected: {0}")]
    UnknownProductType(String),

    #[error("Invalid model selected: {0}")]
    UnknownModel(String),

    #[error("Unsupported audio format: {0}")]
    UnsupportedAudioFormat(String),
}
