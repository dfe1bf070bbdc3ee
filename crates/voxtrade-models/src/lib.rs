pub mod audio;
pub mod config;
pub mod error;
pub mod market;
pub mod order;
pub mod stage;

pub use audio::{AudioFormat, Transcription, TranscriptionModel};
pub use config::{
    BrokerConfig, GrammarMode, ServerConfig, TranscriptionConfig, VoiceConfig, VoxtradeConfig,
};
pub use error::ModelError;
pub use market::{Action, Exchange, PriceType, ProductType};
pub use order::{OrderParams, OrderRequest};
pub use stage::Stage;
