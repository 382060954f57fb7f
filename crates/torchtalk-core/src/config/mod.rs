pub mod defaults;
mod engine_config;
mod vocabulary;

pub use engine_config::EngineConfig;
pub use vocabulary::Vocabulary;
