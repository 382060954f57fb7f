mod generator;
mod retriever;
mod store;

pub use generator::ITextGenerator;
pub use retriever::ICatalogRetriever;
pub use store::ISessionStore;
