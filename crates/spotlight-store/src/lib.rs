pub mod client;
pub mod error;
pub mod types;

pub use client::EventStoreClient;
pub use error::StoreError;
pub use types::EventRow;
