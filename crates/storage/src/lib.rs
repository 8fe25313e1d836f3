#![forbid(unsafe_code)]

pub mod repository;

pub use repository::{
    InMemoryRepository, ResultRepository, ResultRow, ResultRowId, StorageError,
};
