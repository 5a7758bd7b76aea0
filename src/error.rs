use thiserror::Error;

/// Errors surfaced by the context selector and pool loader.
///
/// Every variant is a deterministic precondition violation; nothing here
/// is retried inside the core.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("context pool not loaded")]
    PoolNotLoaded,
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("no items available for {0}")]
    NoItemsAvailable(String),
    #[error("requested {requested} distinct items from {category} but only {available} exist")]
    InsufficientItems {
        category: String,
        requested: usize,
        available: usize,
    },
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),
    #[error("malformed context dataset: {0}")]
    MalformedDataset(#[from] serde_json::Error),
}
