use alloc::string::String;

use thiserror::Error;

/// Why an ingested item was not applied.
///
/// Returned by an item validator (see
/// [`crate::PoolingScrollContainer::set_item_validator`]). Rejected items are skipped, logged and
/// reported through [`crate::ContainerEvent::ItemSkipped`]; the rest of the batch is applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("item rejected: {0}")]
    Rejected(String),
    #[error("item is already present")]
    Duplicate,
}

impl IngestError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }
}
