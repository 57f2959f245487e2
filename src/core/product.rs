use serde::{Deserialize, Serialize};

/// Identifier a caller assigns to a product when adding it to the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a product on the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductState {
    Raw,
    Processing,
    Finished,
}

/// A product moving through the processing stages
#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub state: ProductState,
    pub stage: u32,
}

impl Product {
    /// Create a new product at stage 0, still raw material
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            state: ProductState::Raw,
            stage: 0,
        }
    }
}

/// Emitted exactly once per product, at the moment it finishes its last stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub product_id: ProductId,
    pub completion_time: f64,
}
