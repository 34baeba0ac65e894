//! Static Lexa model metadata.
//!
//! An immutable process-wide lookup; the adapter never validates a model id
//! against it, it only feeds the convenience catalog and capability hints.

/// Metadata for one known Lexa model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub context_window: u32,
    pub max_tokens: u32,
}

/// Model id used when the convenience facade is called without one.
pub const DEFAULT_MODEL_ID: &str = "lexa-mml";

/// Known Lexa models.
pub const LEXA_MODELS: &[ModelSpec] = &[
    ModelSpec {
        id: "lexa-mml",
        name: "Lexa MML",
        description: "Lexa MML - Multimodal model with vision capabilities",
        context_window: 8192,
        max_tokens: 4096,
    },
    ModelSpec {
        id: "lexa-x1",
        name: "Lexa X1",
        description: "Lexa X1 - Fast, lightweight text-based model",
        context_window: 4096,
        max_tokens: 2048,
    },
    ModelSpec {
        id: "lexa-rho",
        name: "Lexa Rho",
        description: "Lexa Rho - Reasoning model with enhanced capabilities",
        context_window: 16384,
        max_tokens: 8192,
    },
];

/// Ids exposed by the catalog listing. Includes hosted aliases that have no
/// published metadata entry.
pub(crate) const CATALOG_IDS: &[&str] =
    &["lexa-mml", "lexa-x1", "lexa-rho", "linkedin-post-writer"];

/// Look up metadata for a model id.
pub fn find_model(id: &str) -> Option<&'static ModelSpec> {
    LEXA_MODELS.iter().find(|spec| spec.id == id)
}
