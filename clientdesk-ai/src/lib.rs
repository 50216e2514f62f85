pub mod advisor;
pub mod categorize;
pub mod models;
pub mod prompts;
pub mod provider;
pub mod traits;

// Re-export public APIs
pub use advisor::ClassificationAdvisor;
pub use categorize::{parse_categorization, Categorization, CategorizeError};
pub use models::ProviderConfig;
pub use provider::OpenAIProvider;
pub use traits::{ChatMessage, ModelProvider};
