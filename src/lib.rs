//! Helm chart credentials extraction
//!
//! Turns the post-install notes of a Helm chart into connection credentials
//! (host, port, password, secret fields) for a service broker. Each supported
//! chart has an extractor; secret references in the notes are resolved against
//! the cluster's secrets.

pub mod config;
pub mod credentials;
pub mod extractor;
pub mod kube;
pub mod notes;
pub mod registry;
pub mod secret;

// Re-export commonly used types for convenience
pub use credentials::Credentials;
pub use extractor::{CredentialsExtractor, ExtractionError, ExtractionResult};
pub use notes::StatusNotes;
pub use registry::{ExtractorRegistry, RegistryError, bootstrap};
pub use secret::{SecretResolver, SecretStore, StoreError};
