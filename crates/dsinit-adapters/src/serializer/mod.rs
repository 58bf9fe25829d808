//! Document serializer adapters.

mod serde_documents;

pub use serde_documents::SerdeDocuments;
