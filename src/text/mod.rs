// Text preparation: sentence splitting and pseudo-document grouping.

pub mod pseudo_docs;
pub mod sentences;

pub use pseudo_docs::build_pseudo_documents;
pub use sentences::split_sentences;
