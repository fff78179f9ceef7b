// Topic modeling: TF-IDF keyword topics, similarity and hierarchy.

pub mod hierarchy;
pub mod model;
pub mod overlap;
pub mod tfidf;
pub mod traits;
