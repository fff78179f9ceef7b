// topicprobe: sentence bucketing and topic exploration for a block of text
//
// This is the library root. Each module corresponds to one stage of the
// text -> sentences -> pseudo-documents -> topics -> reports pipeline.

pub mod config;
pub mod output;
pub mod pipeline;
pub mod text;
pub mod topics;
pub mod visualize;
