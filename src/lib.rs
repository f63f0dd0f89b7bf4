//! Clinsight — structured medical information from free-text clinical
//! conversations, plus prescription safety review.
//!
//! Two pipelines share the same shape: render a prompt from caller-supplied
//! clinical data, send it to a text-completion service, isolate the JSON
//! payload embedded in the conversational reply, and validate it into a
//! strictly-typed result. Everything the completion service returns is
//! untrusted input; parse failures become diagnostic results, never panics.

pub mod api;
pub mod config;
pub mod pipeline;
