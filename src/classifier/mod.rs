//! Client for the remote human-vs-AI classification endpoint.
//!
//! The service accepts one audio file as a `multipart/form-data` upload on
//! `POST {base_url}/classify` and answers with a JSON probability pair.

mod api;
mod multipart;

pub use api::{Classification, ClassifyError, classify};
