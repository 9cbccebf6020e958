//! Product advisory pipeline: prompt → upstream model → normalized result.

pub mod affiliate;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod prompts;
pub mod service;
