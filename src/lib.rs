//! po-classify: PO description → three-level procurement taxonomy with
//! Hexagonal Architecture, backed by an OpenAI-compatible LLM.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
