//! LLM session value types.

pub mod response;
