//! Usage: Cross-cutting utilities shared across layers (low-level helpers, no domain logic).

pub(crate) mod blocking;
pub(crate) mod mutex_ext;
