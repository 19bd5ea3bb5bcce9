//! Usage: Shell domain logic (push token lifecycle, connectivity, load state, backend sync).

pub(crate) mod backend_sync;
pub(crate) mod browser;
pub(crate) mod connectivity;
pub(crate) mod content_message;
pub(crate) mod push_token;
pub(crate) mod shell;

#[cfg(test)]
pub(crate) mod testing;
