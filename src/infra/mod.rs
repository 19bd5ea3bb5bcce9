//! Usage: Infrastructure adapters (paths, settings, HTTP, reachability probe, push plugin).

pub(crate) mod app_paths;
pub(crate) mod backend_client;
pub(crate) mod push_plugin;
pub(crate) mod reachability;
pub(crate) mod settings;
