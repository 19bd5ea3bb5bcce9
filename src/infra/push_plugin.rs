//! Usage: Tauri plugin bridging the platform push-messaging service.
//!
//! On Android the native `PushPlugin` class (`gen/android`, Firebase Messaging) issues the device
//! token (`getToken`). Other targets have no messaging service and report `PUSH_UNSUPPORTED`.
//! A failed native registration does not abort startup: the handle is still managed and reports
//! `PUSH_UNAVAILABLE` on every token request.

use std::marker::PhantomData;
use tauri::plugin::{Builder, TauriPlugin};
use tauri::{Manager, Runtime};

const PLUGIN_NAME: &str = "push";

#[cfg(target_os = "android")]
const ANDROID_PLUGIN_PACKAGE: &str = "com.dightinfotech.ondemand.push";
#[cfg(target_os = "android")]
const ANDROID_PLUGIN_CLASS: &str = "PushPlugin";

#[cfg(target_os = "android")]
#[derive(serde::Deserialize)]
struct TokenResponse {
    token: String,
}

enum PushBackend<R: Runtime> {
    #[cfg(target_os = "android")]
    Mobile(tauri::plugin::PluginHandle<R>),
    #[cfg_attr(not(target_os = "android"), allow(dead_code))]
    Unavailable(String),
    #[cfg_attr(target_os = "android", allow(dead_code))]
    Unsupported(PhantomData<fn() -> R>),
}

pub struct PushMessagingHandle<R: Runtime> {
    backend: PushBackend<R>,
}

impl<R: Runtime> PushMessagingHandle<R> {
    fn new(backend: PushBackend<R>) -> Self {
        Self { backend }
    }

    #[cfg_attr(not(target_os = "android"), allow(dead_code))]
    pub(crate) fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(PushBackend::Unavailable(reason.into()))
    }

    #[cfg_attr(target_os = "android", allow(dead_code))]
    pub(crate) fn unsupported() -> Self {
        Self::new(PushBackend::Unsupported(PhantomData))
    }

    /// Blocking round-trip to the native side; call from a blocking task.
    pub fn token(&self) -> Result<String, String> {
        match &self.backend {
            #[cfg(target_os = "android")]
            PushBackend::Mobile(mobile) => mobile
                .run_mobile_plugin::<TokenResponse>("getToken", ())
                .map(|response| response.token)
                .map_err(|e| format!("PUSH_TOKEN: {e}")),
            PushBackend::Unavailable(reason) => Err(format!("PUSH_UNAVAILABLE: {reason}")),
            PushBackend::Unsupported(_) => {
                Err("PUSH_UNSUPPORTED: no push messaging service on this platform".to_string())
            }
        }
    }
}

pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new(PLUGIN_NAME)
        .setup(|app, _api| {
            #[cfg(target_os = "android")]
            let handle =
                match _api.register_android_plugin(ANDROID_PLUGIN_PACKAGE, ANDROID_PLUGIN_CLASS) {
                    Ok(mobile) => PushMessagingHandle::new(PushBackend::Mobile(mobile)),
                    // Logging is not installed yet; the reason surfaces on the first token request.
                    Err(err) => PushMessagingHandle::unavailable(format!(
                        "native push plugin registration failed: {err}"
                    )),
                };

            #[cfg(not(target_os = "android"))]
            let handle = PushMessagingHandle::<R>::unsupported();

            app.manage(handle);
            Ok(())
        })
        .build()
}
