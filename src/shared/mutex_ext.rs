//! Usage: Poison-tolerant `Mutex` locking for short critical sections.

use std::sync::{Mutex, MutexGuard};

pub(crate) trait MutexExt<T> {
    fn lock_or_recover(&self) -> MutexGuard<'_, T>;
}

impl<T> MutexExt<T> for Mutex<T> {
    fn lock_or_recover(&self) -> MutexGuard<'_, T> {
        match self.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("mutex poisoned, recovering inner state");
                poisoned.into_inner()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn lock_or_recover_returns_state_after_panic_in_holder() {
        let shared = Arc::new(Mutex::new(7_u32));
        let for_thread = Arc::clone(&shared);
        let joined = std::thread::spawn(move || {
            let _guard = for_thread.lock().expect("lock");
            panic!("poison the mutex");
        })
        .join();
        assert!(joined.is_err());
        assert!(shared.is_poisoned());

        *shared.lock_or_recover() += 1;
        assert_eq!(*shared.lock_or_recover(), 8);
    }
}
