//! Poison recovery for std mutexes
//!
//! Cache state guarded by these locks is either a lock token or a memo that
//! can be rebuilt from disk, so a panic in another holder never leaves it in
//! a state worth refusing to read.

use std::sync::{Mutex, MutexGuard};

/// Extension trait for Mutex with poison recovery
pub(crate) trait MutexExt<T> {
    /// Lock the mutex, recovering from poison errors
    fn lock_recovered(&self) -> MutexGuard<'_, T>;
}

impl<T> MutexExt<T> for Mutex<T> {
    fn lock_recovered(&self) -> MutexGuard<'_, T> {
        match self.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Mutex was poisoned, recovering");
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
    fn test_lock_recovered_after_panic() {
        let shared = Arc::new(Mutex::new(7));
        let clone = Arc::clone(&shared);

        let _ = std::thread::spawn(move || {
            let _guard = clone.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(shared.is_poisoned());
        assert_eq!(*shared.lock_recovered(), 7);
    }
}
