//! Lock aliases shared across the crate.

#[cfg(feature = "parking-lot")]
pub(crate) type StackMutex<T> = parking_lot::Mutex<T>;

#[cfg(not(feature = "parking-lot"))]
pub(crate) type StackMutex<T> = std::sync::Mutex<T>;

#[cfg(feature = "parking-lot")]
#[inline(always)]
pub(crate) fn lock<T>(mutex: &StackMutex<T>) -> parking_lot::MutexGuard<'_, T> {
    mutex.lock()
}

#[cfg(not(feature = "parking-lot"))]
#[inline(always)]
pub(crate) fn lock<T>(mutex: &StackMutex<T>) -> std::sync::MutexGuard<'_, T> {
    // Stack mutations are single push/pop/clear calls; a poisoned lock still
    // guards an intact stack.
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
