use std::sync::Mutex;

type Callback<T> = Box<dyn FnOnce(T) + Send>;

/// One-shot result slot shared by the parties racing to finish a request.
///
/// The first [`deliver`](Completion::deliver) runs the callback; every later
/// call is a no-op and returns `false`.
pub struct Completion<T> {
    callback: Mutex<Option<Callback<T>>>,
}

impl<T> Completion<T> {
    pub fn new<F>(callback: F) -> Self
    where
        F: FnOnce(T) + Send + 'static,
    {
        Completion {
            callback: Mutex::new(Some(Box::new(callback))),
        }
    }

    /// Deliver `value` if nothing has been delivered yet.
    pub fn deliver(&self, value: T) -> bool {
        // Take the callback under the lock, run it outside
        let callback = match self.callback.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match callback {
            Some(callback) => {
                callback(value);
                true
            }
            None => false,
        }
    }

    pub fn is_delivered(&self) -> bool {
        match self.callback.lock() {
            Ok(slot) => slot.is_none(),
            Err(poisoned) => poisoned.into_inner().is_none(),
        }
    }
}
