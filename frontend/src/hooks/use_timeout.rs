use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use yew::prelude::*;

/// A single pending timeout that can be replaced or cancelled.
///
/// Scheduling while a timeout is pending cancels the pending one. The
/// callback must not reschedule through the same handle.
#[derive(Clone, Default)]
pub struct TimeoutHandle {
    slot: Rc<RefCell<Option<Timeout>>>,
}

impl TimeoutHandle {
    pub fn schedule<F>(&self, millis: u32, callback: F)
    where
        F: FnOnce() + 'static,
    {
        // Dropping a pending Timeout clears it
        let previous = self.slot.borrow_mut().replace(Timeout::new(millis, callback));
        drop(previous);
    }

    pub fn cancel(&self) {
        let pending = self.slot.borrow_mut().take();
        drop(pending);
    }
}

impl PartialEq for TimeoutHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

/// Timeout handle owned by the calling component, cancelled on unmount
#[hook]
pub fn use_timeout() -> TimeoutHandle {
    let handle = use_memo((), |_| TimeoutHandle::default());
    let handle = (*handle).clone();

    {
        let handle = handle.clone();
        use_effect_with((), move |_| move || handle.cancel());
    }

    handle
}

/// One cancellable timeout per key, e.g. per list item
pub struct KeyedTimeouts<K> {
    slots: Rc<RefCell<HashMap<K, Timeout>>>,
}

impl<K> Clone for KeyedTimeouts<K> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<K> PartialEq for KeyedTimeouts<K> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slots, &other.slots)
    }
}

impl<K: Eq + Hash + 'static> KeyedTimeouts<K> {
    fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Schedule `callback` for `key`, cancelling whatever was pending for it
    pub fn schedule<F>(&self, key: K, millis: u32, callback: F)
    where
        F: FnOnce() + 'static,
    {
        let previous = self.slots.borrow_mut().insert(key, Timeout::new(millis, callback));
        drop(previous);
    }

    /// Drop the timeouts of every key for which `keep` is false
    pub fn retain(&self, mut keep: impl FnMut(&K) -> bool) {
        self.slots.borrow_mut().retain(|key, _| keep(key));
    }

    pub fn cancel_all(&self) {
        self.slots.borrow_mut().clear();
    }
}

/// Keyed timeouts owned by the calling component, all cancelled on unmount
#[hook]
pub fn use_keyed_timeouts<K>() -> KeyedTimeouts<K>
where
    K: Eq + Hash + 'static,
{
    let timeouts = use_memo((), |_| KeyedTimeouts::new());
    let timeouts = (*timeouts).clone();

    {
        let timeouts = timeouts.clone();
        use_effect_with((), move |_| move || timeouts.cancel_all());
    }

    timeouts
}
