//! Events Module
//!
//! Observer lists for lock-on notifications. Each notification kind owns
//! a [`Dispatcher`]; interested parties subscribe a callback and receive
//! every broadcast until they explicitly unsubscribe.

/// Identifies one subscription so it can be removed later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<E> = Box<dyn FnMut(&E)>;

/// A list of observers for one notification kind.
///
/// Broadcast order is subscription order. Subscriptions are explicit
/// register/unregister pairs; dropping the dispatcher drops all of them.
pub struct Dispatcher<E> {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer<E>)>,
}

impl<E> Default for Dispatcher<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            observers: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for Dispatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<E> Dispatcher<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. The returned id removes it again.
    pub fn subscribe(&mut self, observer: impl FnMut(&E) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a previously registered observer. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.observers.retain(|(observer_id, _)| *observer_id != id);
    }

    /// Deliver `event` to every observer, in subscription order.
    pub fn broadcast(&mut self, event: &E) {
        for (_, observer) in &mut self.observers {
            observer(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_broadcast_reaches_all_subscribers() {
        let mut dispatcher: Dispatcher<u32> = Dispatcher::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_a = Rc::clone(&seen);
        dispatcher.subscribe(move |value| seen_a.borrow_mut().push(*value));
        let seen_b = Rc::clone(&seen);
        dispatcher.subscribe(move |value| seen_b.borrow_mut().push(*value * 10));

        dispatcher.broadcast(&7);
        assert_eq!(*seen.borrow(), vec![7, 70]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut dispatcher: Dispatcher<()> = Dispatcher::new();
        let count = Rc::new(RefCell::new(0));

        let count_clone = Rc::clone(&count);
        let id = dispatcher.subscribe(move |_| *count_clone.borrow_mut() += 1);

        dispatcher.broadcast(&());
        dispatcher.unsubscribe(id);
        dispatcher.broadcast(&());

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_unsubscribe_unknown_id_is_noop() {
        let mut dispatcher: Dispatcher<()> = Dispatcher::new();
        let id = dispatcher.subscribe(|_| {});
        dispatcher.unsubscribe(id);
        dispatcher.unsubscribe(id);
        assert!(dispatcher.is_empty());
    }
}
