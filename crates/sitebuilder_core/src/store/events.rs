//! Change notifications for store subscribers.

use crate::model::id::{PageId, SectionId};
use crate::model::project::Project;
use std::sync::Arc;

/// Change published after a store operation took effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A new immutable project snapshot was installed.
    ProjectChanged(Arc<Project>),
    /// Active page or selected section changed.
    SelectionChanged {
        active_page_id: Option<PageId>,
        selected_section_id: Option<SectionId>,
    },
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Listener = Box<dyn FnMut(&StoreEvent) + Send>;

/// Ordered observer list.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Subscribers {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, listener));
        id
    }

    /// Returns the removed listener so the caller controls when it is dropped.
    pub(crate) fn remove(&mut self, id: SubscriptionId) -> Option<Listener> {
        let index = self
            .listeners
            .iter()
            .position(|(candidate, _)| *candidate == id)?;
        Some(self.listeners.remove(index).1)
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn emit(&mut self, event: &StoreEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn removed_listener_stops_receiving_events() {
        let seen = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&seen);
        let mut subscribers = Subscribers::default();
        let id = subscribers.add(Box::new(move |_| *counter.lock().unwrap() += 1));

        let event = StoreEvent::SelectionChanged {
            active_page_id: None,
            selected_section_id: None,
        };
        subscribers.emit(&event);
        assert!(subscribers.remove(id).is_some());
        assert!(subscribers.remove(id).is_none());
        subscribers.emit(&event);

        assert_eq!(*seen.lock().unwrap(), 1);
        assert_eq!(subscribers.len(), 0);
    }
}
