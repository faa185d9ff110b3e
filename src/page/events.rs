//! Listener registry and dispatch for page events.
//!
//! Mirrors the browser model closely enough for the engines: listeners are
//! keyed by target element and event kind, run in registration order, and may
//! prevent the default action. Each dispatch runs to completion before the
//! caller can issue the next one.

use super::{NodeKey, Page};
use std::collections::BTreeMap;
use tracing::trace;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum EventKind {
    Input,
    Click,
    Submit,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeKey,
    /// New text for input events; written to the target before listeners run.
    pub value: Option<String>,
}

impl Event {
    pub fn input(target: NodeKey, value: &str) -> Self {
        Self {
            kind: EventKind::Input,
            target,
            value: Some(value.to_string()),
        }
    }

    pub fn click(target: NodeKey) -> Self {
        Self {
            kind: EventKind::Click,
            target,
            value: None,
        }
    }

    pub fn submit(target: NodeKey) -> Self {
        Self {
            kind: EventKind::Submit,
            target,
            value: None,
        }
    }
}

/// What a listener sees while handling one event.
pub struct EventContext<'a> {
    pub page: &'a mut dyn Page,
    pub event: Event,
    default_prevented: bool,
}

impl EventContext<'_> {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DispatchOutcome {
    /// Number of listeners that ran.
    pub handled: usize,
    pub default_prevented: bool,
}

type Listener = Box<dyn FnMut(&mut EventContext<'_>)>;

/// Registered listeners for one page.
#[derive(Default)]
pub struct EventLoop {
    listeners: BTreeMap<(NodeKey, EventKind), Vec<Listener>>,
}

impl EventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen<F>(&mut self, target: NodeKey, kind: EventKind, listener: F)
    where
        F: FnMut(&mut EventContext<'_>) + 'static,
    {
        self.listeners
            .entry((target, kind))
            .or_default()
            .push(Box::new(listener));
    }

    /// Listeners registered for `kind` on `target`.
    pub fn listener_count(&self, target: NodeKey, kind: EventKind) -> usize {
        self.listeners.get(&(target, kind)).map_or(0, Vec::len)
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    pub fn dispatch(&mut self, page: &mut dyn Page, event: Event) -> DispatchOutcome {
        if let (EventKind::Input, Some(value)) = (event.kind, event.value.as_deref()) {
            page.set_value(event.target, value);
        }

        let Some(listeners) = self.listeners.get_mut(&(event.target, event.kind)) else {
            trace!(target_node = event.target.0, kind = ?event.kind, "no listeners");
            return DispatchOutcome::default();
        };

        let mut ctx = EventContext {
            page,
            event,
            default_prevented: false,
        };
        for listener in listeners.iter_mut() {
            listener(&mut ctx);
        }
        DispatchOutcome {
            handled: listeners.len(),
            default_prevented: ctx.default_prevented,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryPage;
    use crate::page::anchors::SEARCH_INPUT;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn input_value_lands_before_listeners_run() {
        let mut page = MemoryPage::new();
        let main = page.add_main_content();
        let input = page.add_input(main, SEARCH_INPUT);
        let seen = Rc::new(Cell::new(false));

        let mut events = EventLoop::new();
        let flag = seen.clone();
        events.listen(input, EventKind::Input, move |ctx| {
            flag.set(ctx.page.value(ctx.event.target).as_deref() == Some("momo"));
        });

        let outcome = events.dispatch(&mut page, Event::input(input, "momo"));
        assert_eq!(outcome.handled, 1);
        assert!(seen.get());
        assert_eq!(page.value(input).as_deref(), Some("momo"));
    }

    #[test]
    fn prevent_default_is_reported() {
        let mut page = MemoryPage::new();
        let form = page.append_with_id(page.body(), "searchForm", crate::page::Element::Form);
        let mut events = EventLoop::new();
        events.listen(form, EventKind::Submit, |ctx| ctx.prevent_default());

        let outcome = events.dispatch(&mut page, Event::submit(form));
        assert!(outcome.default_prevented);

        let unrelated = events.dispatch(&mut page, Event::click(form));
        assert_eq!(unrelated, DispatchOutcome::default());
    }

    #[test]
    fn counts_listeners_per_target_and_kind() {
        let mut page = MemoryPage::new();
        let main = page.add_main_content();
        let input = page.add_input(main, SEARCH_INPUT);
        let mut events = EventLoop::new();
        events.listen(input, EventKind::Input, |_| {});
        events.listen(input, EventKind::Input, |_| {});
        events.listen(input, EventKind::Click, |_| {});

        assert_eq!(events.listener_count(input, EventKind::Input), 2);
        assert_eq!(events.listener_count(input, EventKind::Submit), 0);
        assert_eq!(events.total_listeners(), 3);
    }
}
