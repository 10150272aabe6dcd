//! Injection of shared lifecycle scripts into every request
//!
//! Injection produces a new tree; the input collection is never modified, so
//! a loaded [`HookSet`] can be applied to any number of collections.

use super::types::{event_listen, Collection, Event, Item, Request};
use std::fmt;

/// Lifecycle events a shared script can attach to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    /// Runs before the request is sent
    PreRequest,
    /// Runs after the response arrives
    Test,
}

impl HookEvent {
    /// Name used in the `listen` field
    pub fn as_str(&self) -> &'static str {
        match self {
            HookEvent::PreRequest => "prerequest",
            HookEvent::Test => "test",
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scripts to inject, keyed by event. Order of insertion is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookSet {
    hooks: Vec<(String, String)>,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the script for `event`, replacing an earlier one
    pub fn with(mut self, event: HookEvent, source: impl Into<String>) -> Self {
        self.insert(event.as_str(), source);
        self
    }

    /// Set the script for an arbitrary `listen` name
    pub fn insert(&mut self, listen: impl Into<String>, source: impl Into<String>) {
        let listen = listen.into();
        let source = source.into();
        match self.hooks.iter_mut().find(|(name, _)| *name == listen) {
            Some(entry) => entry.1 = source,
            None => self.hooks.push((listen, source)),
        }
    }

    /// Script registered for `listen`, if any
    pub fn get(&self, listen: &str) -> Option<&str> {
        self.hooks
            .iter()
            .find(|(name, _)| name == listen)
            .map(|(_, source)| source.as_str())
    }

    /// Hooks with a non-empty script body
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.hooks
            .iter()
            .filter(|(_, source)| !source.is_empty())
            .map(|(listen, source)| (listen.as_str(), source.as_str()))
    }

    /// True when nothing would be injected
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

/// Return a copy of `collection` with every request carrying `hooks`
pub fn inject_hooks(collection: &Collection, hooks: &HookSet) -> Collection {
    Collection {
        items: collection
            .items
            .as_ref()
            .map(|items| inject_items(items, hooks)),
        meta: collection.meta.clone(),
    }
}

/// Rebuild `items`, injecting into requests at any depth
pub fn inject_items(items: &[Item], hooks: &HookSet) -> Vec<Item> {
    items
        .iter()
        .map(|item| match item {
            Item::Folder(folder) => {
                let mut folder = folder.clone();
                folder.children = inject_items(&folder.children, hooks);
                Item::Folder(folder)
            }
            Item::Request(request) => Item::Request(inject_request(request, hooks)),
            Item::Opaque(_) => item.clone(),
        })
        .collect()
}

fn inject_request(request: &Request, hooks: &HookSet) -> Request {
    let mut request = request.clone();
    for (listen, source) in hooks.active() {
        let events = request.events.get_or_insert_with(Vec::new);
        events.retain(|event| event_listen(event) != Some(listen));
        events.push(Event::javascript(listen, source).to_value());
    }
    request
}
