//! In-memory stub DOM implementing [`WebDriver`] for unit tests.
//!
//! Nodes do not evaluate CSS or XPath. Each node is registered with the
//! locators it should answer to; those are lowered with
//! [`Locator::to_query`] and matched verbatim, so every strategy goes
//! through the same lowering the real browser backend uses.
//!
//! Nodes can appear after a delay, be hidden, nest under a parent, and
//! every navigation starts a new page generation that invalidates handles
//! found earlier.

use crate::driver::WebDriver;
use crate::locator::{Locator, Query};
use crate::result::{FoodyError, FoodyResult};
use std::cell::RefCell;
use std::time::{Duration, Instant};

/// Identifier of a node in the stub DOM
pub type NodeId = usize;

/// Description of a node to insert
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    queries: Vec<Query>,
    text: String,
    value: String,
    visible: bool,
    parent: Option<NodeId>,
}

impl MockElement {
    /// A visible node with no text that matches nothing yet
    #[must_use]
    pub fn new() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }

    /// Answer to `locator`
    #[must_use]
    pub fn matching(mut self, locator: &Locator) -> Self {
        self.queries.push(locator.to_query());
        self
    }

    /// Set rendered text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Pre-fill an input value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Render hidden
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Nest under `parent`
    #[must_use]
    pub const fn child_of(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Handle to a node, bound to the page generation it was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockHandle {
    node: NodeId,
    generation: u64,
}

impl MockHandle {
    /// Node this handle points at
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }
}

/// An interaction recorded by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Navigation to a URL
    Goto(String),
    /// Plain click
    Click(NodeId),
    /// Move-to-element then click
    MoveToAndClick(NodeId),
    /// Input cleared
    Clear(NodeId),
    /// Keys sent
    SendKeys(NodeId, String),
}

#[derive(Debug)]
struct MockNode {
    queries: Vec<Query>,
    text: String,
    value: String,
    visible: bool,
    parent: Option<NodeId>,
    appears_at: Duration,
    removed: bool,
}

#[derive(Debug)]
struct FailingQuery {
    query: Query,
    until: Duration,
}

#[derive(Debug)]
struct MockState {
    url: String,
    generation: u64,
    nodes: Vec<MockNode>,
    failing: Vec<FailingQuery>,
    log: Vec<Interaction>,
}

/// Stub DOM driver
#[derive(Debug)]
pub struct MockDriver {
    epoch: Instant,
    state: RefCell<MockState>,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    /// Empty document at `about:blank`
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            state: RefCell::new(MockState {
                url: "about:blank".to_string(),
                generation: 0,
                nodes: Vec::new(),
                failing: Vec::new(),
                log: Vec::new(),
            }),
        }
    }

    /// Insert a node that is present immediately
    pub fn insert(&self, element: MockElement) -> NodeId {
        self.insert_after(Duration::ZERO, element)
    }

    /// Insert a node that becomes present after `delay`
    pub fn insert_after(&self, delay: Duration, element: MockElement) -> NodeId {
        let appears_at = self.epoch.elapsed() + delay;
        let mut state = self.state.borrow_mut();
        state.nodes.push(MockNode {
            queries: element.queries,
            text: element.text,
            value: element.value,
            visible: element.visible,
            parent: element.parent,
            appears_at,
            removed: false,
        });
        state.nodes.len() - 1
    }

    /// Detach a node from the document
    pub fn remove(&self, node: NodeId) {
        if let Some(n) = self.state.borrow_mut().nodes.get_mut(node) {
            n.removed = true;
        }
    }

    /// Show or hide a node
    pub fn set_visible(&self, node: NodeId, visible: bool) {
        if let Some(n) = self.state.borrow_mut().nodes.get_mut(node) {
            n.visible = visible;
        }
    }

    /// Make queries for `locator` raise a driver error for `duration`
    pub fn fail_queries_for(&self, locator: &Locator, duration: Duration) {
        let until = self.epoch.elapsed() + duration;
        self.state.borrow_mut().failing.push(FailingQuery {
            query: locator.to_query(),
            until,
        });
    }

    /// Start a new page generation without changing the URL
    pub fn reload(&self) {
        self.state.borrow_mut().generation += 1;
    }

    /// Current input value of a node
    #[must_use]
    pub fn value(&self, node: NodeId) -> Option<String> {
        self.state
            .borrow()
            .nodes
            .get(node)
            .map(|n| n.value.clone())
    }

    /// Everything that has been done to the document so far
    #[must_use]
    pub fn interactions(&self) -> Vec<Interaction> {
        self.state.borrow().log.clone()
    }

    fn is_present(&self, node: &MockNode) -> bool {
        !node.removed && self.epoch.elapsed() >= node.appears_at
    }

    fn query(&self, parent: Option<NodeId>, query: &Query) -> FoodyResult<Vec<MockHandle>> {
        let now = self.epoch.elapsed();
        let state = self.state.borrow();
        if state
            .failing
            .iter()
            .any(|f| &f.query == query && now < f.until)
        {
            return Err(FoodyError::driver(format!(
                "query failed: {}",
                query.as_str()
            )));
        }
        Ok(state
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| self.is_present(n))
            .filter(|(_, n)| parent.map_or(true, |p| n.parent == Some(p)))
            .filter(|(_, n)| n.queries.contains(query))
            .map(|(node, _)| MockHandle {
                node,
                generation: state.generation,
            })
            .collect())
    }

    fn with_node<T>(
        &self,
        handle: &MockHandle,
        f: impl FnOnce(&mut MockNode) -> T,
    ) -> FoodyResult<T> {
        let mut state = self.state.borrow_mut();
        let generation = state.generation;
        let stale = || FoodyError::StaleElement {
            locator: format!("node {}", handle.node),
        };
        if handle.generation != generation {
            return Err(stale());
        }
        let now = self.epoch.elapsed();
        match state.nodes.get_mut(handle.node) {
            Some(node) if !node.removed && now >= node.appears_at => Ok(f(node)),
            _ => Err(stale()),
        }
    }

    fn record(&self, interaction: Interaction) {
        self.state.borrow_mut().log.push(interaction);
    }
}

impl WebDriver for MockDriver {
    type Element = MockHandle;

    fn goto(&self, url: &str) -> FoodyResult<()> {
        {
            let mut state = self.state.borrow_mut();
            state.url = url.to_string();
            state.generation += 1;
        }
        self.record(Interaction::Goto(url.to_string()));
        Ok(())
    }

    fn current_url(&self) -> FoodyResult<String> {
        Ok(self.state.borrow().url.clone())
    }

    fn find_elements(&self, query: &Query) -> FoodyResult<Vec<MockHandle>> {
        self.query(None, query)
    }

    fn find_elements_in(&self, parent: &MockHandle, query: &Query) -> FoodyResult<Vec<MockHandle>> {
        self.with_node(parent, |_| ())?;
        self.query(Some(parent.node), query)
    }

    fn is_displayed(&self, element: &MockHandle) -> FoodyResult<bool> {
        self.with_node(element, |n| n.visible)
    }

    fn text(&self, element: &MockHandle) -> FoodyResult<String> {
        self.with_node(element, |n| n.text.clone())
    }

    fn click(&self, element: &MockHandle) -> FoodyResult<()> {
        self.with_node(element, |_| ())?;
        self.record(Interaction::Click(element.node));
        Ok(())
    }

    fn move_to_and_click(&self, element: &MockHandle) -> FoodyResult<()> {
        self.with_node(element, |_| ())?;
        self.record(Interaction::MoveToAndClick(element.node));
        Ok(())
    }

    fn clear(&self, element: &MockHandle) -> FoodyResult<()> {
        self.with_node(element, |n| n.value.clear())?;
        self.record(Interaction::Clear(element.node));
        Ok(())
    }

    fn send_keys(&self, element: &MockHandle, text: &str) -> FoodyResult<()> {
        self.with_node(element, |n| n.value.push_str(text))?;
        self.record(Interaction::SendKeys(element.node, text.to_string()));
        Ok(())
    }
}
