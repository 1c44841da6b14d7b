//! An in-memory [`Dom`] for driving the loader without a browser.
//!
//! Nothing is fetched. Tests play the host's part by calling [`MockDom::fire`] on a probe once
//! they want the "download" to finish.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use rustc_hash::FxHashMap;
use slab::Slab;

use crate::{Dom, DomError, ElementKind, NativeEvent, Signal};

/// A node in a [`MockDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A listener registered on a [`MockDom`] node.
#[derive(Debug)]
pub struct MockListener {
    id: usize,
}

type Handler = Rc<RefCell<Box<dyn FnMut()>>>;

struct MockNode {
    tag: String,
    kind: ElementKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    listeners: Vec<(usize, NativeEvent, Handler)>,
    signals: Vec<Signal>,
}

#[derive(Default)]
struct Tree {
    nodes: Slab<MockNode>,
    probes: Vec<NodeId>,
    next_listener: usize,
    rejected_attributes: FxHashMap<String, String>,
}

impl Tree {
    fn node(&self, id: NodeId) -> &MockNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut MockNode {
        &mut self.nodes[id.0]
    }
}

/// A cheap, cloneable handle to an in-memory document.
#[derive(Clone, Default)]
pub struct MockDom {
    tree: Rc<RefCell<Tree>>,
}

impl MockDom {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element that classifies as `kind`.
    pub fn create_element(&self, tag: &str, kind: ElementKind) -> NodeId {
        let node = MockNode {
            tag: tag.to_string(),
            kind,
            parent: None,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            listeners: Vec::new(),
            signals: Vec::new(),
        };
        NodeId(self.tree.borrow_mut().nodes.insert(node))
    }

    /// Append `child` to `parent`'s children.
    pub fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut tree = self.tree.borrow_mut();
        tree.node_mut(child).parent = Some(parent);
        tree.node_mut(parent).children.push(child);
    }

    /// Build a `<picture>` holding `sources` `<source>` elements followed by an `<img>`.
    ///
    /// Returns the picture and its image.
    pub fn create_picture(&self, sources: usize) -> (NodeId, NodeId) {
        let picture = self.create_element("picture", ElementKind::Composite);
        for _ in 0..sources {
            let source = self.create_element("source", ElementKind::Generic);
            self.append_child(picture, source);
        }
        let image = self.create_element("img", ElementKind::Image);
        self.append_child(picture, image);
        (picture, image)
    }

    /// Make every write of attribute `name` fail with `message`.
    pub fn reject_attribute(&self, name: &str, message: &str) {
        self.tree
            .borrow_mut()
            .rejected_attributes
            .insert(name.to_string(), message.to_string());
    }

    /// The tag `node` was created with.
    pub fn tag(&self, node: NodeId) -> String {
        self.tree.borrow().node(node).tag.clone()
    }

    /// Read back an attribute.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree.borrow().node(node).attributes.get(name).cloned()
    }

    /// Read back an inline style property.
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.tree.borrow().node(node).styles.get(property).cloned()
    }

    /// Every signal dispatched on `node`, in order.
    pub fn signals(&self, node: NodeId) -> Vec<Signal> {
        self.tree.borrow().node(node).signals.clone()
    }

    /// How many listeners are currently attached to `node`.
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.tree.borrow().node(node).listeners.len()
    }

    /// Every probe handed out by [`Dom::create_probe`], oldest first.
    pub fn probes(&self) -> Vec<NodeId> {
        self.tree.borrow().probes.clone()
    }

    /// The most recently created probe.
    pub fn last_probe(&self) -> Option<NodeId> {
        self.tree.borrow().probes.last().copied()
    }

    /// Raise a native event on `node`, as the host would once a fetch finishes.
    ///
    /// Returns how many handlers ran.
    pub fn fire(&self, node: NodeId, event: NativeEvent) -> usize {
        // Collect first: handlers detach themselves while running.
        let handlers: Vec<Handler> = self
            .tree
            .borrow()
            .node(node)
            .listeners
            .iter()
            .filter(|(_, kind, _)| *kind == event)
            .map(|(_, _, handler)| handler.clone())
            .collect();

        for handler in &handlers {
            (handler.borrow_mut())();
        }

        handlers.len()
    }
}

impl Dom for MockDom {
    type Node = NodeId;
    type Listener = MockListener;

    fn classify(&self, node: &NodeId) -> ElementKind {
        self.tree.borrow().node(*node).kind
    }

    fn create_probe(&self) -> Result<NodeId, DomError> {
        let probe = self.create_element("img", ElementKind::Image);
        self.tree.borrow_mut().probes.push(probe);
        Ok(probe)
    }

    fn nested_image(&self, node: &NodeId) -> Option<NodeId> {
        let tree = self.tree.borrow();
        let mut stack: Vec<NodeId> = tree.node(*node).children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            let child = tree.node(next);
            if child.tag == "img" {
                return Some(next);
            }
            stack.extend(child.children.iter().rev().copied());
        }
        None
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.tree.borrow().node(*node).parent
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.tree.borrow().node(*node).children.clone()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let mut tree = self.tree.borrow_mut();
        if let Some(message) = tree.rejected_attributes.get(name) {
            return Err(DomError::Attribute {
                name: name.to_string(),
                message: message.clone(),
            });
        }
        tree.node_mut(*node)
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) -> Result<(), DomError> {
        self.tree
            .borrow_mut()
            .node_mut(*node)
            .styles
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn add_listener(
        &self,
        node: &NodeId,
        event: NativeEvent,
        handler: Box<dyn FnMut()>,
    ) -> Result<MockListener, DomError> {
        let mut tree = self.tree.borrow_mut();
        let id = tree.next_listener;
        tree.next_listener += 1;
        tree.node_mut(*node)
            .listeners
            .push((id, event, Rc::new(RefCell::new(handler))));
        Ok(MockListener { id })
    }

    fn remove_listener(&self, node: &NodeId, listener: &MockListener) {
        self.tree
            .borrow_mut()
            .node_mut(*node)
            .listeners
            .retain(|(id, _, _)| *id != listener.id);
    }

    fn dispatch(&self, node: &NodeId, signal: Signal) -> Result<(), DomError> {
        self.tree.borrow_mut().node_mut(*node).signals.push(signal);
        Ok(())
    }
}
