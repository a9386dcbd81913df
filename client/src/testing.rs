//! In-memory stand-ins for the browser collaborators.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use estate_map_shared::{City, ElementNode, LatLng};

use crate::animation;
use crate::error::{DiagnosticSink, MapError};
use crate::surface::{
    ContentSurface, MapSurface, MarkerFactory, MarkerHandle, Timer, VisibilityWatcher,
};

#[derive(Default)]
struct NodeState {
    classes: Vec<String>,
    style: HashMap<String, String>,
    class_adds: usize,
}

type EndHandlers = Rc<RefCell<Vec<Rc<dyn Fn()>>>>;

#[derive(Clone, Default)]
pub struct MockNode {
    state: Rc<RefCell<NodeState>>,
    end_handlers: EndHandlers,
}

impl MockNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&self, name: &str) -> Option<String> {
        self.state.borrow().style.get(name).cloned()
    }

    pub fn classes(&self) -> Vec<String> {
        self.state.borrow().classes.clone()
    }

    /// How many `add_class` calls actually changed the class list.
    pub fn class_adds(&self) -> usize {
        self.state.borrow().class_adds
    }

    pub fn fire_animation_end(&self) {
        let handlers: Vec<_> = self.end_handlers.borrow().iter().cloned().collect();
        for handler in handlers {
            handler();
        }
    }

    pub fn same_node(&self, other: &MockNode) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl ContentSurface for MockNode {
    fn add_class(&self, class: &str) {
        let mut state = self.state.borrow_mut();
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_owned());
            state.class_adds += 1;
        }
    }

    fn remove_class(&self, class: &str) {
        self.state.borrow_mut().classes.retain(|c| c != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.iter().any(|c| c == class)
    }

    fn set_style_property(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .style
            .insert(name.to_owned(), value.to_owned());
    }

    fn on_animation_end(&self, handler: Box<dyn Fn()>) {
        self.end_handlers.borrow_mut().push(Rc::from(handler));
    }
}

#[derive(Clone)]
pub struct MockMarker {
    label: &'static str,
    attached: Rc<Cell<bool>>,
    z_index: Rc<Cell<Option<i32>>>,
    content: Option<MockNode>,
}

impl MockMarker {
    pub fn plain(label: &'static str) -> Self {
        Self {
            label,
            attached: Rc::new(Cell::new(true)),
            z_index: Rc::new(Cell::new(None)),
            content: None,
        }
    }

    pub fn with_content(label: &'static str, content: MockNode) -> Self {
        Self {
            content: Some(content),
            ..Self::plain(label)
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    pub fn z_index(&self) -> Option<i32> {
        self.z_index.get()
    }
}

impl MarkerHandle for MockMarker {
    type Content = MockNode;

    fn set_attached(&self, attached: bool) {
        self.attached.set(attached);
    }

    fn set_z_index(&self, z_index: Option<i32>) {
        self.z_index.set(z_index);
    }

    fn content(&self) -> Option<MockNode> {
        self.content.clone()
    }
}

#[derive(Clone, Default)]
pub struct MockWatcher {
    observed: Rc<RefCell<Vec<MockNode>>>,
}

impl MockWatcher {
    pub fn is_watching(&self, node: &MockNode) -> bool {
        self.observed.borrow().iter().any(|n| n.same_node(node))
    }

    pub fn watched(&self) -> usize {
        self.observed.borrow().len()
    }

    /// Simulates the node scrolling into view.
    pub fn fire_visible(&self, node: &MockNode) {
        if self.is_watching(node) {
            animation::reveal(self, node);
        }
    }
}

impl VisibilityWatcher<MockNode> for MockWatcher {
    fn observe(&self, node: &MockNode) {
        if !self.is_watching(node) {
            self.observed.borrow_mut().push(node.clone());
        }
    }

    fn unobserve(&self, node: &MockNode) {
        self.observed.borrow_mut().retain(|n| !n.same_node(node));
    }
}

type PendingTask = (u32, Box<dyn FnOnce()>);

#[derive(Clone, Default)]
pub struct MockTimer {
    pending: Rc<RefCell<Vec<PendingTask>>>,
}

impl MockTimer {
    pub fn delays(&self) -> Vec<u32> {
        self.pending.borrow().iter().map(|(ms, _)| *ms).collect()
    }

    pub fn run_all(&self) {
        let tasks: Vec<_> = self.pending.borrow_mut().drain(..).collect();
        for (_, task) in tasks {
            task();
        }
    }
}

impl Timer for MockTimer {
    fn after(&self, millis: u32, task: Box<dyn FnOnce()>) {
        self.pending.borrow_mut().push((millis, task));
    }
}

#[derive(Clone)]
pub struct MockMap {
    center: Rc<Cell<LatLng>>,
    zoom: Rc<Cell<Option<f64>>>,
}

impl MockMap {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center: Rc::new(Cell::new(center)),
            zoom: Rc::new(Cell::new(Some(zoom))),
        }
    }

    pub fn center(&self) -> LatLng {
        self.center.get()
    }

    pub fn set_zoom(&self, zoom: Option<f64>) {
        self.zoom.set(zoom);
    }
}

impl MapSurface for MockMap {
    fn zoom(&self) -> Option<f64> {
        self.zoom.get()
    }

    fn recenter(&self, center: LatLng, zoom: f64) {
        self.center.set(center);
        self.zoom.set(Some(zoom));
    }
}

/// Records every marker it places.
#[derive(Default)]
pub struct MockFactory {
    pub cities: Vec<(String, LatLng)>,
    pub properties: Vec<(LatLng, String, ElementNode, MockNode)>,
}

impl MarkerFactory for MockFactory {
    type Handle = MockMarker;

    fn place_city(&mut self, city: &City) -> MockMarker {
        self.cities.push((city.title.clone(), city.position()));
        MockMarker::plain("city")
    }

    fn place_property(
        &mut self,
        position: LatLng,
        title: &str,
        content: &ElementNode,
    ) -> MockMarker {
        let node = MockNode::new();
        self.properties
            .push((position, title.to_owned(), content.clone(), node.clone()));
        MockMarker::with_content("property", node)
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub reports: RefCell<Vec<String>>,
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, error: &MapError) {
        self.reports.borrow_mut().push(error.to_string());
    }
}
