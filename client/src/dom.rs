#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use estate_map_shared::{ContentNode, ElementNode};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry};

use crate::animation;
use crate::surface::{ContentSurface, Timer, VisibilityWatcher};

/// Materialize marker content. Text goes through text nodes only.
pub fn render(node: &ElementNode) -> Option<HtmlElement> {
    let document = web_sys::window()?.document()?;
    match build_element(&document, node) {
        Ok(el) => Some(el),
        Err(err) => {
            web_sys::console::warn_1(&format!("Failed to build marker content: {err:?}").into());
            None
        }
    }
}

fn build_element(document: &Document, node: &ElementNode) -> Result<HtmlElement, JsValue> {
    let el = document
        .create_element(node.tag)?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)?;
    for class in &node.classes {
        el.class_list().add_1(class)?;
    }
    for (name, value) in &node.attributes {
        el.set_attribute(name, value)?;
    }
    for child in &node.children {
        match child {
            ContentNode::Element(child) => {
                let child_el = build_element(document, child)?;
                el.append_child(&child_el)?;
            }
            ContentNode::Text(text) => {
                el.append_child(&document.create_text_node(text))?;
            }
        }
    }
    Ok(el)
}

impl ContentSurface for HtmlElement {
    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn set_style_property(&self, name: &str, value: &str) {
        let _ = self.style().set_property(name, value);
    }

    fn on_animation_end(&self, handler: Box<dyn Fn()>) {
        let cb = Closure::wrap(handler);
        let _ = self
            .add_event_listener_with_callback("animationend", cb.as_ref().unchecked_ref());
        cb.forget();
    }
}

/// `IntersectionObserver` that starts the drop animation on first sight.
#[derive(Clone)]
pub struct DomWatcher {
    observer: IntersectionObserver,
}

impl DomWatcher {
    pub fn new() -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            |entries: js_sys::Array, observer: IntersectionObserver| {
                let watcher = DomWatcher { observer };
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    if let Ok(node) = entry.target().dyn_into::<HtmlElement>() {
                        animation::reveal(&watcher, &node);
                    }
                }
            },
        );
        let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
        callback.forget();
        Ok(Self { observer })
    }
}

impl VisibilityWatcher<HtmlElement> for DomWatcher {
    fn observe(&self, node: &HtmlElement) {
        self.observer.observe(node);
    }

    fn unobserve(&self, node: &HtmlElement) {
        self.observer.unobserve(node);
    }
}

/// `setTimeout`-backed timer.
#[derive(Clone, Copy, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn after(&self, millis: u32, task: Box<dyn FnOnce()>) {
        gloo_timers::callback::Timeout::new(millis, task).forget();
    }
}

/// Uniform draw in `[0, 1)`.
pub fn random_sample() -> f64 {
    js_sys::Math::random()
}
