use std::rc::Rc;

use lazy_image_core::{Dom, DomError, ElementKind, NativeEvent, Signal};
use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use web_sys::{Element, HtmlElement, HtmlImageElement, HtmlPictureElement, HtmlUnknownElement};

use crate::{events::outcome_event, Config};

/// Render a thrown JS value into something loggable.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Whether the running browser knows about `<picture>`.
fn picture_supported() -> bool {
    web_sys::window()
        .map(|window| js_sys::Reflect::has(&window, &JsValue::from_str("HTMLPictureElement")))
        .and_then(Result::ok)
        .unwrap_or(false)
}

/// A listener attached to a real DOM element.
///
/// Holds the closure alive for as long as the browser might call it.
pub struct WebListener {
    event: NativeEvent,
    closure: Closure<dyn FnMut()>,
}

/// The browser's document, seen through the loader's [`Dom`] capabilities.
#[derive(Clone)]
pub struct WebDom {
    config: Rc<Config>,
}

impl Default for WebDom {
    fn default() -> Self {
        Self::new()
    }
}

impl WebDom {
    /// Use the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Use a custom [`Config`].
    pub fn with_config(config: Config) -> Self {
        Self {
            config: Rc::new(config),
        }
    }

    fn builtin_kind(&self, node: &Element) -> ElementKind {
        if node.is_instance_of::<HtmlImageElement>() {
            return ElementKind::Image;
        }

        // `instanceof` against a missing constructor throws, so check support first
        let supported = self.config.picture_support.unwrap_or_else(picture_supported);
        if supported {
            if node.is_instance_of::<HtmlPictureElement>() {
                return ElementKind::Composite;
            }
        } else if self.config.unknown_as_composite && node.is_instance_of::<HtmlUnknownElement>() {
            return ElementKind::Composite;
        }

        ElementKind::Generic
    }
}

impl Dom for WebDom {
    type Node = Element;
    type Listener = WebListener;

    fn classify(&self, node: &Element) -> ElementKind {
        self.config
            .classifier
            .as_ref()
            .and_then(|classify| classify(node))
            .unwrap_or_else(|| self.builtin_kind(node))
    }

    fn create_probe(&self) -> Result<Element, DomError> {
        HtmlImageElement::new()
            .map(|image| image.unchecked_into())
            .map_err(|err| DomError::CreateProbe(js_message(&err)))
    }

    fn nested_image(&self, node: &Element) -> Option<Element> {
        node.query_selector("img").ok().flatten()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let children = node.children();
        (0..children.length())
            .filter_map(|index| children.item(index))
            .collect()
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) -> Result<(), DomError> {
        node.set_attribute(name, value).map_err(|err| DomError::Attribute {
            name: name.to_string(),
            message: js_message(&err),
        })
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) -> Result<(), DomError> {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            return Err(DomError::Style {
                property: property.to_string(),
                message: format!("<{}> has no inline style", node.tag_name()),
            });
        };

        element
            .style()
            .set_property(property, value)
            .map_err(|err| DomError::Style {
                property: property.to_string(),
                message: js_message(&err),
            })
    }

    fn add_listener(
        &self,
        node: &Element,
        event: NativeEvent,
        handler: Box<dyn FnMut()>,
    ) -> Result<WebListener, DomError> {
        let closure = Closure::wrap(handler);
        node.add_event_listener_with_callback(event.name(), closure.as_ref().unchecked_ref())
            .map_err(|err| DomError::Listener {
                event: event.name(),
                message: js_message(&err),
            })?;

        Ok(WebListener { event, closure })
    }

    fn remove_listener(&self, node: &Element, listener: &WebListener) {
        let removed = node.remove_event_listener_with_callback(
            listener.event.name(),
            listener.closure.as_ref().unchecked_ref(),
        );

        if let Err(err) = removed {
            tracing::warn!(
                "failed to remove {} listener: {}",
                listener.event.name(),
                js_message(&err)
            );
        }
    }

    fn dispatch(&self, node: &Element, signal: Signal) -> Result<(), DomError> {
        let event = outcome_event(signal)?;
        node.dispatch_event(&event).map_err(|err| DomError::Dispatch {
            signal: signal.name(),
            message: js_message(&err),
        })?;
        Ok(())
    }
}
