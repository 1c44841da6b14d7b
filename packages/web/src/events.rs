//! Building the outcome signals as native DOM events.

use std::cell::RefCell;

use lazy_image_core::{DomError, Signal};
use rustc_hash::FxHashMap;
use wasm_bindgen::JsValue;
use web_sys::CustomEvent;

use crate::dom::js_message;

thread_local! {
    static OUTCOME_EVENTS: RefCell<FxHashMap<&'static str, CustomEvent>> = RefCell::default();
}

/// Build a payload-free, non-bubbling custom event named `name`.
pub fn create_event(name: &str) -> Result<CustomEvent, JsValue> {
    CustomEvent::new(name)
}

/// The native event for `signal`.
///
/// Each signal is built the first time it is needed and the same event object is dispatched for
/// every later invocation.
pub fn outcome_event(signal: Signal) -> Result<CustomEvent, DomError> {
    OUTCOME_EVENTS.with(|events| {
        if let Some(event) = events.borrow().get(signal.name()) {
            return Ok(event.clone());
        }

        let event = create_event(signal.name()).map_err(|err| DomError::Dispatch {
            signal: signal.name(),
            message: js_message(&err),
        })?;
        events.borrow_mut().insert(signal.name(), event.clone());
        Ok(event)
    })
}
