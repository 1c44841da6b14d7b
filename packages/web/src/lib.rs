//! Lazy image loading for the browser
//!
//! ## Overview
//! ------------
//! This crate plugs the browser's document into `lazy-image-core`. A target element is only
//! pointed at its real source once the browser has finished fetching it through a hidden probe,
//! so half-loaded images never flash on screen.
//!
//! Three kinds of target are supported:
//! - `<img>`: the `src` attribute is set once the probe loads.
//! - `<picture>`: every child gets its `srcset` candidate up front, and the nested `<img>` is
//!   observed directly. Browsers without `<picture>` see an unknown element, which is treated the
//!   same way.
//! - anything else: `background-image: url(...)` is set once the probe loads.
//!
//! When the attempt settles, either `lazyloadcomplete` or `lazyloaderror` is dispatched on the
//! target. Neither carries a payload.
//!
//! Deciding *when* to load (viewport observation, scheduling, retries) is left to the caller.
//!
//! ```rust, ignore
//! let image = document.query_selector("img.hero")?.unwrap();
//! image.add_event_listener_with_callback("lazyloaderror", show_fallback.as_ref().unchecked_ref())?;
//! lazy_image_web::lazy_load_image(image, "/assets/hero.jpg");
//! ```

pub use crate::cfg::Config;
pub use crate::dom::{WebDom, WebListener};
pub use lazy_image_core::{
    load_image, reveal_action, show_background_image, show_image, Dom, DomError, ElementKind,
    LazyImage, LoadError, Outcome, RevealAction, Signal, Source, LOAD_COMPLETE, LOAD_ERROR,
};
use web_sys::Element;

mod cfg;
mod dom;
pub mod events;

/// Lazily load `src` into `image` with the default [`Config`].
///
/// Returns immediately. The outcome is reported through the `lazyloadcomplete` and
/// `lazyloaderror` events on `image`.
pub fn lazy_load_image(image: Element, src: impl Into<Source>) {
    lazy_load_image_with(WebDom::new(), LazyImage::new(image, src))
}

/// Lazily load `lazy` through a configured [`WebDom`].
///
/// The attempt is spawned onto the browser's microtask queue with `spawn_local`.
pub fn lazy_load_image_with(dom: WebDom, lazy: LazyImage<Element>) {
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = lazy_image_core::lazy_load_image(&dom, &lazy).await;
        tracing::trace!("lazy image settled: {outcome:?}");
    });
}
