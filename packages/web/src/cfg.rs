use std::rc::Rc;

use lazy_image_core::ElementKind;
use web_sys::Element;

type Classifier = Rc<dyn Fn(&Element) -> Option<ElementKind>>;

/// Configuration for the web-sys lazy image loader.
///
/// # Example
///
/// ```rust, ignore
/// let dom = WebDom::with_config(Config::new().unknown_as_composite(false));
/// ```
#[derive(Clone)]
pub struct Config {
    pub(crate) unknown_as_composite: bool,
    pub(crate) picture_support: Option<bool>,
    pub(crate) classifier: Option<Classifier>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unknown_as_composite: true,
            picture_support: None,
            classifier: None,
        }
    }
}

impl Config {
    /// Create a new config with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `HTMLUnknownElement` as a `<picture>` when the browser has no `HTMLPictureElement`.
    ///
    /// Browsers without `<picture>` support parse the tag as an unknown element. This is on by
    /// default; it has no effect in browsers that do support `<picture>`.
    pub fn unknown_as_composite(mut self, enabled: bool) -> Self {
        self.unknown_as_composite = enabled;
        self
    }

    /// Assume the browser does or does not support `<picture>` instead of detecting it.
    pub fn picture_support(mut self, supported: bool) -> Self {
        self.picture_support = Some(supported);
        self
    }

    /// Override how elements are classified.
    ///
    /// The classifier runs before the built-in rules. Returning `None` falls back to them.
    pub fn classifier(mut self, f: impl Fn(&Element) -> Option<ElementKind> + 'static) -> Self {
        self.classifier = Some(Rc::new(f));
        self
    }
}
