use crate::Signal;

/// The three shapes of element the loader knows how to reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A plain `<img>`. Revealed by writing its `src`.
    Image,

    /// A grouped responsive container such as `<picture>`. Each child carries its own `srcset`
    /// candidate and the container itself is never mutated.
    ///
    /// Hosts without native `<picture>` support report the element as unknown, and should
    /// classify it here as well.
    Composite,

    /// Anything else. Revealed through the `background-image` style.
    Generic,
}

/// Native notifications a probe can raise once the host has finished fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeEvent {
    /// The resource was fetched and decoded.
    Load,
    /// The resource could not be fetched or decoded.
    Error,
}

impl NativeEvent {
    /// The DOM event name.
    pub const fn name(self) -> &'static str {
        match self {
            NativeEvent::Load => "load",
            NativeEvent::Error => "error",
        }
    }
}

/// A failure reported by the host while mutating the document.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// A probe element could not be created.
    #[error("failed to create a probe image: {0}")]
    CreateProbe(String),

    /// An attribute write was rejected.
    #[error("failed to set attribute `{name}`: {message}")]
    Attribute {
        /// The attribute being written.
        name: String,
        /// What the host reported.
        message: String,
    },

    /// A style write was rejected.
    #[error("failed to set style `{property}`: {message}")]
    Style {
        /// The style property being written.
        property: String,
        /// What the host reported.
        message: String,
    },

    /// A listener could not be attached.
    #[error("failed to listen for `{event}`: {message}")]
    Listener {
        /// The native event name.
        event: &'static str,
        /// What the host reported.
        message: String,
    },

    /// An outcome signal could not be built or dispatched.
    #[error("failed to dispatch `{signal}`: {message}")]
    Dispatch {
        /// The signal name.
        signal: &'static str,
        /// What the host reported.
        message: String,
    },
}

/// The capabilities the loader needs from its host document.
///
/// Implementations are cheap handles: the loader clones the `Dom` into the listeners it
/// registers so they can deregister themselves. Everything runs on one thread, so neither the
/// handle nor its nodes need to be `Send`.
pub trait Dom: Clone + 'static {
    /// A reference to an element in the host document.
    type Node: Clone + PartialEq + 'static;

    /// A registered listener. Dropping it releases whatever the host allocated for the handler,
    /// but does not by itself detach it; that is [`Dom::remove_listener`]'s job.
    type Listener: 'static;

    /// Classify an element into the shape that decides both source assignment and reveal.
    fn classify(&self, node: &Self::Node) -> ElementKind;

    /// Create a detached image used only to observe load/error notifications.
    fn create_probe(&self) -> Result<Self::Node, DomError>;

    /// The first `<img>` nested inside `node`, if any.
    fn nested_image(&self, node: &Self::Node) -> Option<Self::Node>;

    /// The parent element of `node`.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// The element children of `node` in document order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Write an attribute. Writing `src` or `srcset` on an image starts the host fetch.
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<(), DomError>;

    /// Write an inline style property, e.g. `background-image`.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str) -> Result<(), DomError>;

    /// Attach `handler` to `event` on `node`.
    fn add_listener(
        &self,
        node: &Self::Node,
        event: NativeEvent,
        handler: Box<dyn FnMut()>,
    ) -> Result<Self::Listener, DomError>;

    /// Detach a listener previously returned by [`Dom::add_listener`].
    ///
    /// This may be called from inside the listener's own handler.
    fn remove_listener(&self, node: &Self::Node, listener: &Self::Listener);

    /// Dispatch an outcome signal on `node`.
    fn dispatch(&self, node: &Self::Node, signal: Signal) -> Result<(), DomError>;
}
