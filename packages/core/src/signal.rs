/// A named event dispatched on the target once a load attempt settles.
///
/// Signals carry no payload; listeners tell them apart by name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signal {
    name: &'static str,
}

impl Signal {
    /// Declare a signal with the given event name.
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// The event name listeners subscribe to.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Dispatched after the target has been revealed.
pub const LOAD_COMPLETE: Signal = Signal::new("lazyloadcomplete");

/// Dispatched when the source failed to load. The target is left untouched.
pub const LOAD_ERROR: Signal = Signal::new("lazyloaderror");

/// Which signal an invocation ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The target was revealed and [`LOAD_COMPLETE`] was dispatched.
    Complete,
    /// [`LOAD_ERROR`] was dispatched.
    Error,
}

impl Outcome {
    /// The signal dispatched for this outcome.
    pub const fn signal(self) -> Signal {
        match self {
            Outcome::Complete => LOAD_COMPLETE,
            Outcome::Error => LOAD_ERROR,
        }
    }
}
