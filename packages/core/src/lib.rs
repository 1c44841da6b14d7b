#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

mod controller;
mod dom;
mod load;
pub mod mock;
mod reveal;
mod signal;
mod source;

pub use controller::lazy_load_image;
pub use dom::{Dom, DomError, ElementKind, NativeEvent};
pub use load::{load_image, LoadError, LoadImage};
pub use reveal::{reveal_action, show_background_image, show_image, RevealAction};
pub use signal::{Outcome, Signal, LOAD_COMPLETE, LOAD_ERROR};
pub use source::{LazyImage, Source};
