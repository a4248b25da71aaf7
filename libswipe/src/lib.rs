//! Recognizes directional swipes made by a single contact (a finger, a mouse button, a pen).
//!
//! The entry point is `Swipe`, which is bound to a `Scope` (the surface being watched) and is fed
//! `start`/`motion`/`end` samples by it.

extern crate euclid;
#[macro_use]
extern crate log;
extern crate serde;
extern crate thiserror;

pub mod contact;
mod error;
pub mod geom;
pub mod listeners;
pub mod options;
pub mod recognizer;
pub mod scope;

pub use contact::{Contact, Sample};
pub use error::Error;
pub use geom::Direction;
pub use listeners::{ListenerId, SwipeEvent, TapEvent};
pub use options::Options;
pub use recognizer::{Phase, Scroll, Swipe};
pub use scope::{ContactKind, Scope};
