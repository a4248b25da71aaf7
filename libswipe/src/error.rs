use thiserror::Error;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// The surface has no contact source (touch, mouse or pointer events) to bind to.
    #[error("no supported contact events on this surface")]
    UnsupportedEnvironment,
    #[error("unknown swipe direction {0:?}")]
    UnknownDirection(String),
}
