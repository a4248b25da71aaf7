use std::fmt::Debug;

/// The kinds of contact sources a surface can offer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ContactKind {
    Touch,
    Mouse,
    Pointer,
}

impl ContactKind {
    /// The names of the platform events that start, move and end a contact of this kind.
    pub fn event_names(&self) -> [&'static str; 3] {
        match *self {
            ContactKind::Touch => ["touchstart", "touchmove", "touchend"],
            ContactKind::Mouse => ["mousedown", "mousemove", "mouseup"],
            ContactKind::Pointer => ["pointerdown", "pointermove", "pointerup"],
        }
    }
}

/// The surface that a `Swipe` watches for contacts.
///
/// Implementations connect the platform's contact events to the `Swipe` (usually by calling
/// `Swipe::handle`); the `Swipe` only tells them when to start and when to stop.
pub trait Scope {
    /// A handle to whatever a contact can start on. Swipes are reported against it.
    type Target: Debug;

    /// Which contact source this surface offers, if any.
    ///
    /// If more than one is available, touch should be preferred over the others.
    fn contact_kind(&self) -> Option<ContactKind>;

    /// Starts delivering contacts of the given kind.
    fn bind(&mut self, kind: ContactKind);

    /// Stops delivering contacts of the given kind.
    fn unbind(&mut self, kind: ContactKind);
}
