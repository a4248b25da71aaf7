use libswipe::{ContactKind, Scope};

/// The touchscreen that `libinput debug-events` is reporting on.
///
/// Contacts arrive on the stream whether we're bound or not, so binding is only recorded.
#[derive(Debug, Default)]
pub struct Touchscreen {
    bound: bool,
}

impl Touchscreen {
    pub fn new() -> Touchscreen {
        Touchscreen::default()
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }
}

impl Scope for Touchscreen {
    // The device sysname, e.g. "event5".
    type Target = String;

    fn contact_kind(&self) -> Option<ContactKind> {
        Some(ContactKind::Touch)
    }

    fn bind(&mut self, kind: ContactKind) {
        info!("listening for {}", kind.event_names().join("/"));
        self.bound = true;
    }

    fn unbind(&mut self, kind: ContactKind) {
        info!("no longer listening for {}", kind.event_names().join("/"));
        self.bound = false;
    }
}
