use crate::contact::{Contact, Episode, Sample};
use crate::geom::{classify, Direction, Vector};
use crate::listeners::{ListenerId, Listeners, SwipeEvent, TapEvent};
use crate::options::Options;
use crate::scope::{ContactKind, Scope};
use crate::Error;

/// Where a `Swipe` is in the life of a contact.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// No contact is down.
    Idle,
    /// A contact is down and may turn out to be a swipe.
    Tracking,
    /// A contact is down, but the platform cancelled it; it won't produce a swipe.
    Cancelled,
}

/// What the platform should do with its native scrolling for a move.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scroll {
    Allow,
    Prevent,
}

/// Recognizes up/down/left/right swipes made by a single contact on a `Scope`.
///
/// A `Swipe` is fed contacts by its scope: `start`, then any number of `motion`s, then `end`.
/// When the contact ends, the displacement since the start is compared against a threshold that
/// grows with the duration of the contact (and shrinks with the sensitivity); if it qualifies,
/// every listener for the swipe's direction is called.
///
/// While a contact is moving, the `Swipe` also decides whether native scrolling should be held
/// off. That decision is made once per contact, on its first move: if that move heads in a
/// direction that someone is listening for, scrolling is prevented for the rest of the contact.
#[derive(Debug)]
pub struct Swipe<S: Scope> {
    scope: S,
    kind: ContactKind,
    bound: bool,
    options: Options,
    listeners: Listeners<S::Target>,
    episode: Option<Episode<S::Target>>,
    // Is the scroll decision still to be made for the current contact?
    detect_scroll_prevention: bool,
    continue_preventing_scroll: bool,
}

impl<S: Scope> Swipe<S> {
    /// Creates a new `Swipe` and binds it to `scope`.
    ///
    /// Fails with `Error::UnsupportedEnvironment` if the scope has no contact source.
    pub fn new(mut scope: S, options: Options) -> Result<Swipe<S>, Error> {
        let kind = scope.contact_kind().ok_or(Error::UnsupportedEnvironment)?;
        scope.bind(kind);
        debug!("bound to {:?} events", kind);

        Ok(Swipe {
            scope,
            kind,
            bound: true,
            options,
            listeners: Listeners::new(),
            episode: None,
            detect_scroll_prevention: true,
            continue_preventing_scroll: false,
        })
    }

    pub fn scope(&self) -> &S {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut S {
        &mut self.scope
    }

    /// The kind of contacts this `Swipe` was bound to.
    pub fn contact_kind(&self) -> ContactKind {
        self.kind
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn set_sensitivity(&mut self, sensitivity: i64) {
        self.options.set_sensitivity(sensitivity);
    }

    pub fn set_prevent_scroll(&mut self, prevent: bool) {
        self.options.prevent_scroll = prevent;
    }

    pub fn set_swipes(&mut self, enabled: bool) {
        self.options.swipes = enabled;
    }

    pub fn set_taps(&mut self, enabled: bool) {
        self.options.taps = enabled;
    }

    pub fn phase(&self) -> Phase {
        match self.episode {
            None => Phase::Idle,
            Some(ref ep) if ep.cancelled => Phase::Cancelled,
            Some(_) => Phase::Tracking,
        }
    }

    /// The contact currently being tracked, if there is one.
    pub fn episode(&self) -> Option<&Episode<S::Target>> {
        self.episode.as_ref()
    }

    /// Registers `handler` to be called whenever a swipe in `direction` is recognized.
    pub fn add_listener<F>(&mut self, direction: Direction, handler: F) -> ListenerId
    where
        F: FnMut(&SwipeEvent<S::Target>) + 'static,
    {
        self.listeners.add(direction, handler)
    }

    /// Unregisters a handler that was added with `add_listener`.
    ///
    /// Returns `false` if there was no such handler for `direction`.
    pub fn remove_listener(&mut self, direction: Direction, id: ListenerId) -> bool {
        self.listeners.remove(direction, id)
    }

    /// Registers `handler` to be called whenever a contact goes up without having moved.
    ///
    /// Taps are only reported while `Options::taps` is on.
    pub fn add_tap_listener<F>(&mut self, handler: F) -> ListenerId
    where
        F: FnMut(&TapEvent<S::Target>) + 'static,
    {
        self.listeners.add_tap(handler)
    }

    pub fn remove_tap_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove_tap(id)
    }

    pub fn has_listener(&self, direction: Direction) -> bool {
        self.listeners.interest().is_armed(direction)
    }

    pub fn listener_count(&self, direction: Direction) -> u32 {
        self.listeners.interest().count(direction)
    }

    /// Whether the most recent move asked for native scrolling to be prevented.
    pub fn prevents_scroll(&self) -> bool {
        self.options.prevent_scroll && self.continue_preventing_scroll
    }

    /// A contact went down on `target`.
    ///
    /// If a contact was already being tracked, it is forgotten.
    pub fn start(&mut self, x: f64, y: f64, time: f64, target: S::Target) {
        if let Some(ref old) = self.episode {
            debug!("contact started on {:?} while one on {:?} was open; dropping it", target, old.target);
        }
        self.episode = Some(Episode::new(Sample::new(x, y, time), target));
        self.detect_scroll_prevention = true;
        self.continue_preventing_scroll = false;
    }

    /// The contact moved.
    ///
    /// The return value says whether the platform should suppress its native scrolling for this
    /// move.
    pub fn motion(&mut self, x: f64, y: f64, time: f64) -> Scroll {
        let ep = match self.episode {
            Some(ref mut ep) if !ep.cancelled => ep,
            Some(_) => return Scroll::Allow,
            None => {
                debug!("motion without a contact; ignoring");
                return Scroll::Allow;
            }
        };

        let sample = Sample::new(x, y, time);
        let prev = ep.last.time;
        if !ep.advance(sample) {
            warn!("contact went back in time: {} after {}", time, prev);
        }

        if self.detect_scroll_prevention && self.options.swipes {
            let guess = guess_direction(ep.displacement(sample.pos));
            let interest = self.listeners.interest();
            self.continue_preventing_scroll = guess.map_or(false, |d| interest.is_armed(d));
            self.detect_scroll_prevention = false;
            debug!("first move heads {:?}, preventing scroll: {}", guess, self.continue_preventing_scroll);
        }

        ep.in_progress = true;
        ep.cancelled = false;

        if self.options.prevent_scroll && self.continue_preventing_scroll {
            Scroll::Prevent
        } else {
            Scroll::Allow
        }
    }

    /// The contact went up.
    ///
    /// Returns the direction of the swipe if one was recognized, in which case the listeners for
    /// that direction have already been called. A contact that never moved is reported to the tap
    /// listeners instead, if taps are on.
    pub fn end(&mut self, x: f64, y: f64, time: f64) -> Option<Direction> {
        self.detect_scroll_prevention = true;
        self.continue_preventing_scroll = false;

        let mut ep = match self.episode.take() {
            Some(ep) => ep,
            None => {
                debug!("end without a contact; ignoring");
                return None;
            }
        };

        let end = Sample::new(x, y, time);
        let prev = ep.last.time;
        if !ep.advance(end) {
            warn!("contact went back in time: {} after {}", time, prev);
        }

        if self.options.taps && !ep.in_progress && !ep.cancelled {
            let tap = TapEvent {
                target: ep.target,
                start: ep.start,
                end,
            };
            let n = self.listeners.dispatch_tap(&tap);
            debug!("tap on {:?}, {} listeners", tap.target, n);
            return None;
        }

        if !self.options.swipes {
            return None;
        }

        let threshold = ep.elapsed(time) - f64::from(self.options.sensitivity());
        let direction = classify(ep.displacement(end.pos), threshold)?;

        if !ep.in_progress || ep.cancelled {
            debug!("not delivering swipe {}: in progress {}, cancelled {}", direction, ep.in_progress, ep.cancelled);
            return None;
        }

        let event = SwipeEvent {
            direction,
            target: ep.target,
            start: ep.start,
            end,
        };
        let n = self.listeners.dispatch(&event);
        debug!("swipe {} on {:?}, {} listeners", direction, event.target, n);
        Some(direction)
    }

    /// The platform cancelled the contact.
    ///
    /// The contact stays open until its `end`, but it will not be recognized as a swipe.
    pub fn cancel(&mut self) {
        match self.episode {
            Some(ref mut ep) => {
                debug!("contact on {:?} cancelled", ep.target);
                ep.cancelled = true;
                self.continue_preventing_scroll = false;
            }
            None => debug!("cancel without a contact; ignoring"),
        }
    }

    /// Feeds a `Contact` to the matching method.
    ///
    /// Returns the recognized direction if this contact completed a swipe.
    pub fn handle(&mut self, contact: Contact<S::Target>) -> Option<Direction> {
        match contact {
            Contact::Start(s, target) => {
                self.start(s.pos.x, s.pos.y, s.time, target);
                None
            }
            Contact::Move(s) => {
                self.motion(s.pos.x, s.pos.y, s.time);
                None
            }
            Contact::End(s) => self.end(s.pos.x, s.pos.y, s.time),
            Contact::Cancel => {
                self.cancel();
                None
            }
        }
    }

    /// Unbinds from the scope. Calling this more than once does nothing.
    pub fn destroy(&mut self) {
        if self.bound {
            self.scope.unbind(self.kind);
            self.bound = false;
            debug!("unbound from {:?} events", self.kind);
        }
    }

    pub fn is_destroyed(&self) -> bool {
        !self.bound
    }
}

impl<S: Scope> Drop for Swipe<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

// The scroll decision uses a zero threshold, so any movement at all picks a direction. A contact
// that hasn't moved has no direction yet, and doesn't prevent scrolling.
fn guess_direction(diff: Vector) -> Option<Direction> {
    if diff == Vector::zero() {
        None
    } else {
        classify(diff, 0.0)
    }
}
