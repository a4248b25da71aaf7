use std::fmt;

use crate::contact::Sample;
use crate::geom::{Direction, Vector};

/// A recognized swipe, as delivered to listeners.
#[derive(Clone, Debug, PartialEq)]
pub struct SwipeEvent<T> {
    pub direction: Direction,
    /// The surface the contact started on.
    pub target: T,
    pub start: Sample,
    pub end: Sample,
}

impl<T> SwipeEvent<T> {
    /// The platform event name for this swipe, e.g. `"swipeleft"`.
    pub fn name(&self) -> &'static str {
        self.direction.event_name()
    }

    pub fn displacement(&self) -> Vector {
        self.start.pos - self.end.pos
    }

    pub fn duration(&self) -> f64 {
        self.end.time - self.start.time
    }
}

/// A contact that went up without moving.
#[derive(Clone, Debug, PartialEq)]
pub struct TapEvent<T> {
    pub target: T,
    pub start: Sample,
    pub end: Sample,
}

impl<T> TapEvent<T> {
    pub fn duration(&self) -> f64 {
        self.end.time - self.start.time
    }
}

/// Identifies a registered listener, so that it can be removed again.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ListenerId(u64);

/// Counts how many listeners are interested in each direction.
///
/// A direction with a positive count is "armed". Counts never go below zero.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InterestTable {
    counts: [u32; 4],
}

impl InterestTable {
    pub fn new() -> InterestTable {
        InterestTable::default()
    }

    pub fn arm(&mut self, d: Direction) {
        self.counts[d.index()] += 1;
    }

    /// Decrements the count for `d`. Does nothing if it is already zero.
    pub fn disarm(&mut self, d: Direction) {
        let c = &mut self.counts[d.index()];
        *c = c.saturating_sub(1);
    }

    pub fn count(&self, d: Direction) -> u32 {
        self.counts[d.index()]
    }

    pub fn is_armed(&self, d: Direction) -> bool {
        self.count(d) > 0
    }
}

type Handler<T> = Box<dyn FnMut(&SwipeEvent<T>)>;
type TapHandler<T> = Box<dyn FnMut(&TapEvent<T>)>;

struct Entry<T> {
    id: ListenerId,
    direction: Direction,
    handler: Handler<T>,
}

/// The listeners registered with a `Swipe`, along with their interest table.
pub struct Listeners<T> {
    interest: InterestTable,
    entries: Vec<Entry<T>>,
    taps: Vec<(ListenerId, TapHandler<T>)>,
    next_id: u64,
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Listeners<{:?}, {} handlers, {} tap handlers>", self.interest, self.entries.len(), self.taps.len())
    }
}

impl<T> Listeners<T> {
    pub fn new() -> Listeners<T> {
        Listeners {
            interest: InterestTable::new(),
            entries: vec![],
            taps: vec![],
            next_id: 0,
        }
    }

    pub fn interest(&self) -> &InterestTable {
        &self.interest
    }

    fn next_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add<F: FnMut(&SwipeEvent<T>) + 'static>(&mut self, direction: Direction, handler: F) -> ListenerId {
        let id = self.next_id();
        self.interest.arm(direction);
        self.entries.push(Entry {
            id,
            direction,
            handler: Box::new(handler),
        });
        id
    }

    /// Removes a listener, returning `true` if it was registered for `direction`.
    ///
    /// The interest count for `direction` goes down either way (but not below zero).
    pub fn remove(&mut self, direction: Direction, id: ListenerId) -> bool {
        self.interest.disarm(direction);
        let before = self.entries.len();
        self.entries.retain(|e| !(e.id == id && e.direction == direction));
        self.entries.len() != before
    }

    /// Calls every handler registered for the event's direction, in the order they were added.
    ///
    /// Returns the number of handlers called.
    pub fn dispatch(&mut self, event: &SwipeEvent<T>) -> usize {
        let mut called = 0;
        for e in self.entries.iter_mut().filter(|e| e.direction == event.direction) {
            (e.handler)(event);
            called += 1;
        }
        called
    }

    pub fn add_tap<F: FnMut(&TapEvent<T>) + 'static>(&mut self, handler: F) -> ListenerId {
        let id = self.next_id();
        self.taps.push((id, Box::new(handler)));
        id
    }

    pub fn remove_tap(&mut self, id: ListenerId) -> bool {
        let before = self.taps.len();
        self.taps.retain(|&(i, _)| i != id);
        self.taps.len() != before
    }

    pub fn has_taps(&self) -> bool {
        !self.taps.is_empty()
    }

    pub fn dispatch_tap(&mut self, event: &TapEvent<T>) -> usize {
        for (_, h) in self.taps.iter_mut() {
            h(event);
        }
        self.taps.len()
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Listeners<T> {
        Listeners::new()
    }
}
