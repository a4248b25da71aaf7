use euclid::point2;

use crate::geom::{Point, Vector};

/// A single position report from a contact source.
///
/// Times are in milliseconds. Their origin doesn't matter, since only differences between the
/// times within one episode are ever used.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub pos: Point,
    pub time: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64, time: f64) -> Sample {
        Sample {
            pos: point2(x, y),
            time,
        }
    }
}

/// Something that happened to the contact, as reported by the platform.
///
/// A well-behaved source sends one `Start`, any number of `Move`s and then one `End` (or a
/// `Cancel` followed by an `End`) for every episode.
#[derive(Clone, Debug, PartialEq)]
pub enum Contact<T> {
    /// The contact went down on `T`.
    Start(Sample, T),
    /// The contact moved.
    Move(Sample),
    /// The contact went up.
    End(Sample),
    /// The platform took the contact away from us (a touch cancel, for example).
    Cancel,
}

/// The state of one contact, from the time it goes down to the time it goes up.
#[derive(Clone, Debug)]
pub struct Episode<T> {
    pub start: Sample,
    /// The most recent sample, which is `start` until the first move.
    pub last: Sample,
    /// The surface the contact started on. Swipes get delivered here.
    pub target: T,
    /// Has the contact moved since it went down?
    pub in_progress: bool,
    /// Has the episode been ruled out?
    pub cancelled: bool,
}

impl<T> Episode<T> {
    pub fn new(start: Sample, target: T) -> Episode<T> {
        Episode {
            start,
            last: start,
            target,
            in_progress: false,
            cancelled: false,
        }
    }

    /// The vector from `pos` back to where the contact started.
    pub fn displacement(&self, pos: Point) -> Vector {
        self.start.pos - pos
    }

    /// Records a new sample, returning `false` if it went backwards in time.
    pub fn advance(&mut self, sample: Sample) -> bool {
        let monotonic = sample.time >= self.last.time;
        self.last = sample;
        monotonic
    }

    pub fn elapsed(&self, time: f64) -> f64 {
        time - self.start.time
    }
}
