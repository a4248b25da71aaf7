use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The unit of the coordinates reported by a contact source.
///
/// The recognizer never converts between units, so whatever the source reports (CSS pixels,
/// millimeters on a touchpad, ...) is what the thresholds get compared against.
pub struct Px;
pub type Point = euclid::Point2D<f64, Px>;
pub type Vector = euclid::Vector2D<f64, Px>;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn name(&self) -> &'static str {
        use self::Direction::*;

        match *self {
            Up => "up",
            Down => "down",
            Left => "left",
            Right => "right",
        }
    }

    /// The name of the event that a swipe in this direction gets delivered as.
    ///
    /// ```
    /// use libswipe::geom::Direction;
    /// assert_eq!(Direction::Left.event_name(), "swipeleft");
    /// ```
    pub fn event_name(&self) -> &'static str {
        use self::Direction::*;

        match *self {
            Up => "swipeup",
            Down => "swipedown",
            Left => "swipeleft",
            Right => "swiperight",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Direction, Error> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(Error::UnknownDirection(s.to_owned())),
        }
    }
}

/// Decides which direction a displacement points in.
///
/// `diff` is the start position minus the current position, so a positive `x` means the contact
/// moved to the left and a positive `y` means it moved up. The dominant axis is chosen first;
/// the horizontal axis only wins if it is strictly larger, so a perfect diagonal is treated as
/// vertical. Within the axis, a displacement that reaches `threshold` in the positive sense wins,
/// and otherwise the magnitude alone has to reach it.
///
/// ```
/// use euclid::vec2;
/// use libswipe::geom::{classify, Direction};
///
/// assert_eq!(classify(vec2(-200.0, 0.0), 75.0), Some(Direction::Right));
/// assert_eq!(classify(vec2(200.0, 0.0), 75.0), Some(Direction::Left));
/// assert_eq!(classify(vec2(-10.0, 0.0), 75.0), None);
/// ```
pub fn classify(diff: Vector, threshold: f64) -> Option<Direction> {
    let abs_x = diff.x.abs();
    let abs_y = diff.y.abs();

    if abs_x > abs_y {
        if diff.x >= threshold {
            Some(Direction::Left)
        } else if abs_x >= threshold {
            Some(Direction::Right)
        } else {
            None
        }
    } else if diff.y >= threshold {
        Some(Direction::Up)
    } else if abs_y >= threshold {
        Some(Direction::Down)
    } else {
        None
    }
}
