use serde::{Deserialize, Deserializer};

pub const MIN_SENSITIVITY: u32 = 1;
pub const MAX_SENSITIVITY: u32 = 100;
pub const DEFAULT_SENSITIVITY: u32 = 75;

/// Tuning knobs for a `Swipe`.
///
/// These can be embedded in a config file:
///
/// ```toml
/// sensitivity = 60
/// prevent_scroll = false
/// taps = true
/// ```
///
/// A sensitivity outside of `1..=100` is clamped into range rather than rejected.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Options {
    #[serde(deserialize_with = "deserialize_sensitivity")]
    sensitivity: u32,
    /// Whether to ask the platform to hold off scrolling while a swipe that someone is listening
    /// for is under way.
    pub prevent_scroll: bool,
    /// Recognize swipes at all.
    pub swipes: bool,
    /// Report contacts that go up without having moved as taps.
    pub taps: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            sensitivity: DEFAULT_SENSITIVITY,
            prevent_scroll: true,
            swipes: true,
            taps: false,
        }
    }
}

impl Options {
    pub fn new(sensitivity: i64, prevent_scroll: bool) -> Options {
        Options {
            sensitivity: clamp_sensitivity(sensitivity),
            prevent_scroll,
            ..Options::default()
        }
    }

    /// How easily swipes trigger. Higher is easier.
    ///
    /// The sensitivity is subtracted from the duration of the contact (in milliseconds) to get
    /// the distance a contact has to travel in order to count as a swipe.
    pub fn sensitivity(&self) -> u32 {
        self.sensitivity
    }

    /// Sets the sensitivity, clamping it into `1..=100`.
    ///
    /// ```
    /// use libswipe::Options;
    ///
    /// let mut opts = Options::default();
    /// opts.set_sensitivity(250);
    /// assert_eq!(opts.sensitivity(), 100);
    /// opts.set_sensitivity(-3);
    /// assert_eq!(opts.sensitivity(), 1);
    /// ```
    pub fn set_sensitivity(&mut self, sensitivity: i64) {
        self.sensitivity = clamp_sensitivity(sensitivity);
    }
}

fn clamp_sensitivity(s: i64) -> u32 {
    s.max(i64::from(MIN_SENSITIVITY)).min(i64::from(MAX_SENSITIVITY)) as u32
}

fn deserialize_sensitivity<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    i64::deserialize(d).map(clamp_sensitivity)
}
