//! Reads touch contacts from the output of `libinput debug-events`.
//!
//! The lines we care about look like this:
//!
//! ```text
//! -event5   TOUCH_DOWN              +1.234s	0 (0) 50.12/30.45 (120.30/ 70.40mm)
//!  event5   TOUCH_MOTION            +1.250s	0 (0) 51.00/30.45 (122.40/ 70.40mm)
//!  event5   TOUCH_UP                +1.300s	0 (0)
//!  event5   TOUCH_FRAME             +1.300s
//! ```
//!
//! Only seat slot 0 is followed, so a second finger is ignored. Positions are the millimeter
//! coordinates in the parentheses.

use libswipe::{Contact, Sample};
use std::collections::HashMap;
use std::io::BufRead;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {msg}")]
    Malformed {
        line: usize,
        msg: String,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Kind {
    Down,
    Motion,
    Up,
    Cancel,
}

#[derive(Clone, Debug, PartialEq)]
struct Line {
    device: String,
    kind: Kind,
    time: f64,
    seat_slot: u32,
    pos: Option<(f64, f64)>,
}

// Returns `Ok(None)` for lines that aren't touch contacts at all.
fn parse_line(s: &str) -> Result<Option<Line>, String> {
    let mut tokens = s.split_whitespace();
    let device = match tokens.next() {
        Some(d) => d.trim_start_matches('-'),
        None => return Ok(None),
    };
    let kind = match tokens.next() {
        Some("TOUCH_DOWN") => Kind::Down,
        Some("TOUCH_MOTION") => Kind::Motion,
        Some("TOUCH_UP") => Kind::Up,
        Some("TOUCH_CANCEL") => Kind::Cancel,
        _ => return Ok(None),
    };

    let time = tokens.next()
        .and_then(|t| t.strip_prefix('+'))
        .and_then(|t| t.strip_suffix('s'))
        .and_then(|t| t.parse::<f64>().ok())
        .ok_or("missing timestamp")?;

    let _slot = tokens.next();
    let seat_slot = tokens.next()
        .and_then(|t| t.strip_prefix('('))
        .and_then(|t| t.strip_suffix(')'))
        .and_then(|t| t.parse::<u32>().ok())
        .ok_or("missing seat slot")?;

    let pos = if kind == Kind::Down || kind == Kind::Motion {
        Some(parse_mm(s).ok_or("missing position")?)
    } else {
        None
    };

    Ok(Some(Line {
        device: device.to_owned(),
        kind,
        time: time * 1000.0,
        seat_slot,
        pos,
    }))
}

// Pulls `x/y` out of the trailing `(x/ymm)`. libinput pads the numbers, so they may contain spaces.
fn parse_mm(s: &str) -> Option<(f64, f64)> {
    let open = s.rfind('(')?;
    let inner = s[open + 1..].trim_end().strip_suffix("mm)")?;
    let mut parts = inner.split('/');
    let x = parts.next()?.trim().parse().ok()?;
    let y = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((x, y))
}

/// An iterator over the contacts in a `libinput debug-events` stream.
pub struct DebugEvents<R> {
    reader: R,
    line_no: usize,
    // Last known position of slot 0 on each device; `TOUCH_UP` doesn't carry one.
    last_pos: HashMap<String, (f64, f64)>,
}

impl<R: BufRead> DebugEvents<R> {
    pub fn new(reader: R) -> DebugEvents<R> {
        DebugEvents {
            reader,
            line_no: 0,
            last_pos: HashMap::new(),
        }
    }

    fn contact(&mut self, line: Line) -> Option<Contact<String>> {
        if line.seat_slot != 0 {
            return None;
        }

        match line.kind {
            Kind::Down | Kind::Motion => {
                let (x, y) = line.pos?;
                let sample = Sample::new(x, y, line.time);
                if line.kind == Kind::Down {
                    self.last_pos.insert(line.device.clone(), (x, y));
                    Some(Contact::Start(sample, line.device))
                } else {
                    self.last_pos.insert(line.device, (x, y));
                    Some(Contact::Move(sample))
                }
            }
            Kind::Up => {
                let (x, y) = match self.last_pos.remove(&line.device) {
                    Some(p) => p,
                    None => {
                        debug!("touch up on {} without a touch down", line.device);
                        return None;
                    }
                };
                Some(Contact::End(Sample::new(x, y, line.time)))
            }
            Kind::Cancel => Some(Contact::Cancel),
        }
    }
}

impl<R: BufRead> Iterator for DebugEvents<R> {
    type Item = Result<Contact<String>, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = String::new();
        loop {
            buf.clear();
            match self.reader.read_line(&mut buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_no += 1;

            match parse_line(&buf) {
                Ok(Some(line)) => {
                    if let Some(c) = self.contact(line) {
                        return Some(Ok(c));
                    }
                }
                Ok(None) => {}
                Err(msg) => {
                    return Some(Err(StreamError::Malformed {
                        line: self.line_no,
                        msg: msg.to_owned(),
                    }));
                }
            }
        }
    }
}
