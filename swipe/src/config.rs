use app_dirs::{app_root, AppDataType};
use libswipe::{Direction, Options};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;

use crate::APP_INFO;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't find the config directory: {0}")]
    Dirs(String),
    #[error("couldn't read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("couldn't parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unable to parse gesture {0:?}")]
    Gesture(String),
    #[error("duplicate binding for {0}")]
    Duplicate(Gesture),
}

/// Something that a command can be bound to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Gesture {
    Swipe(Direction),
    Tap,
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Gesture::Swipe(d) => write!(f, "swipe {}", d),
            Gesture::Tap => f.write_str("tap"),
        }
    }
}

fn parse_gesture(s: &str) -> Option<Gesture> {
    let parts = s.split_whitespace().collect::<Vec<_>>();
    match parts.as_slice() {
        ["swipe", dir] => dir.parse::<Direction>().ok().map(Gesture::Swipe),
        ["tap"] => Some(Gesture::Tap),
        _ => {
            error!("unable to parse gesture {:?}", s);
            None
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
struct ConfigParsed {
    #[serde(default)]
    recognizer: Options,
    #[serde(default)]
    bindings: Vec<BindingParsed>,
}

impl ConfigParsed {
    fn into_config(self) -> Result<Config, ConfigError> {
        let mut ret = Config {
            options: self.recognizer,
            bindings: HashMap::new(),
        };

        for b in self.bindings {
            let (gesture, action) = b.into_binding()?;
            if ret.bindings.insert(gesture, action).is_some() {
                return Err(ConfigError::Duplicate(gesture));
            }
        }

        // Nobody would bind a tap without wanting taps reported.
        if ret.bindings.contains_key(&Gesture::Tap) {
            ret.options.taps = true;
        }

        Ok(ret)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
struct BindingParsed {
    gesture: String,
    command: String,
    #[serde(default)]
    args: Vec<String>,
}

impl BindingParsed {
    fn into_binding(self) -> Result<(Gesture, Action), ConfigError> {
        let d = parse_gesture(&self.gesture).ok_or_else(|| ConfigError::Gesture(self.gesture.clone()))?;
        let action = Action::Command {
            command: self.command,
            args: self.args,
        };
        Ok((d, action))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub options: Options,
    pub bindings: HashMap<Gesture, Action>,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Action {
    Command {
        command: String,
        args: Vec<String>,
    }
}

impl Action {
    /// Starts the action, without waiting for it to finish.
    pub fn run(&self) {
        match self {
            Action::Command { command, args } => {
                let res = process::Command::new(command)
                    .args(args)
                    .spawn();
                if let Err(e) = res {
                    error!("failed to execute command {:?}: {}", command, e);
                }
            }
        }
    }
}

pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    let c: ConfigParsed = toml::from_str(contents)?;
    c.into_config()
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;
    parse_config(&contents)
}

/// Loads `bindings.toml` from the user's config directory.
pub fn open_config() -> Result<Config, ConfigError> {
    let mut file_name = app_root(AppDataType::UserConfig, &APP_INFO).map_err(|e| ConfigError::Dirs(e.to_string()))?;
    file_name.push("bindings.toml");
    load_config(&file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config() {
        let config = parse_config(r#"
            [recognizer]
            sensitivity = 60
            prevent_scroll = false

            [[bindings]]
            gesture = "swipe left"
            command = "xdotool"
            args = ["key", "ctrl+Tab"]

            [[bindings]]
            gesture = "swipe  up"
            command = "notify-send"
        "#).unwrap();

        assert_eq!(config.options, Options::new(60, false));
        assert_eq!(config.bindings.len(), 2);
        assert_eq!(config.bindings[&Gesture::Swipe(Direction::Left)], Action::Command {
            command: "xdotool".to_owned(),
            args: vec!["key".to_owned(), "ctrl+Tab".to_owned()],
        });
        assert_eq!(config.bindings[&Gesture::Swipe(Direction::Up)], Action::Command {
            command: "notify-send".to_owned(),
            args: vec![],
        });
    }

    #[test]
    fn defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.options, Options::default());
        assert!(config.bindings.is_empty());
    }

    #[test]
    fn sensitivity_is_clamped() {
        let config = parse_config("[recognizer]\nsensitivity = 0\n").unwrap();
        assert_eq!(config.options.sensitivity(), 1);
        assert!(config.options.prevent_scroll);
    }

    #[test]
    fn bad_gestures() {
        for g in &["swipe", "swipe sideways", "pinch in", "swipe 3 left", "tap left", ""] {
            let toml = format!("[[bindings]]\ngesture = {:?}\ncommand = \"true\"\n", g);
            match parse_config(&toml) {
                Err(ConfigError::Gesture(ref s)) => assert_eq!(s, g),
                other => panic!("{:?} parsed as {:?}", g, other),
            }
        }
    }

    #[test]
    fn duplicate_bindings() {
        let res = parse_config(r#"
            [[bindings]]
            gesture = "swipe down"
            command = "a"

            [[bindings]]
            gesture = "swipe down"
            command = "b"
        "#);
        match res {
            Err(ConfigError::Duplicate(Gesture::Swipe(Direction::Down))) => {}
            other => panic!("expected a duplicate binding, got {:?}", other),
        }
    }

    #[test]
    fn tap_bindings_turn_on_taps() {
        let config = parse_config(r#"
            [[bindings]]
            gesture = "tap"
            command = "notify-send"
            args = ["tapped"]
        "#).unwrap();
        assert!(config.options.taps);
        assert!(config.options.swipes);
        assert!(config.bindings.contains_key(&Gesture::Tap));

        assert!(!parse_config("").unwrap().options.taps);
        assert_eq!(Gesture::Tap.to_string(), "tap");
        assert_eq!(Gesture::Swipe(Direction::Left).to_string(), "swipe left");
    }

    #[test]
    fn missing_file() {
        match load_config(Path::new("/nonexistent/bindings.toml")) {
            Err(ConfigError::Read { .. }) => {}
            other => panic!("expected a read error, got {:?}", other),
        }
    }
}
