#[macro_use]
extern crate log;

use anyhow::Context;
use app_dirs::AppInfo;
use clap::Parser;
use libswipe::{Contact, Scroll, Swipe};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

mod config;
mod events;
mod touchscreen;

use config::Gesture;
use events::DebugEvents;
use touchscreen::Touchscreen;

const APP_INFO: AppInfo = AppInfo { name: "swipe", author: "jneem" };

/// Runs commands when you swipe on a touchscreen.
///
/// Reads the output of `libinput debug-events` and runs the commands bound to swipes in
/// `bindings.toml`.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Config file to use instead of the one in the user's config directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Read events from this file instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,
}

fn run<R: BufRead>(swipe: &mut Swipe<Touchscreen>, input: R) -> anyhow::Result<()> {
    for contact in DebugEvents::new(input) {
        match contact? {
            Contact::Move(s) => {
                if swipe.motion(s.pos.x, s.pos.y, s.time) == Scroll::Prevent {
                    debug!("holding off scrolling");
                }
            }
            c => {
                if let Some(d) = swipe.handle(c) {
                    debug!("got swipe {}", d);
                }
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match args.config {
        Some(ref path) => config::load_config(path),
        None => config::open_config(),
    }.context("unable to load config")?;

    let mut swipe = Swipe::new(Touchscreen::new(), config.options)?;
    for (gesture, action) in config.bindings {
        info!("binding {} to {:?}", gesture, action);
        match gesture {
            Gesture::Swipe(direction) => {
                swipe.add_listener(direction, move |ev| {
                    info!("swipe {} on {}", ev.direction, ev.target);
                    action.run();
                });
            }
            Gesture::Tap => {
                swipe.add_tap_listener(move |ev| {
                    info!("tap on {}", ev.target);
                    action.run();
                });
            }
        }
    }

    match args.input {
        Some(ref path) => {
            let file = File::open(path).with_context(|| format!("couldn't open {:?}", path))?;
            run(&mut swipe, BufReader::new(file))?;
        }
        None => {
            let stdin = io::stdin();
            run(&mut swipe, stdin.lock())?;
        }
    }

    swipe.destroy();
    Ok(())
}
