//! Discrete commands driving the simulation
//!
//! Input devices and control panels never touch the world directly. They
//! push `SimCommand`s onto a `ControlQueue`, which the simulation loop drains
//! once per tick.

use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{bail, ensure, Context, Error, Result};

use super::building::BuildingSpec;
use super::camera::ViewPreset;

/// Keys the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimKey {
    Left,
    Right,
    Up,
    Down,
    W,
    A,
    S,
    D,
    Digit1,
    Digit2,
    Digit3,
    Space,
    R,
    Plus,
    Minus,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimCommand {
    /// Mouse drag in pixels
    Drag { dx: f32, dy: f32 },
    /// Wheel notches; positive scrolls away from the user
    Wheel(f32),
    Key(SimKey),
    ToggleAnimation,
    /// Car speed multiplier, clamped to `[0, 3]`
    SetSpeed(f32),
    SetView(ViewPreset),
    AddBuilding(BuildingSpec),
    Regenerate,
    Quit,
}

impl FromStr for SimCommand {
    type Err = Error;

    /// Parse one line of control panel input
    ///
    /// `add` requests are validated here as well, so the panel can report a
    /// bad building before it is ever queued.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            bail!("empty command");
        };
        let args: Vec<&str> = tokens.collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "toggle" | "pause" | "resume" => {
                expect_args(verb, &args, 0)?;
                SimCommand::ToggleAnimation
            }
            "regenerate" | "regen" => {
                expect_args(verb, &args, 0)?;
                SimCommand::Regenerate
            }
            "quit" | "exit" => {
                expect_args(verb, &args, 0)?;
                SimCommand::Quit
            }
            "speed" => {
                expect_args(verb, &args, 1)?;
                SimCommand::SetSpeed(parse_number("speed", args[0])?)
            }
            "view" => {
                expect_args(verb, &args, 1)?;
                SimCommand::SetView(args[0].parse()?)
            }
            "drag" => {
                expect_args(verb, &args, 2)?;
                SimCommand::Drag {
                    dx: parse_number("dx", args[0])?,
                    dy: parse_number("dy", args[1])?,
                }
            }
            "wheel" => {
                expect_args(verb, &args, 1)?;
                SimCommand::Wheel(parse_number("wheel", args[0])?)
            }
            "add" => {
                expect_args(verb, &args, 5)?;
                let spec = BuildingSpec::new(
                    parse_number("x", args[0])?,
                    parse_number("z", args[1])?,
                    parse_number("width", args[2])?,
                    parse_number("depth", args[3])?,
                    parse_number("height", args[4])?,
                );
                spec.validate()?;
                SimCommand::AddBuilding(spec)
            }
            other => bail!("unknown command `{other}`"),
        };

        Ok(command)
    }
}

fn expect_args(verb: &str, args: &[&str], expected: usize) -> Result<()> {
    ensure!(
        args.len() == expected,
        "`{verb}` takes {expected} argument(s), got {}",
        args.len()
    );
    Ok(())
}

fn parse_number(name: &str, token: &str) -> Result<f32> {
    let value: f32 = token
        .parse()
        .with_context(|| format!("{name}: `{token}` is not a number"))?;
    ensure!(value.is_finite(), "{name}: `{token}` is not a finite number");
    Ok(value)
}

/// Shared FIFO between command producers and the simulation loop
///
/// Cloning yields another handle to the same queue.
#[derive(Debug, Clone, Default)]
pub struct ControlQueue {
    inner: Arc<Mutex<VecDeque<SimCommand>>>,
}

impl ControlQueue {
    pub fn new() -> Self {
        Self::default()
    }

    // A producer that panicked mid-push cannot leave the deque inconsistent,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, VecDeque<SimCommand>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, command: SimCommand) {
        self.lock().push_back(command);
    }

    /// Take every pending command in arrival order
    pub fn drain(&self) -> Vec<SimCommand> {
        self.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
