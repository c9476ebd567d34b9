//! Console control panel
//!
//! Runs its own read loop, independent of the simulation loop, and talks to
//! it only through a `ControlQueue`.

use std::io::{self, BufRead, Write};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::simulation::{ControlQueue, SimCommand};

const HELP: &str = "\
commands:
  toggle                     pause or resume the cars
  speed <0-3>                set the car speed multiplier
  view <top|street|45>       jump to a camera preset
  add <x> <z> <w> <d> <h>    add a building (w,d in (0,10], h in (0,30], |x|,|z| <= 30)
  drag <dx> <dy>             orbit the camera
  wheel <notches>            zoom the camera
  regenerate                 build a new random city
  quit                       stop the simulation";

/// Read commands from `input` until it closes or `quit` is entered
///
/// Accepted commands are queued; parse and validation errors are reported
/// on `output` and nothing is queued for them.
pub fn run_control_panel<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    queue: &ControlQueue,
) -> Result<()> {
    writeln!(output, "City control panel ready, type `help` for commands")?;

    for line in input.lines() {
        let line = line.context("Failed to read control panel input")?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("help") {
            writeln!(output, "{HELP}")?;
            continue;
        }

        match trimmed.parse::<SimCommand>() {
            Ok(command) => {
                debug!("Control panel queued {:?}", command);
                queue.push(command);
                writeln!(output, "ok")?;
                if command == SimCommand::Quit {
                    break;
                }
            }
            Err(e) => {
                writeln!(output, "error: {e:#}")?;
            }
        }
    }

    Ok(())
}

/// Run the control panel on stdin/stdout in a background thread
pub fn spawn_control_panel(queue: ControlQueue) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("control-panel".into())
        .spawn(move || {
            let stdin = io::stdin();
            if let Err(e) = run_control_panel(stdin.lock(), io::stdout(), &queue) {
                warn!("Control panel stopped: {:#}", e);
            }
        })
        .context("Failed to start control panel thread")
}
