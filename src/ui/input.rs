//! Input handling systems
//!
//! Keyboard and mouse gestures become `SimCommand`s on the shared queue.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;

use super::components::ControlQueueResource;
use crate::simulation::{SimCommand, SimKey};

const KEY_BINDINGS: [(KeyCode, SimKey); 18] = [
    (KeyCode::ArrowLeft, SimKey::Left),
    (KeyCode::ArrowRight, SimKey::Right),
    (KeyCode::ArrowUp, SimKey::Up),
    (KeyCode::ArrowDown, SimKey::Down),
    (KeyCode::KeyW, SimKey::W),
    (KeyCode::KeyA, SimKey::A),
    (KeyCode::KeyS, SimKey::S),
    (KeyCode::KeyD, SimKey::D),
    (KeyCode::Digit1, SimKey::Digit1),
    (KeyCode::Digit2, SimKey::Digit2),
    (KeyCode::Digit3, SimKey::Digit3),
    (KeyCode::Space, SimKey::Space),
    (KeyCode::KeyR, SimKey::R),
    (KeyCode::Equal, SimKey::Plus),
    (KeyCode::NumpadAdd, SimKey::Plus),
    (KeyCode::Minus, SimKey::Minus),
    (KeyCode::NumpadSubtract, SimKey::Minus),
    (KeyCode::Escape, SimKey::Escape),
];

/// Handle keyboard input
pub fn handle_input(keyboard: Res<ButtonInput<KeyCode>>, queue: Res<ControlQueueResource>) {
    for (code, key) in KEY_BINDINGS {
        if keyboard.just_pressed(code) {
            queue.0.push(SimCommand::Key(key));
        }
    }
}

/// Handle mouse drag (orbit) and wheel (zoom)
///
/// Gestures over control panel buttons are left to the panel.
pub fn handle_camera_mouse(
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    queue: Res<ControlQueueResource>,
    interactions: Query<&Interaction>,
) {
    if interactions.iter().any(|i| *i != Interaction::None) {
        return;
    }

    if buttons.pressed(MouseButton::Left) && motion.delta != Vec2::ZERO {
        queue.0.push(SimCommand::Drag {
            dx: motion.delta.x,
            dy: motion.delta.y,
        });
    }

    if scroll.delta.y != 0.0 {
        queue.0.push(SimCommand::Wheel(scroll.delta.y.signum()));
    }
}
