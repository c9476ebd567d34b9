//! In-window control panel: animation toggle, speed, view presets and regeneration

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use super::components::{ControlQueueResource, PanelButton, PanelText, SimWorldResource};
use crate::simulation::{SimCommand, SimWorld, ViewPreset};

const SPEED_STEP: f32 = 0.1;
const RUNNING_COLOR: Color = Color::srgb(0.7, 0.2, 0.2);
const STOPPED_COLOR: Color = Color::srgb(0.2, 0.6, 0.2);
const BUTTON_COLOR: Color = Color::srgb(0.3, 0.3, 0.35);

/// System to setup the control panel at the top-left of the window
pub fn setup_control_panel(mut commands: Commands, sim_world: Res<SimWorldResource>) {
    let world = &sim_world.0;

    commands
        .spawn((
            Node {
                width: Val::Px(260.0),
                height: Val::Auto,
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("City Controls"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            parent.spawn((
                Text::new(
                    "Drag: orbit  Wheel: zoom\nArrows: rotate  WASD: pan\n1/2/3: views  Space: pause  R: regenerate",
                ),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
            ));

            spawn_panel_button(
                parent,
                PanelButton::ToggleAnimation,
                toggle_label(world),
                toggle_color(world),
                Some(PanelText::ToggleLabel),
            );

            parent.spawn((
                PanelText::Speed,
                Text::new(speed_label(world)),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 0.5)),
            ));

            parent
                .spawn(Node {
                    column_gap: Val::Px(6.0),
                    ..default()
                })
                .with_children(|row| {
                    spawn_panel_button(row, PanelButton::SlowDown, "Slower", BUTTON_COLOR, None);
                    spawn_panel_button(row, PanelButton::SpeedUp, "Faster", BUTTON_COLOR, None);
                });

            parent
                .spawn(Node {
                    column_gap: Val::Px(6.0),
                    ..default()
                })
                .with_children(|row| {
                    for preset in ViewPreset::ALL {
                        spawn_panel_button(
                            row,
                            PanelButton::View(preset),
                            preset.label(),
                            BUTTON_COLOR,
                            None,
                        );
                    }
                });

            spawn_panel_button(
                parent,
                PanelButton::Regenerate,
                "Regenerate City",
                Color::srgb(0.3, 0.4, 0.6),
                None,
            );

            parent.spawn((
                PanelText::City,
                Text::new(city_label(world)),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
            ));
        });
}

fn spawn_panel_button(
    parent: &mut ChildSpawnerCommands,
    button: PanelButton,
    text: &str,
    color: Color,
    label: Option<PanelText>,
) {
    parent
        .spawn((
            button,
            Button,
            Node {
                padding: UiRect::all(Val::Px(6.0)),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderColor::all(Color::WHITE),
            BackgroundColor(color),
        ))
        .with_children(|button| {
            let mut text = button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            if let Some(label) = label {
                text.insert(label);
            }
        });
}

/// System to turn panel clicks into simulation commands
pub fn handle_panel_buttons(
    sim_world: Res<SimWorldResource>,
    queue: Res<ControlQueueResource>,
    mut interaction_query: Query<
        (&Interaction, &PanelButton, &mut BorderColor),
        Changed<Interaction>,
    >,
) {
    for (interaction, button, mut border_color) in interaction_query.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                let speed = sim_world.0.speed_multiplier();
                let command = match *button {
                    PanelButton::ToggleAnimation => SimCommand::ToggleAnimation,
                    PanelButton::SlowDown => SimCommand::SetSpeed(speed - SPEED_STEP),
                    PanelButton::SpeedUp => SimCommand::SetSpeed(speed + SPEED_STEP),
                    PanelButton::View(preset) => SimCommand::SetView(preset),
                    PanelButton::Regenerate => SimCommand::Regenerate,
                };
                queue.0.push(command);
            }
            Interaction::Hovered => {
                *border_color = BorderColor::all(Color::srgb(1.0, 1.0, 0.0));
            }
            Interaction::None => {
                *border_color = BorderColor::all(Color::WHITE);
            }
        }
    }
}

/// System to keep panel labels in step with the simulation
pub fn update_panel_text(
    sim_world: Res<SimWorldResource>,
    mut text_query: Query<(&PanelText, &mut Text)>,
    mut button_query: Query<(&PanelButton, &mut BackgroundColor)>,
) {
    if !sim_world.is_changed() {
        return;
    }
    let world = &sim_world.0;

    for (kind, mut text) in text_query.iter_mut() {
        let label = match kind {
            PanelText::ToggleLabel => toggle_label(world).to_string(),
            PanelText::Speed => speed_label(world),
            PanelText::City => city_label(world),
        };
        if **text != label {
            **text = label;
        }
    }

    for (button, mut bg_color) in button_query.iter_mut() {
        if *button == PanelButton::ToggleAnimation {
            bg_color.0 = toggle_color(world);
        }
    }
}

fn toggle_label(world: &SimWorld) -> &'static str {
    if world.paused {
        "Start Animation"
    } else {
        "Stop Animation"
    }
}

fn toggle_color(world: &SimWorld) -> Color {
    if world.paused {
        STOPPED_COLOR
    } else {
        RUNNING_COLOR
    }
}

fn speed_label(world: &SimWorld) -> String {
    format!("Car Speed: {:.1}x", world.speed_multiplier())
}

fn city_label(world: &SimWorld) -> String {
    format!(
        "Buildings: {}  Trees: {}  Cars: {}",
        world.buildings.len(),
        world.trees.len(),
        world.cars.len()
    )
}
