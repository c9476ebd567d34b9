//! Systems for spawning visual entities from simulation state
//!
//! The world draws itself into a `MeshCollector`, which bakes static layers
//! into world-space meshes and keeps each car in local space so its
//! transform can follow the simulation every frame.

use std::collections::BTreeMap;

use bevy::asset::RenderAssetUsages;
use bevy::log::debug;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;

use super::components::{CarLink, RenderedScene, SceneEntity, SimWorldResource};
use super::placement_transform;
use crate::simulation::{DrawLayer, Placement, SceneRenderer, Topology, VertexBatch, ViewTransform};

/// Flattened vertex attributes for one Bevy mesh
#[derive(Default)]
pub struct MeshBuffers {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
}

impl MeshBuffers {
    fn extend(&mut self, batch: &VertexBatch) {
        let color = batch.color.to_rgba();
        self.positions
            .extend(batch.positions.iter().map(|p| p.to_array()));
        self.normals.extend(batch.normals.iter().map(|n| n.to_array()));
        self.colors
            .extend(std::iter::repeat_n(color, batch.vertex_count()));
    }

    fn into_mesh(self, topology: PrimitiveTopology) -> Option<Mesh> {
        if self.positions.is_empty() {
            return None;
        }
        Some(
            Mesh::new(topology, RenderAssetUsages::default())
                .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
                .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals)
                .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, self.colors),
        )
    }
}

/// Triangles and lines drawn with one placement
#[derive(Default)]
pub struct MeshParts {
    triangles: MeshBuffers,
    lines: MeshBuffers,
}

impl MeshParts {
    fn extend(&mut self, batch: &VertexBatch) {
        match batch.topology {
            Topology::Triangles => self.triangles.extend(batch),
            Topology::Lines => self.lines.extend(batch),
        }
    }
}

/// Renderer that turns one frame of draw calls into mesh data
#[derive(Default)]
pub struct MeshCollector {
    pub view: Option<ViewTransform>,
    scenery: MeshParts,
    cars: BTreeMap<usize, (Placement, MeshParts)>,
}

impl SceneRenderer for MeshCollector {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn set_view(&mut self, view: &ViewTransform) {
        self.view = Some(*view);
    }

    fn draw(&mut self, layer: DrawLayer, batch: &VertexBatch, placement: &Placement) {
        match layer {
            DrawLayer::Car(index) => {
                let (car_placement, parts) = self.cars.entry(index).or_default();
                *car_placement = *placement;
                parts.extend(batch);
            }
            _ => self.scenery.extend(&batch.transformed(placement)),
        }
    }

    fn present(&mut self) {}
}

/// System to rebuild the city's entities whenever the simulation's scene changes
pub fn respawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_world: Res<SimWorldResource>,
    mut rendered: ResMut<RenderedScene>,
    scene_query: Query<Entity, With<SceneEntity>>,
) {
    let world = &sim_world.0;
    if rendered.version == Some(world.scene_version()) {
        return;
    }

    for entity in scene_query.iter() {
        commands.entity(entity).despawn();
    }

    let mut collector = MeshCollector::default();
    world.render(&mut collector);

    // Vertex colours carry the look; materials only choose shading
    let solid = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.8,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    let marking = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });

    spawn_parts(
        &mut commands,
        &mut meshes,
        &solid,
        &marking,
        collector.scenery,
        Transform::IDENTITY,
        None,
    );

    let car_count = collector.cars.len();
    for (index, (placement, parts)) in collector.cars {
        spawn_parts(
            &mut commands,
            &mut meshes,
            &solid,
            &marking,
            parts,
            placement_transform(&placement),
            Some(index),
        );
    }

    rendered.version = Some(world.scene_version());
    debug!(
        "Spawned scene version {} ({} buildings, {} trees, {} cars)",
        world.scene_version(),
        world.buildings.len(),
        world.trees.len(),
        car_count
    );
}

fn spawn_parts(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    solid: &Handle<StandardMaterial>,
    marking: &Handle<StandardMaterial>,
    parts: MeshParts,
    transform: Transform,
    car: Option<usize>,
) {
    let pieces = [
        (
            parts.triangles.into_mesh(PrimitiveTopology::TriangleList),
            solid,
        ),
        (parts.lines.into_mesh(PrimitiveTopology::LineList), marking),
    ];

    for (mesh, material) in pieces {
        let Some(mesh) = mesh else {
            continue;
        };
        let mut entity = commands.spawn((
            SceneEntity,
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(material.clone()),
            transform,
        ));
        if let Some(index) = car {
            entity.insert(CarLink(index));
        }
    }
}
