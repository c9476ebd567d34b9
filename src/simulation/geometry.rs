//! Shape emission
//!
//! Pure functions turning dimensions and positions into coloured vertex
//! batches. A renderer only needs to know how to draw a triangle list or a
//! line list with per-vertex normals.

use std::f32::consts::{PI, TAU};

use super::building::{
    SimBuilding, SimTree, TREE_FOLIAGE_COLOR, TREE_FOLIAGE_RADIUS, TREE_TRUNK_COLOR,
    TREE_TRUNK_HEIGHT, TREE_TRUNK_RADIUS,
};
use super::car::{SimCar, CAR_HEIGHT, CAR_LENGTH, CAR_WIDTH};
use super::road_network::RoadNetwork;
use super::types::{Placement, Position, Rgb, LINE_ELEVATION, ROAD_ELEVATION};

pub const GROUND_HALF_SIZE: f32 = 200.0;
pub const GROUND_COLOR: Rgb = Rgb(0.2, 0.5, 0.2);
pub const ROAD_COLOR: Rgb = Rgb(0.2, 0.2, 0.2);
pub const ROAD_EDGE_COLOR: Rgb = Rgb(0.95, 0.95, 0.95);
pub const ROAD_CENTERLINE_COLOR: Rgb = Rgb(0.9, 0.9, 0.0);
/// Centerline dashes are this long, with an equal gap after each
pub const DASH_LENGTH: f32 = 1.0;
const ROUND_SEGMENTS: usize = 16;

const UP: Position = Position {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Every three vertices form a triangle
    Triangles,
    /// Every two vertices form a line segment
    Lines,
}

/// A single-coloured run of vertices with normals
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBatch {
    pub topology: Topology,
    pub color: Rgb,
    pub positions: Vec<Position>,
    pub normals: Vec<Position>,
}

impl VertexBatch {
    pub fn new(topology: Topology, color: Rgb) -> Self {
        Self {
            topology,
            color,
            positions: Vec::new(),
            normals: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn push(&mut self, position: Position, normal: Position) {
        self.positions.push(position);
        self.normals.push(normal);
    }

    /// Counter-clockwise quad split into two triangles
    pub fn push_quad(&mut self, corners: [Position; 4], normal: Position) {
        let [a, b, c, d] = corners;
        for vertex in [a, b, c, a, c, d] {
            self.push(vertex, normal);
        }
    }

    pub fn push_line(&mut self, from: Position, to: Position) {
        self.push(from, UP);
        self.push(to, UP);
    }

    /// Copy of the batch moved into world space
    pub fn transformed(&self, placement: &Placement) -> VertexBatch {
        VertexBatch {
            topology: self.topology,
            color: self.color,
            positions: self.positions.iter().map(|p| placement.apply(*p)).collect(),
            normals: self
                .normals
                .iter()
                .map(|n| placement.apply_direction(*n))
                .collect(),
        }
    }
}

/// Axis-aligned box around `center` with full extents `(width, height, depth)`
pub fn box_batch(center: Position, width: f32, height: f32, depth: f32, color: Rgb) -> VertexBatch {
    let (w, h, d) = (width / 2.0, height / 2.0, depth / 2.0);
    let corner = |x: f32, y: f32, z: f32| center.offset(x, y, z);
    let mut batch = VertexBatch::new(Topology::Triangles, color);

    // front, back, left, right, top, bottom
    batch.push_quad(
        [corner(-w, -h, d), corner(w, -h, d), corner(w, h, d), corner(-w, h, d)],
        Position::new(0.0, 0.0, 1.0),
    );
    batch.push_quad(
        [corner(-w, -h, -d), corner(-w, h, -d), corner(w, h, -d), corner(w, -h, -d)],
        Position::new(0.0, 0.0, -1.0),
    );
    batch.push_quad(
        [corner(-w, -h, -d), corner(-w, -h, d), corner(-w, h, d), corner(-w, h, -d)],
        Position::new(-1.0, 0.0, 0.0),
    );
    batch.push_quad(
        [corner(w, -h, -d), corner(w, h, -d), corner(w, h, d), corner(w, -h, d)],
        Position::new(1.0, 0.0, 0.0),
    );
    batch.push_quad(
        [corner(-w, h, -d), corner(-w, h, d), corner(w, h, d), corner(w, h, -d)],
        UP,
    );
    batch.push_quad(
        [corner(-w, -h, -d), corner(w, -h, -d), corner(w, -h, d), corner(-w, -h, d)],
        Position::new(0.0, -1.0, 0.0),
    );
    batch
}

/// Flat square on `y = 0`
pub fn ground_batch(half_size: f32, color: Rgb) -> VertexBatch {
    let s = half_size;
    let mut batch = VertexBatch::new(Topology::Triangles, color);
    batch.push_quad(
        [
            Position::new(-s, 0.0, s),
            Position::new(s, 0.0, s),
            Position::new(s, 0.0, -s),
            Position::new(-s, 0.0, -s),
        ],
        UP,
    );
    batch
}

/// Surface, edge lines and dashed centerline for every road in the network
///
/// Returns the asphalt as one triangle batch followed by the edge and
/// centerline markings as line batches.
pub fn road_batches(network: &RoadNetwork) -> Vec<VertexBatch> {
    let mut surface = VertexBatch::new(Topology::Triangles, ROAD_COLOR);
    let mut edges = VertexBatch::new(Topology::Lines, ROAD_EDGE_COLOR);
    let mut centerline = VertexBatch::new(Topology::Lines, ROAD_CENTERLINE_COLOR);

    let half_length = network.half_length();
    let half_width = network.road_width / 2.0;

    // Roads are emitted in road-local (along, across) coordinates and mapped
    // to world axes by orientation.
    let roads = network
        .horizontal()
        .iter()
        .map(|&z| (z, true))
        .chain(network.vertical().iter().map(|&x| (x, false)));

    for (offset, along_x) in roads {
        let at = |along: f32, across: f32, y: f32| {
            if along_x {
                Position::new(along, y, offset + across)
            } else {
                Position::new(offset + across, y, along)
            }
        };

        let corners = [
            at(-half_length, -half_width, ROAD_ELEVATION),
            at(half_length, -half_width, ROAD_ELEVATION),
            at(half_length, half_width, ROAD_ELEVATION),
            at(-half_length, half_width, ROAD_ELEVATION),
        ];
        if along_x {
            surface.push_quad([corners[3], corners[2], corners[1], corners[0]], UP);
        } else {
            surface.push_quad(corners, UP);
        }

        for side in [-half_width, half_width] {
            edges.push_line(
                at(-half_length, side, LINE_ELEVATION),
                at(half_length, side, LINE_ELEVATION),
            );
        }

        let dash_count = (network.road_length / (2.0 * DASH_LENGTH)) as usize;
        for i in 0..dash_count {
            let start = -half_length + i as f32 * 2.0 * DASH_LENGTH;
            let end = start + DASH_LENGTH;
            if end <= half_length {
                centerline.push_line(at(start, 0.0, LINE_ELEVATION), at(end, 0.0, LINE_ELEVATION));
            }
        }
    }

    vec![surface, edges, centerline]
}

/// Upright capped cylinder standing on `base`
pub fn cylinder_batch(base: Position, radius: f32, height: f32, color: Rgb) -> VertexBatch {
    let mut batch = VertexBatch::new(Topology::Triangles, color);
    let top = base.offset(0.0, height, 0.0);

    for i in 0..ROUND_SEGMENTS {
        let a0 = TAU * i as f32 / ROUND_SEGMENTS as f32;
        let a1 = TAU * (i + 1) as f32 / ROUND_SEGMENTS as f32;
        let (n0, n1) = (
            Position::new(a0.cos(), 0.0, a0.sin()),
            Position::new(a1.cos(), 0.0, a1.sin()),
        );
        let rim = |n: Position, y: f32| base.offset(n.x * radius, y, n.z * radius);

        let (b0, b1, t0, t1) = (rim(n0, 0.0), rim(n1, 0.0), rim(n0, height), rim(n1, height));
        batch.push(b0, n0);
        batch.push(t1, n1);
        batch.push(b1, n1);
        batch.push(b0, n0);
        batch.push(t0, n0);
        batch.push(t1, n1);

        batch.push(top, UP);
        batch.push(t1, UP);
        batch.push(t0, UP);
    }
    batch
}

/// UV sphere around `center`
pub fn sphere_batch(center: Position, radius: f32, color: Rgb) -> VertexBatch {
    let mut batch = VertexBatch::new(Topology::Triangles, color);
    let stacks = ROUND_SEGMENTS;
    let slices = ROUND_SEGMENTS;

    let direction = |stack: usize, slice: usize| {
        let phi = -PI / 2.0 + PI * stack as f32 / stacks as f32;
        let theta = TAU * slice as f32 / slices as f32;
        Position::new(phi.cos() * theta.cos(), phi.sin(), phi.cos() * theta.sin())
    };

    for stack in 0..stacks {
        for slice in 0..slices {
            let quad = [
                direction(stack, slice),
                direction(stack, slice + 1),
                direction(stack + 1, slice + 1),
                direction(stack + 1, slice),
            ];
            for index in [0, 2, 1, 0, 3, 2] {
                let n = quad[index];
                batch.push(center.offset(n.x * radius, n.y * radius, n.z * radius), n);
            }
        }
    }
    batch
}

pub fn building_batch(building: &SimBuilding) -> VertexBatch {
    box_batch(
        Position::new(building.x, building.center_y(), building.z),
        building.width,
        building.height,
        building.depth,
        building.color,
    )
}

/// Trunk and foliage, in world space
pub fn tree_batches(tree: &SimTree) -> Vec<VertexBatch> {
    let base = Position::new(tree.x, 0.0, tree.z);
    vec![
        cylinder_batch(base, TREE_TRUNK_RADIUS, TREE_TRUNK_HEIGHT, TREE_TRUNK_COLOR),
        sphere_batch(
            base.offset(0.0, tree.foliage_center_y(), 0.0),
            TREE_FOLIAGE_RADIUS,
            TREE_FOLIAGE_COLOR,
        ),
    ]
}

/// Body and cab in car-local space, length along +Z
///
/// Place the result with [`SimCar::placement`].
pub fn car_batches(car: &SimCar) -> Vec<VertexBatch> {
    let body = box_batch(Position::default(), CAR_WIDTH, CAR_HEIGHT, CAR_LENGTH, car.color);
    let cab = box_batch(
        Position::new(0.0, CAR_HEIGHT * 0.6, -CAR_LENGTH * 0.15),
        CAR_WIDTH * 0.9,
        CAR_HEIGHT * 0.6,
        CAR_LENGTH * 0.5,
        car.color.scaled(0.7),
    );
    vec![body, cab]
}
