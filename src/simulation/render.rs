//! Rendering seam
//!
//! The simulation never talks to a graphics API. It hands batches to a
//! `SceneRenderer`, which may be a GPU front end, a mesh collector or the
//! recording `FrameStats` used headless.

use super::camera::ViewTransform;
use super::geometry::VertexBatch;
use super::types::Placement;

/// What a draw call belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawLayer {
    Ground,
    Road,
    Building,
    Tree,
    /// Index into the world's car list
    Car(usize),
}

impl DrawLayer {
    /// Static layers only change when the city is regenerated or edited
    pub fn is_static(&self) -> bool {
        !matches!(self, DrawLayer::Car(_))
    }
}

pub trait SceneRenderer {
    fn clear(&mut self);
    fn set_view(&mut self, view: &ViewTransform);
    /// `batch` is expressed in local space and positioned by `placement`
    fn draw(&mut self, layer: DrawLayer, batch: &VertexBatch, placement: &Placement);
    fn present(&mut self);
}

/// Renderer that only records what it was asked to draw
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    pub frames_presented: u64,
    pub view: Option<ViewTransform>,
    /// Layers drawn since the last `clear`, in call order
    pub draws: Vec<DrawLayer>,
    /// Vertices submitted since the last `clear`
    pub vertices: usize,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw_calls(&self) -> usize {
        self.draws.len()
    }

    pub fn count(&self, predicate: impl Fn(&DrawLayer) -> bool) -> usize {
        self.draws.iter().filter(|layer| predicate(layer)).count()
    }
}

impl SceneRenderer for FrameStats {
    fn clear(&mut self) {
        self.draws.clear();
        self.vertices = 0;
        self.view = None;
    }

    fn set_view(&mut self, view: &ViewTransform) {
        self.view = Some(*view);
    }

    fn draw(&mut self, layer: DrawLayer, batch: &VertexBatch, _placement: &Placement) {
        self.draws.push(layer);
        self.vertices += batch.vertex_count();
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}
