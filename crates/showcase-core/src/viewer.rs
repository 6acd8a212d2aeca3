use crate::asset::MeshData;
use crate::camera::CameraState;
use crate::error::{AssetError, PipelineError};
use crate::pipeline::{PassGraph, Pipeline, Plugin, PluginKind};
use crate::tween::{Animatable, Property};
use glam::{Mat4, Vec2, Vec3};
use std::rc::Rc;

/// Transform of the scene graph root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneRoot {
    pub position: Vec3,
    pub scale: Vec3,
}

impl Default for SceneRoot {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl SceneRoot {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_scale(self.scale)
    }
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub view: Mat4,
    pub projection: Mat4,
    pub model: Mat4,
    pub eye: Vec3,
    /// 0 right after any change; counts still frames up to `max_samples`.
    pub sample_index: u32,
    pub max_samples: u32,
    /// Sub-pixel offset in pixels, within [-0.5, 0.5].
    pub jitter: Vec2,
}

pub struct Viewer {
    pub camera: CameraState,
    pub scene: SceneRoot,
    pipeline: Pipeline,
    asset: Option<Rc<MeshData>>,
    asset_revision: u64,
    dirty: bool,
    sample_index: u32,
}

impl Viewer {
    pub fn new(camera: CameraState) -> Self {
        Self {
            camera,
            scene: SceneRoot::default(),
            pipeline: Pipeline::new(),
            asset: None,
            asset_revision: 0,
            dirty: true,
            sample_index: 0,
        }
    }

    pub fn add_plugin(&mut self, plugin: Plugin) -> Result<(), PipelineError> {
        self.pipeline.add_plugin(plugin)?;
        self.set_dirty();
        Ok(())
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        self.set_dirty();
        &mut self.pipeline
    }

    pub fn refresh_pipeline(&mut self) -> &PassGraph {
        self.dirty = true;
        self.pipeline.refresh()
    }

    pub fn pass_graph(&mut self) -> &PassGraph {
        self.pipeline.pass_graph()
    }

    /// Restart progressive accumulation on the next frame.
    pub fn set_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Installs decoded geometry as the scene content.
    pub fn add_asset(&mut self, mesh: MeshData) -> Result<(), AssetError> {
        if !self.pipeline.has(PluginKind::AssetManager) {
            return Err(AssetError::NoAssetManager);
        }
        self.asset = Some(Rc::new(mesh));
        self.asset_revision += 1;
        self.set_dirty();
        Ok(())
    }

    pub fn asset(&self) -> Option<&Rc<MeshData>> {
        self.asset.as_ref()
    }

    pub fn asset_revision(&self) -> u64 {
        self.asset_revision
    }

    pub fn has_asset(&self) -> bool {
        self.asset.is_some()
    }

    /// Consumes the dirty flag and advances the progressive sample counter.
    pub fn begin_frame(&mut self) -> FrameSnapshot {
        let max_samples = self.pipeline.max_samples().max(1);
        if self.dirty {
            self.dirty = false;
            self.sample_index = 0;
        } else if self.sample_index < max_samples {
            self.sample_index += 1;
        }
        FrameSnapshot {
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
            model: self.scene.matrix(),
            eye: self.camera.position,
            sample_index: self.sample_index,
            max_samples,
            jitter: jitter(self.sample_index),
        }
    }
}

impl Animatable for Viewer {
    fn read(&self, property: Property) -> Vec3 {
        match property {
            Property::ScenePosition => self.scene.position,
            Property::SceneScale => self.scene.scale,
            Property::CameraFov => Vec3::splat(self.camera.fov),
            Property::LoaderOffset => Vec3::ZERO,
        }
    }

    fn write(&mut self, property: Property, value: Vec3) {
        match property {
            Property::ScenePosition => self.scene.position = value,
            Property::SceneScale => self.scene.scale = value,
            Property::CameraFov => self.camera.fov = value.x.max(0.0),
            Property::LoaderOffset => {}
        }
    }
}

fn halton(mut index: u32, base: u32) -> f32 {
    let mut f = 1.0;
    let mut r = 0.0;
    while index > 0 {
        f /= base as f32;
        r += f * (index % base) as f32;
        index /= base;
    }
    r
}

/// Halton (2, 3) sub-pixel jitter for progressive sample `index`; the first
/// sample is unjittered.
pub fn jitter(index: u32) -> Vec2 {
    if index == 0 {
        return Vec2::ZERO;
    }
    Vec2::new(halton(index, 2) - 0.5, halton(index, 3) - 0.5)
}
