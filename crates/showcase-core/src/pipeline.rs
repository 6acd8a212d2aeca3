//! Rendering-pipeline extensions and the pass graph compiled from them.
//!
//! Plugins are registered one at a time; each registration is validated
//! against what is already present. Refreshing compiles the plugins into an
//! ordered list of render passes: later plugins compose over the output of
//! earlier ones, so registration order is visible in the final image.

use crate::error::PipelineError;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TonemapConfig {
    /// Derive exposure from scene luminance.
    pub adaptive: bool,
    /// Leave background pixels untouched by tone mapping.
    pub clip_background: bool,
    pub exposure: f32,
}

impl TonemapConfig {
    pub fn new(adaptive: bool) -> Self {
        Self {
            adaptive,
            clip_background: true,
            exposure: crate::constants::TONEMAP_EXPOSURE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PluginKind {
    AssetManager,
    GBuffer,
    Progressive,
    Tonemap,
    GammaCorrection,
    Ssr,
    Ssao,
    Bloom,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Plugin {
    AssetManager,
    GBuffer,
    Progressive { max_samples: u32 },
    Tonemap(TonemapConfig),
    GammaCorrection,
    Ssr,
    Ssao,
    Bloom,
}

impl Plugin {
    pub fn kind(&self) -> PluginKind {
        match self {
            Plugin::AssetManager => PluginKind::AssetManager,
            Plugin::GBuffer => PluginKind::GBuffer,
            Plugin::Progressive { .. } => PluginKind::Progressive,
            Plugin::Tonemap(_) => PluginKind::Tonemap,
            Plugin::GammaCorrection => PluginKind::GammaCorrection,
            Plugin::Ssr => PluginKind::Ssr,
            Plugin::Ssao => PluginKind::Ssao,
            Plugin::Bloom => PluginKind::Bloom,
        }
    }

    fn requires(&self) -> &'static [PluginKind] {
        match self {
            Plugin::Ssr | Plugin::Ssao => &[PluginKind::GBuffer],
            _ => &[],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pass {
    /// Geometry into HDR colour (and the normal/depth buffer when enabled).
    Scene { gbuffer: bool },
    Ssao,
    Ssr,
    Progressive { max_samples: u32 },
    Tonemap(TonemapConfig),
    Gamma,
    Bloom,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PassGraph {
    pub passes: SmallVec<[Pass; 8]>,
    pub revision: u64,
}

#[derive(Debug, Default)]
pub struct Pipeline {
    plugins: Vec<Plugin>,
    graph: PassGraph,
    stale: bool,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_plugin(&mut self, plugin: Plugin) -> Result<(), PipelineError> {
        let kind = plugin.kind();
        if self.has(kind) {
            return Err(PipelineError::Duplicate(kind));
        }
        if let Some(&missing) = plugin.requires().iter().find(|k| !self.has(**k)) {
            return Err(PipelineError::MissingDependency {
                plugin: kind,
                missing,
            });
        }
        log::info!("[pipeline] +{:?}", plugin);
        self.plugins.push(plugin);
        self.stale = true;
        Ok(())
    }

    pub fn has(&self, kind: PluginKind) -> bool {
        self.plugins.iter().any(|p| p.kind() == kind)
    }

    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    pub fn get_plugin(&self, kind: PluginKind) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.kind() == kind)
    }

    /// Mutable access to a plugin's configuration; the graph is recompiled on
    /// the next [`Pipeline::pass_graph`] call.
    pub fn get_plugin_mut(&mut self, kind: PluginKind) -> Option<&mut Plugin> {
        let found = self.plugins.iter_mut().find(|p| p.kind() == kind);
        if found.is_some() {
            self.stale = true;
        }
        found
    }

    pub fn tonemap_mut(&mut self) -> Option<&mut TonemapConfig> {
        match self.get_plugin_mut(PluginKind::Tonemap) {
            Some(Plugin::Tonemap(cfg)) => Some(cfg),
            _ => None,
        }
    }

    pub fn max_samples(&self) -> u32 {
        match self.get_plugin(PluginKind::Progressive) {
            Some(Plugin::Progressive { max_samples }) => *max_samples,
            _ => 1,
        }
    }

    /// Forces a rebuild of the pass graph.
    pub fn refresh(&mut self) -> &PassGraph {
        let mut passes = SmallVec::new();
        passes.push(Pass::Scene {
            gbuffer: self.has(PluginKind::GBuffer),
        });
        for plugin in &self.plugins {
            match plugin {
                Plugin::AssetManager | Plugin::GBuffer => {}
                Plugin::Progressive { max_samples } => passes.push(Pass::Progressive {
                    max_samples: *max_samples,
                }),
                Plugin::Tonemap(cfg) => passes.push(Pass::Tonemap(*cfg)),
                Plugin::GammaCorrection => passes.push(Pass::Gamma),
                Plugin::Ssr => passes.push(Pass::Ssr),
                Plugin::Ssao => passes.push(Pass::Ssao),
                Plugin::Bloom => passes.push(Pass::Bloom),
            }
        }
        self.graph = PassGraph {
            passes,
            revision: self.graph.revision + 1,
        };
        self.stale = false;
        log::debug!("[pipeline] refreshed: {:?}", self.graph.passes);
        &self.graph
    }

    pub fn pass_graph(&mut self) -> &PassGraph {
        if self.stale {
            self.refresh();
        }
        &self.graph
    }

    /// Last compiled graph, without recompiling.
    pub fn compiled(&self) -> &PassGraph {
        &self.graph
    }
}
