use crate::pipeline::PluginKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error("plugin {0:?} is already registered")]
    Duplicate(PluginKind),
    #[error("plugin {plugin:?} requires {missing:?} to be registered first")]
    MissingDependency {
        plugin: PluginKind,
        missing: PluginKind,
    },
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("HTTP {status} while fetching {path}")]
    Http { status: u16, path: String },
    #[error("asset stream failed: {0}")]
    Stream(String),
    #[error("malformed glTF binary: {0}")]
    Malformed(#[from] gltf::Error),
    #[error("asset has no embedded binary buffer")]
    MissingBuffer,
    #[error("asset contains no triangle geometry")]
    NoGeometry,
    #[error("viewer has no asset manager plugin")]
    NoAssetManager,
}

#[derive(Debug, Error, PartialEq)]
pub enum TriggerError {
    #[error("invalid anchor {0:?}, expected \"<element edge> <viewport edge>\"")]
    InvalidAnchor(String),
}

#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Trigger(#[from] TriggerError),
}
