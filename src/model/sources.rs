//! Declared scene assets.
//!
//! A manifest lists every asset the world needs before it can be built.
//! `Resources` counts them down and triggers `ready` after the last one.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// How a source is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceKind {
    /// Six faces of an environment map (px, nx, py, ny, pz, nz).
    CubeTexture,
    /// A single image.
    Texture,
    /// A glTF scene with its animations.
    GltfModel,
}

impl SourceKind {
    /// Number of paths a source of this kind must declare.
    pub fn expected_paths(&self) -> usize {
        match self {
            SourceKind::CubeTexture => 6,
            SourceKind::Texture | SourceKind::GltfModel => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::CubeTexture => "cubeTexture",
            SourceKind::Texture => "texture",
            SourceKind::GltfModel => "gltfModel",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the asset manifest.
///
/// In JSON, `path` may be a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    #[serde(rename = "path", deserialize_with = "one_or_many")]
    pub paths: Vec<String>,
}

impl Source {
    pub fn new(name: &str, kind: SourceKind, paths: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind,
            paths: paths.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Checks the name is set and the path count matches the kind.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.name.trim().is_empty() {
            return Err(ManifestError::EmptyName);
        }
        let expected = self.kind.expected_paths();
        if self.paths.len() != expected {
            return Err(ManifestError::PathCount {
                name: self.name.clone(),
                kind: self.kind,
                expected,
                found: self.paths.len(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    #[error("source without a name")]
    EmptyName,

    #[error("source {name:?} ({kind}) needs {expected} path(s), found {found}")]
    PathCount {
        name: String,
        kind: SourceKind,
        expected: usize,
        found: usize,
    },

    #[error("source {0:?} is declared more than once")]
    Duplicate(String),
}

/// Validate every source and reject duplicate names.
pub fn validate_manifest(sources: &[Source]) -> Result<(), ManifestError> {
    let mut seen = HashSet::with_capacity(sources.len());
    for source in sources {
        source.validate()?;
        if !seen.insert(source.name.as_str()) {
            return Err(ManifestError::Duplicate(source.name.clone()));
        }
    }
    Ok(())
}

/// Assets of the demo scene: environment map, floor textures and the fox.
pub fn default_sources() -> Vec<Source> {
    vec![
        Source::new(
            "environmentMapTexture",
            SourceKind::CubeTexture,
            &[
                "/assets/textures/environmentMaps/0/px.jpg",
                "/assets/textures/environmentMaps/0/nx.jpg",
                "/assets/textures/environmentMaps/0/py.jpg",
                "/assets/textures/environmentMaps/0/ny.jpg",
                "/assets/textures/environmentMaps/0/pz.jpg",
                "/assets/textures/environmentMaps/0/nz.jpg",
            ],
        ),
        Source::new(
            "grassColorTexture",
            SourceKind::Texture,
            &["/assets/textures/dirt/color.jpg"],
        ),
        Source::new(
            "grassNormalTexture",
            SourceKind::Texture,
            &["/assets/textures/dirt/normal.jpg"],
        ),
        Source::new(
            "foxModel",
            SourceKind::GltfModel,
            &["/assets/models/Fox/glTF/Fox.gltf"],
        ),
    ]
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(path) => vec![path],
        OneOrMany::Many(paths) => paths,
    })
}
