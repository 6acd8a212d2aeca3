//! Static triangle geometry decoded from a binary glTF (GLB) asset.
//!
//! Only what the showcase draws is read: positions, normals and base-colour
//! factors of every triangle primitive in the default scene, with node
//! transforms baked in, plus the first camera node if the asset carries one.

use crate::error::AssetError;
use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::MAX),
            max: Vec3::splat(f32::MIN),
        }
    }

    fn grow(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn radius(&self) -> f32 {
        (self.max - self.min).length() * 0.5
    }
}

/// Camera authored in the asset, resolved to world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AssetCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov: f32,
}

#[derive(Clone, Debug)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub bounds: Aabb,
    pub camera: Option<AssetCamera>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

pub fn decode_glb(bytes: &[u8]) -> Result<MeshData, AssetError> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let blob = gltf.blob.as_deref();

    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or(AssetError::NoGeometry)?;

    let mut out = MeshData {
        vertices: Vec::new(),
        indices: Vec::new(),
        bounds: Aabb::empty(),
        camera: None,
    };
    let mut cameras: Vec<(Mat4, f32)> = Vec::new();

    let mut stack: Vec<(gltf::Node, Mat4)> =
        scene.nodes().map(|n| (n, Mat4::IDENTITY)).collect();
    while let Some((node, parent)) = stack.pop() {
        let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
        if let Some(mesh) = node.mesh() {
            for primitive in mesh.primitives() {
                if primitive.mode() != gltf::mesh::Mode::Triangles {
                    continue;
                }
                append_primitive(&mut out, &primitive, world, blob)?;
            }
        }
        if let Some(camera) = node.camera() {
            if let gltf::camera::Projection::Perspective(p) = camera.projection() {
                cameras.push((world, p.yfov().to_degrees()));
            }
        }
        for child in node.children() {
            stack.push((child, world));
        }
    }

    if out.indices.is_empty() {
        return Err(AssetError::NoGeometry);
    }
    out.camera = cameras.first().map(|&(world, fov)| {
        let position = world.transform_point3(Vec3::ZERO);
        let forward = world.transform_vector3(Vec3::NEG_Z).normalize_or_zero();
        let distance = (out.bounds.center() - position).length().max(0.1);
        AssetCamera {
            position,
            target: position + forward * distance,
            fov,
        }
    });
    log::info!(
        "[asset] {} vertices, {} triangles, camera={}",
        out.vertices.len(),
        out.triangle_count(),
        out.camera.is_some()
    );
    Ok(out)
}

fn append_primitive(
    out: &mut MeshData,
    primitive: &gltf::Primitive,
    world: Mat4,
    blob: Option<&[u8]>,
) -> Result<(), AssetError> {
    let needs_bin = primitive
        .attributes()
        .any(|(_, accessor)| accessor.view().is_some());
    if needs_bin && blob.is_none() {
        return Err(AssetError::MissingBuffer);
    }
    let reader = primitive.reader(|buffer| match buffer.source() {
        gltf::buffer::Source::Bin => blob,
        gltf::buffer::Source::Uri(_) => None,
    });
    let Some(positions) = reader.read_positions() else {
        return Ok(());
    };
    let positions: Vec<Vec3> = positions.map(Vec3::from).collect();
    let normals: Option<Vec<Vec3>> = reader.read_normals().map(|n| n.map(Vec3::from).collect());
    let indices: Vec<u32> = match reader.read_indices() {
        Some(ix) => ix.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    let color = primitive
        .material()
        .pbr_metallic_roughness()
        .base_color_factor();
    let normal_matrix = Mat3::from_mat4(world).inverse().transpose();

    match normals {
        Some(normals) if normals.len() == positions.len() => {
            let base = out.vertices.len() as u32;
            for (p, n) in positions.iter().zip(&normals) {
                let wp = world.transform_point3(*p);
                out.bounds.grow(wp);
                out.vertices.push(MeshVertex {
                    position: wp.to_array(),
                    normal: (normal_matrix * *n).normalize_or_zero().to_array(),
                    color,
                });
            }
            let in_range = |tri: &&[u32]| tri.iter().all(|&i| (i as usize) < positions.len());
            out.indices.extend(
                indices
                    .chunks_exact(3)
                    .filter(in_range)
                    .flatten()
                    .map(|i| base + i),
            );
        }
        _ => {
            // no normals: unshare vertices and use the face normal
            for tri in indices.chunks_exact(3) {
                let Some(corners) = tri
                    .iter()
                    .map(|&i| positions.get(i as usize).map(|p| world.transform_point3(*p)))
                    .collect::<Option<Vec<Vec3>>>()
                else {
                    continue;
                };
                let n = (corners[1] - corners[0])
                    .cross(corners[2] - corners[0])
                    .normalize_or_zero();
                for c in corners {
                    out.bounds.grow(c);
                    out.indices.push(out.vertices.len() as u32);
                    out.vertices.push(MeshVertex {
                        position: c.to_array(),
                        normal: n.to_array(),
                        color,
                    });
                }
            }
        }
    }
    Ok(())
}
