//! Latitude/longitude sphere tessellation.
//!
//! Meshes are flat `f32` vertex lists with interleaved attributes, ready to
//! be written into an `ARRAY_BUFFER` and drawn with `drawArrays`.

use std::f32::consts::PI;

use anyhow::bail;
use glam::{vec3, Vec3};

pub const MIN_SEGMENTS: u32 = 3;
pub const MAX_SEGMENTS: u32 = 512;

/// One float attribute inside an interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: &'static str,
    /// Number of floats.
    pub size: i32,
    /// Byte offset from the start of the vertex.
    pub offset: i32,
}

#[derive(Debug, PartialEq, Eq)]
pub struct VertexLayout {
    pub attributes: &'static [VertexAttribute],
    pub floats_per_vertex: usize,
}

impl VertexLayout {
    pub fn stride(&self) -> i32 {
        (self.floats_per_vertex * std::mem::size_of::<f32>()) as i32
    }
}

/// `a_point` followed by the face normal `a_normal`.
pub static FACETED_LAYOUT: VertexLayout = VertexLayout {
    attributes: &[
        VertexAttribute {
            name: "a_point",
            size: 3,
            offset: 0,
        },
        VertexAttribute {
            name: "a_normal",
            size: 3,
            offset: 3 * 4,
        },
    ],
    floats_per_vertex: 6,
};

/// `a_point` followed by its spherical angles `a_angles` (polar, azimuth).
pub static SMOOTH_LAYOUT: VertexLayout = VertexLayout {
    attributes: &[
        VertexAttribute {
            name: "a_point",
            size: 3,
            offset: 0,
        },
        VertexAttribute {
            name: "a_angles",
            size: 2,
            offset: 3 * 4,
        },
    ],
    floats_per_vertex: 5,
};

/// `a_position` in clip space.
pub static QUAD_LAYOUT: VertexLayout = VertexLayout {
    attributes: &[VertexAttribute {
        name: "a_position",
        size: 2,
        offset: 0,
    }],
    floats_per_vertex: 2,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    TriangleStrip,
}

#[derive(Debug)]
pub struct Mesh {
    data: Vec<f32>,
    layout: &'static VertexLayout,
    primitive: Primitive,
}

impl Mesh {
    pub fn layout(&self) -> &'static VertexLayout {
        self.layout
    }

    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn vertex_count(&self) -> i32 {
        (self.data.len() / self.layout.floats_per_vertex) as i32
    }

    pub fn vertices(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.layout.floats_per_vertex)
    }
}

fn check_segments(segments: u32) -> anyhow::Result<usize> {
    if !(MIN_SEGMENTS..=MAX_SEGMENTS).contains(&segments) {
        bail!("Sphere needs between {MIN_SEGMENTS} and {MAX_SEGMENTS} segments, got {segments}.");
    }
    Ok(segments as usize)
}

// Outward unit normal of a triangle, None when it has collapsed to a line.
fn face_normal(p1: Vec3, p2: Vec3, p3: Vec3) -> Option<Vec3> {
    let n = (p2 - p1).cross(p3 - p1);
    let len = n.length();
    if len <= f32::MIN_POSITIVE {
        return None;
    }

    let n = n / len;
    Some(if n.dot(p1 + p2 + p3) < 0.0 { -n } else { n })
}

/// Sphere where every triangle is shaded with its own normal.
pub fn faceted_sphere(segments: u32) -> anyhow::Result<Mesh> {
    let n = check_segments(segments)?;

    // Rings 0 and n are the poles, longitude wraps around modulo n.
    let mut points = Vec::with_capacity((n + 1) * n);
    for i in 0..=n {
        let a = i as f32 / n as f32 * PI;
        // Exact poles, so the collapsed triangles there have a zero normal.
        let (sin_a, cos_a) = match i {
            0 => (0.0, 1.0),
            i if i == n => (0.0, -1.0),
            _ => a.sin_cos(),
        };
        for j in 0..n {
            let b = j as f32 / n as f32 * PI * 2.0;
            let (sin_b, cos_b) = b.sin_cos();
            points.push(vec3(cos_b * sin_a, cos_a, sin_b * sin_a));
        }
    }

    let at = |i: usize, j: usize| points[i * n + j % n];
    let mut data = Vec::with_capacity(2 * n * (n - 1) * 3 * FACETED_LAYOUT.floats_per_vertex);
    for i in 0..n {
        for j in 0..n {
            let p1 = at(i, j);
            let p2 = at(i + 1, j);
            let p3 = at(i, j + 1);
            let p4 = at(i + 1, j + 1);

            for [q1, q2, q3] in [[p1, p2, p3], [p2, p4, p3]] {
                // Collapsed at the poles.
                let Some(normal) = face_normal(q1, q2, q3) else {
                    continue;
                };
                for q in [q1, q2, q3] {
                    data.extend_from_slice(&q.to_array());
                    data.extend_from_slice(&normal.to_array());
                }
            }
        }
    }

    Ok(Mesh {
        data,
        layout: &FACETED_LAYOUT,
        primitive: Primitive::Triangles,
    })
}

/// Sphere with interpolated normals. The normal of a unit sphere is its
/// position, so only the point and its angles are stored.
pub fn smooth_sphere(segments: u32) -> anyhow::Result<Mesh> {
    let n = check_segments(segments)?;
    let last = (n - 1) as f32;

    // The seam column is duplicated (b = 0 and b = 2PI) so angles never wrap
    // inside a triangle.
    let mut vertices = Vec::with_capacity(n * n);
    for i in 0..n {
        let a = i as f32 / last * PI;
        let (sin_a, cos_a) = a.sin_cos();
        for j in 0..n {
            let b = j as f32 / last * PI * 2.0;
            let (sin_b, cos_b) = b.sin_cos();
            vertices.push([cos_b * sin_a, cos_a, -sin_b * sin_a, a, b]);
        }
    }

    let at = |i: usize, j: usize| vertices[i * n + j];
    let mut data = Vec::with_capacity(6 * (n - 1) * (n - 1) * SMOOTH_LAYOUT.floats_per_vertex);
    for i in 0..n - 1 {
        for j in 0..n - 1 {
            let p1 = at(i, j);
            let p2 = at(i + 1, j);
            let p3 = at(i, j + 1);
            let p4 = at(i + 1, j + 1);
            for p in [p1, p2, p3, p2, p4, p3] {
                data.extend_from_slice(&p);
            }
        }
    }

    Ok(Mesh {
        data,
        layout: &SMOOTH_LAYOUT,
        primitive: Primitive::Triangles,
    })
}

/// Two triangles covering clip space.
pub fn full_screen_quad() -> Mesh {
    Mesh {
        data: vec![-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0],
        layout: &QUAD_LAYOUT,
        primitive: Primitive::TriangleStrip,
    }
}
