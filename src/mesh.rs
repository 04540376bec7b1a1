use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

impl Vertex {
    /// Position an Location 0, UV an Location 1, verschachtelt (5 floats)
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

const L: f32 = -0.5;
const H: f32 = 0.5;

// Ecken je Seite, von außen gesehen gegen den Uhrzeigersinn
const FACES: [[[f32; 3]; 4]; 6] = [
    [[H, L, L], [H, H, L], [H, H, H], [H, L, H]], // +X
    [[L, L, H], [L, H, H], [L, H, L], [L, L, L]], // -X
    [[L, H, L], [L, H, H], [H, H, H], [H, H, L]], // +Y (oben)
    [[H, L, L], [H, L, H], [L, L, H], [L, L, L]], // -Y
    [[H, L, H], [H, H, H], [L, H, H], [L, L, H]], // +Z
    [[L, L, L], [L, H, L], [H, H, L], [H, L, L]], // -Z
];

/// Einheitswürfel um den Ursprung (Kantenlänge 1), jede Seite mit eigener UV-Fläche.
pub fn unit_cube() -> (Vec<Vertex>, Vec<u16>) {
    let mut verts: Vec<Vertex> = Vec::with_capacity(24);
    let mut inds: Vec<u16> = Vec::with_capacity(36);

    for corners in FACES {
        push_face(&mut verts, &mut inds, corners);
    }

    (verts, inds)
}

#[inline]
fn push_face(verts: &mut Vec<Vertex>, inds: &mut Vec<u16>, corners: [[f32; 3]; 4]) {
    // v wächst in wgpu nach unten
    const UVS: [[f32; 2]; 4] = [[0.0, 1.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];

    let base = verts.len() as u16;
    for (pos, uv) in corners.into_iter().zip(UVS) {
        verts.push(Vertex { pos, uv });
    }

    // zwei Dreiecke (0,1,2) und (0,2,3), CCW von außen
    inds.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_vertex_stride_is_five_floats() {
        assert_eq!(Vertex::layout().array_stride, 5 * 4);
    }

    #[test]
    fn test_unit_cube_shape() {
        let (verts, inds) = unit_cube();
        assert_eq!(verts.len(), 24);
        assert_eq!(inds.len(), 36);
        assert!(inds.iter().all(|&i| (i as usize) < verts.len()));
        assert!(verts.iter().flat_map(|v| v.pos).all(|c| c.abs() == 0.5));
    }

    #[test]
    fn test_triangles_face_outward() {
        let (verts, inds) = unit_cube();
        for tri in inds.chunks_exact(3) {
            let pos = |i: u16| Vec3::from(verts[i as usize].pos);
            let (a, b, c) = (pos(tri[0]), pos(tri[1]), pos(tri[2]));
            let normal = (b - a).cross(c - a);
            let center = (a + b + c) / 3.0;
            assert!(normal.dot(center) > 0.0, "triangle {tri:?} faces inward");
        }
    }
}
