//! Fixed quad geometry: corner positions and matching texture coordinates.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::error::PresentError;

use super::common::validation_scope;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct Corner {
    pub pos: [f32; 2],
}

/// Quad corners spanning the full clip-space square, fan order:
/// top-left, bottom-left, bottom-right, top-right.
pub(super) const VERTEX_COORDS: [Corner; 4] = [
    Corner { pos: [-1.0, 1.0] },
    Corner { pos: [-1.0, -1.0] },
    Corner { pos: [1.0, -1.0] },
    Corner { pos: [1.0, 1.0] },
];

/// Texture coordinates matching `VERTEX_COORDS` corner for corner.
///
/// UV origin is top-left, same as the frame's row order, so the top image
/// row maps to the top of the quad.
pub(super) const TEX_COORDS: [Corner; 4] = [
    Corner { pos: [0.0, 0.0] },
    Corner { pos: [0.0, 1.0] },
    Corner { pos: [1.0, 1.0] },
    Corner { pos: [1.0, 0.0] },
];

/// Triangle-fan decomposition of the 4 corners into two triangles.
pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const TEXCOORD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];

pub(super) fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Corner>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_ATTRS,
    }
}

pub(super) fn texcoord_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Corner>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &TEXCOORD_ATTRS,
    }
}

/// GPU-side quad geometry, one buffer per attribute like the classic
/// two-buffer layout: positions and texcoords are uploaded separately.
pub(super) struct QuadBuffers {
    pub positions: wgpu::Buffer,
    pub texcoords: wgpu::Buffer,
    pub indices: wgpu::Buffer,
}

pub(super) fn upload_quad(device: &wgpu::Device) -> Result<QuadBuffers, PresentError> {
    let positions = validation_scope(device, || {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pixelview quad positions"),
            contents: bytemuck::cast_slice(&VERTEX_COORDS),
            usage: wgpu::BufferUsages::VERTEX,
        })
    })
    .map_err(PresentError::VertexSetup)?;

    let texcoords = validation_scope(device, || {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pixelview quad texcoords"),
            contents: bytemuck::cast_slice(&TEX_COORDS),
            usage: wgpu::BufferUsages::VERTEX,
        })
    })
    .map_err(PresentError::TexCoordSetup)?;

    let indices = validation_scope(device, || {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pixelview quad indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        })
    })
    .map_err(PresentError::VertexSetup)?;

    Ok(QuadBuffers {
        positions,
        texcoords,
        indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_spans_full_clip_space() {
        let xs: Vec<f32> = VERTEX_COORDS.iter().map(|c| c.pos[0]).collect();
        let ys: Vec<f32> = VERTEX_COORDS.iter().map(|c| c.pos[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -1.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 1.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), -1.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 1.0);
    }

    #[test]
    fn top_left_corner_maps_to_image_origin() {
        // Corner 0 is clip-space top-left; with a top-left UV origin it must
        // sample the first row, first column of the frame.
        assert_eq!(VERTEX_COORDS[0].pos, [-1.0, 1.0]);
        assert_eq!(TEX_COORDS[0].pos, [0.0, 0.0]);
    }

    #[test]
    fn indices_cover_all_four_corners() {
        let mut seen = [false; 4];
        for i in QUAD_INDICES {
            seen[i as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
