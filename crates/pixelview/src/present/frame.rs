//! Frame validation and texture upload.

use crate::error::PresentError;

use super::common::validation_scope;

pub(super) const BYTES_PER_PIXEL: usize = 3;

/// Checks dimensions and buffer length before any GPU call.
///
/// The underlying API does not reliably reject a short buffer, so the
/// length check lives here and reports as a texture-upload failure.
pub(super) fn validate(pixels: &[u8], width: u32, height: u32) -> Result<(), PresentError> {
    if width == 0 || height == 0 {
        return Err(PresentError::InvalidDimensions { width, height });
    }

    // Widen before multiplying: w*h*3 wraps usize for pathological
    // dimensions, and u32::MAX * u32::MAX * 3 even wraps u64.
    let expected = u128::from(width) * u128::from(height) * BYTES_PER_PIXEL as u128;
    if pixels.len() as u128 != expected {
        return Err(PresentError::TextureUpload(format!(
            "pixel buffer is {} bytes, expected {}x{}x3 = {}",
            pixels.len(),
            width,
            height,
            expected
        )));
    }

    Ok(())
}

/// Expands tightly packed RGB to RGBA with opaque alpha.
///
/// GPUs have no 3-byte texel format; byte values pass through unchanged
/// and rows keep their top-to-bottom order.
pub(super) fn expand_rgb(pixels: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(pixels.len() / 3 * 4);
    for px in pixels.chunks_exact(3) {
        rgba.extend_from_slice(px);
        rgba.push(0xff);
    }
    rgba
}

/// GPU-side copy of one frame: texture view plus the sampler used to read it.
pub(super) struct FrameTexture {
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

/// Creates the frame texture, uploads the expanded pixels, and builds the
/// sampler: clamp-to-edge on both axes, linear min/mag filtering.
pub(super) fn upload(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<FrameTexture, PresentError> {
    let rgba = expand_rgb(pixels);

    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let texture = validation_scope(device, || {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("pixelview frame texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            // Unorm, not UnormSrgb: bytes go in verbatim, no conversion.
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );

        texture
    })
    .map_err(PresentError::TextureUpload)?;

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    let sampler = validation_scope(device, || {
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("pixelview frame sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        })
    })
    .map_err(PresentError::TextureUpload)?;

    Ok(FrameTexture { view, sampler })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── validate ──────────────────────────────────────────────────────────

    #[test]
    fn zero_width_rejected_before_gpu_work() {
        let err = validate(&[0; 3], 0, 1).unwrap_err();
        assert!(matches!(
            err,
            PresentError::InvalidDimensions { width: 0, height: 1 }
        ));
    }

    #[test]
    fn zero_height_rejected() {
        assert!(matches!(
            validate(&[], 4, 0),
            Err(PresentError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn short_buffer_is_a_texture_upload_error() {
        let err = validate(&[0; 5], 2, 1).unwrap_err();
        assert!(matches!(err, PresentError::TextureUpload(_)));
        assert!(err.to_string().contains("expected 2x1x3 = 6"));
    }

    #[test]
    fn long_buffer_is_also_rejected() {
        assert!(matches!(
            validate(&[0; 7], 2, 1),
            Err(PresentError::TextureUpload(_))
        ));
    }

    #[test]
    fn exact_buffer_passes() {
        assert!(validate(&[0; 6], 2, 1).is_ok());
    }

    #[test]
    fn huge_dimensions_error_instead_of_overflowing() {
        // u32::MAX * u32::MAX * 3 wraps any native integer width; the
        // expected-length math must not panic or compare against garbage.
        let err = validate(&[], u32::MAX, u32::MAX).unwrap_err();
        assert!(matches!(err, PresentError::TextureUpload(_)), "got {err}");
    }

    // ── expand_rgb ────────────────────────────────────────────────────────

    #[test]
    fn expansion_appends_opaque_alpha() {
        let rgba = expand_rgb(&[255, 0, 0, 0, 0, 255]);
        assert_eq!(rgba, vec![255, 0, 0, 255, 0, 0, 255, 255]);
    }

    #[test]
    fn expansion_preserves_row_order() {
        // 1x2 frame: red top row, blue bottom row.
        let rgba = expand_rgb(&[255, 0, 0, 0, 0, 255]);
        assert_eq!(&rgba[0..4], &[255, 0, 0, 255]);
        assert_eq!(&rgba[4..8], &[0, 0, 255, 255]);
    }

    #[test]
    fn empty_input_expands_to_empty() {
        assert!(expand_rgb(&[]).is_empty());
    }
}
