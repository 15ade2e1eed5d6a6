use thiserror::Error;

/// Everything that can go wrong while presenting a frame.
///
/// Flat and all fatal: any variant aborts the whole `present` call, nothing
/// is retried, and no partially-drawn state is kept. The caller treats every
/// variant as "image could not be displayed".
#[derive(Debug, Error)]
pub enum PresentError {
    /// Width or height is zero. Checked before any GPU call is issued.
    #[error("invalid frame dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// No suitable adapter, device, or surface could be acquired.
    #[error("could not create a rendering context: {0}")]
    ContextCreation(String),

    /// Surface configuration, viewport, or clear setup was rejected.
    #[error("rendering context setup failed: {0}")]
    ContextSetup(String),

    /// The named shader stage failed to compile.
    #[error("shader {identifier:?} failed to compile: {message}")]
    ShaderCompile {
        identifier: String,
        message: String,
    },

    /// The compiled stages could not be linked into a pipeline.
    #[error("shader program linking failed: {0}")]
    ProgramLink(String),

    /// Pixel buffer length/dimension mismatch, or the upload was rejected.
    #[error("texture upload rejected: {0}")]
    TextureUpload(String),

    /// The position vertex buffer could not be created or bound.
    #[error("vertex-coord setup failed: {0}")]
    VertexSetup(String),

    /// The texture-coordinate vertex buffer could not be created or bound.
    #[error("tex-coord setup failed: {0}")]
    TexCoordSetup(String),

    /// Offscreen pixel read-back failed.
    #[error("pixel read-back failed: {0}")]
    Readback(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_compile_names_the_identifier() {
        let err = PresentError::ShaderCompile {
            identifier: "vs".to_string(),
            message: "expected expression".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("\"vs\""), "got: {text}");
    }

    #[test]
    fn invalid_dimensions_reports_both_axes() {
        let err = PresentError::InvalidDimensions { width: 0, height: 7 };
        assert_eq!(err.to_string(), "invalid frame dimensions 0x7");
    }
}
