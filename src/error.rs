//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::gpu::texture::TextureError;

/// Errors produced by the flycam crate.
#[derive(Debug)]
pub enum FlycamError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Failed to decode or upload a texture.
    Texture(TextureError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for FlycamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Texture(e) => write!(f, "texture error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for FlycamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Texture(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) | Self::Viewer(_) => None,
        }
    }
}

impl From<RenderContextError> for FlycamError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<TextureError> for FlycamError {
    fn from(e: TextureError) -> Self {
        Self::Texture(e)
    }
}

impl From<std::io::Error> for FlycamError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn io_errors_keep_their_source() {
        let err = FlycamError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing.toml",
        ));
        assert!(err.to_string().contains("missing.toml"));
        assert!(err.source().is_some());
    }

    #[test]
    fn message_variants_have_no_source() {
        let err = FlycamError::OptionsParse("bad key".into());
        assert_eq!(err.to_string(), "options parse error: bad key");
        assert!(err.source().is_none());
    }

    #[test]
    fn texture_errors_convert() {
        let err = FlycamError::from(TextureError::Empty {
            label: "blank".into(),
        });
        assert!(matches!(err, FlycamError::Texture(_)));
        assert!(err.to_string().contains("blank"));
    }
}
