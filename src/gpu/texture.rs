//! Image textures and the depth attachment.
//!
//! Decoded images are stored top row first, while texture coordinates in
//! the cube mesh put `v = 0` at the bottom, so images are flipped
//! vertically before upload. wgpu has no automatic mipmap generation; the
//! full mip chain is built on the CPU and uploaded level by level.

use std::fmt;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

/// Depth attachment format shared by the depth texture and the pipelines
/// that test against it.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Errors produced while loading an image texture.
#[derive(Debug)]
pub enum TextureError {
    /// The file could not be opened or decoded.
    Decode {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying decoder error.
        source: image::ImageError,
    },
    /// The image has a zero width or height.
    Empty {
        /// Texture label.
        label: String,
    },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode { path, source } => {
                write!(f, "failed to decode {}: {source}", path.display())
            }
            Self::Empty { label } => write!(f, "texture {label} is empty"),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::Empty { .. } => None,
        }
    }
}

/// Reverse the order of the rows of a tightly packed image in place.
///
/// `stride` is the length of one row in bytes. Trailing bytes that do not
/// fill a whole row are left untouched; a zero stride is a no-op.
pub fn flip_rows(pixels: &mut [u8], stride: usize) {
    if stride == 0 {
        return;
    }
    let rows = pixels.len() / stride;
    for y in 0..rows / 2 {
        let (top, bottom) = pixels.split_at_mut((rows - 1 - y) * stride);
        top[y * stride..(y + 1) * stride].swap_with_slice(&mut bottom[..stride]);
    }
}

/// Number of mip levels down to and including 1x1.
#[must_use]
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    u32::BITS - width.max(height).max(1).leading_zeros()
}

/// Build the full mip chain for `base`, halving each level (rounding down,
/// never below one pixel) with a triangle filter.
#[must_use]
pub fn mip_chain(base: RgbaImage) -> Vec<RgbaImage> {
    let levels = mip_level_count(base.width(), base.height()) as usize;
    let mut chain = Vec::with_capacity(levels);
    chain.push(base);
    while chain.len() < levels {
        let Some(prev) = chain.last() else {
            break;
        };
        let next = image::imageops::resize(
            prev,
            (prev.width() / 2).max(1),
            (prev.height() / 2).max(1),
            FilterType::Triangle,
        );
        chain.push(next);
    }
    chain
}

/// Two-tone checkerboard, used in place of a texture file that is missing.
#[must_use]
pub fn checkerboard(size: u32, cell: u32) -> RgbaImage {
    let cell = cell.max(1);
    RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba([200, 200, 200, 255])
        } else {
            Rgba([90, 90, 90, 255])
        }
    })
}

/// A sampled 2D image texture with a full mip chain.
pub struct ImageTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
    /// Mirrored-repeat, trilinear sampler.
    pub sampler: wgpu::Sampler,
}

impl ImageTexture {
    /// Decode an image file and upload it.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::Decode`] if the file cannot be read or
    /// decoded, and [`TextureError::Empty`] for zero-sized images.
    pub fn from_path(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
        flip: bool,
    ) -> Result<Self, TextureError> {
        let image = image::open(path)
            .map_err(|source| TextureError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        log::info!(
            "loaded texture {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Self::from_rgba(device, queue, &path.display().to_string(), image, flip)
    }

    /// Upload an already-decoded RGBA image.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::Empty`] for zero-sized images.
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        mut image: RgbaImage,
        flip: bool,
    ) -> Result<Self, TextureError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty {
                label: label.to_owned(),
            });
        }

        if flip {
            flip_rows(&mut image, width as usize * 4);
        }

        let chain = mip_chain(image);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: chain.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, mip) in chain.iter().enumerate() {
            let (mip_width, mip_height) = mip.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                mip.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(mip_width * 4),
                    rows_per_image: Some(mip_height),
                },
                wgpu::Extent3d {
                    width: mip_width,
                    height: mip_height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::MirrorRepeat,
            address_mode_v: wgpu::AddressMode::MirrorRepeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Ok(Self {
            texture,
            view,
            sampler,
        })
    }
}

/// Depth attachment sized to the surface.
pub struct DepthTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    /// Create a depth texture with the given dimensions.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_swaps_rows() {
        let mut pixels = vec![1, 1, 2, 2, 3, 3];
        flip_rows(&mut pixels, 2);
        assert_eq!(pixels, vec![3, 3, 2, 2, 1, 1]);

        let mut even = vec![1, 2, 3, 4];
        flip_rows(&mut even, 1);
        assert_eq!(even, vec![4, 3, 2, 1]);
    }

    #[test]
    fn flip_twice_is_identity() {
        let original: Vec<u8> = (0..=255).cycle().take(4 * 7 * 5).collect();
        let mut pixels = original.clone();
        flip_rows(&mut pixels, 4 * 7);
        assert_ne!(pixels, original);
        flip_rows(&mut pixels, 4 * 7);
        assert_eq!(pixels, original);
    }

    #[test]
    fn flip_ignores_partial_rows_and_zero_stride() {
        let mut pixels = vec![1, 1, 2, 2, 9];
        flip_rows(&mut pixels, 2);
        assert_eq!(pixels, vec![2, 2, 1, 1, 9]);

        let mut single = vec![5, 6, 7];
        flip_rows(&mut single, 0);
        flip_rows(&mut single, 3);
        assert_eq!(single, vec![5, 6, 7]);
    }

    #[test]
    fn flipped_image_puts_top_row_last() {
        let mut image = RgbaImage::from_fn(3, 2, |_, y| Rgba([y as u8, 0, 0, 255]));
        flip_rows(&mut image, 3 * 4);
        assert_eq!(image.get_pixel(0, 0)[0], 1);
        assert_eq!(image.get_pixel(2, 1)[0], 0);
    }

    #[test]
    fn mip_levels() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(512, 512), 10);
        assert_eq!(mip_level_count(512, 3), 10);
        assert_eq!(mip_level_count(300, 200), 9);
        assert_eq!(mip_level_count(0, 0), 1);
    }

    #[test]
    fn mip_chain_halves_to_one_pixel() {
        let chain = mip_chain(checkerboard(8, 2));
        let sizes: Vec<(u32, u32)> =
            chain.iter().map(RgbaImage::dimensions).collect();
        assert_eq!(sizes, vec![(8, 8), (4, 4), (2, 2), (1, 1)]);

        let chain = mip_chain(RgbaImage::new(5, 2));
        let sizes: Vec<(u32, u32)> =
            chain.iter().map(RgbaImage::dimensions).collect();
        assert_eq!(sizes, vec![(5, 2), (2, 1), (1, 1)]);
    }

    #[test]
    fn checkerboard_alternates() {
        let board = checkerboard(4, 2);
        assert_eq!(board.get_pixel(0, 0), board.get_pixel(1, 1));
        assert_ne!(board.get_pixel(0, 0), board.get_pixel(2, 0));
        assert_eq!(board.get_pixel(0, 0), board.get_pixel(2, 2));
    }
}
