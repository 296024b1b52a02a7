//! Water texture loading
//!
//! PNG files are decoded on the CPU into tightly packed RGBA8 and uploaded
//! once at startup.

use std::io::Cursor;
use std::path::Path;

use crate::error::{AppError, Result};

/// Decoded image, 4 bytes per pixel, rows top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaImage {
    /// Read and decode a PNG file
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| AppError::AssetLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let image = Self::decode_png(&bytes)?;
        log::info!(
            "Loaded texture {:?} ({}x{})",
            path,
            image.width,
            image.height
        );
        Ok(image)
    }

    /// Decode PNG bytes, expanding palette, gray and RGB images to RGBA8
    pub fn decode_png(bytes: &[u8]) -> Result<Self> {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info()?;

        let (color_type, bit_depth) = reader.output_color_type();
        if bit_depth != png::BitDepth::Eight {
            return Err(AppError::UnsupportedTexture(format!(
                "bit depth {:?}",
                bit_depth
            )));
        }
        let (width, height) = (reader.info().width, reader.info().height);
        let mut buf = vec![0; width as usize * height as usize * color_type.samples()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        let pixels = match info.color_type {
            png::ColorType::Rgba => buf,
            png::ColorType::Rgb => buf
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 255]).collect(),
            png::ColorType::GrayscaleAlpha => buf
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
            other => {
                return Err(AppError::UnsupportedTexture(format!(
                    "color type {:?}",
                    other
                )));
            }
        };

        Ok(Self {
            width: info.width,
            height: info.height,
            pixels,
        })
    }

    /// Fail unless both sides fit in a texture of `max_dimension` texels
    pub fn check_fits(&self, max_dimension: u32) -> Result<()> {
        if self.width > max_dimension || self.height > max_dimension {
            return Err(AppError::UnsupportedTexture(format!(
                "{}x{} exceeds the device limit of {}",
                self.width, self.height, max_dimension
            )));
        }
        Ok(())
    }
}

/// GPU-side texture with its view and sampler
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
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
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
            writer.finish().unwrap();
        }
        out
    }

    #[test]
    fn test_decode_rgba() {
        let data = [10, 20, 30, 40, 50, 60, 70, 80];
        let bytes = encode(2, 1, png::ColorType::Rgba, &data);
        let image = RgbaImage::decode_png(&bytes).unwrap();
        assert_eq!((image.width, image.height), (2, 1));
        assert_eq!(image.pixels, data);
    }

    #[test]
    fn test_decode_rgb_adds_opaque_alpha() {
        let bytes = encode(1, 2, png::ColorType::Rgb, &[1, 2, 3, 4, 5, 6]);
        let image = RgbaImage::decode_png(&bytes).unwrap();
        assert_eq!(image.pixels, vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_decode_grayscale_expands() {
        let bytes = encode(2, 1, png::ColorType::Grayscale, &[0, 200]);
        let image = RgbaImage::decode_png(&bytes).unwrap();
        assert_eq!(image.pixels, vec![0, 0, 0, 255, 200, 200, 200, 255]);
    }

    #[test]
    fn test_oversized_image_is_rejected() {
        let image = RgbaImage {
            width: 4096,
            height: 16,
            pixels: vec![0; 4096 * 16 * 4],
        };
        assert!(image.check_fits(8192).is_ok());
        assert!(image.check_fits(4096).is_ok());
        let err = image.check_fits(2048).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedTexture(_)));
    }

    #[test]
    fn test_decode_corrupt_bytes() {
        let err = RgbaImage::decode_png(b"definitely not a png").unwrap_err();
        assert!(matches!(err, AppError::TextureDecode(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RgbaImage::load(Path::new("/nonexistent/water.png")).unwrap_err();
        match err {
            AppError::AssetLoad { path, source } => {
                assert_eq!(path, Path::new("/nonexistent/water.png"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bundled_water_texture_decodes() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/water.png");
        let image = RgbaImage::load(&path).unwrap();
        assert!(image.width > 0 && image.height > 0);
        assert_eq!(image.pixels.len(), (image.width * image.height * 4) as usize);
    }
}
