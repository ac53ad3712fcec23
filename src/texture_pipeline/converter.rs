use std::io::Cursor;
use std::path::Path;

use anyhow::{bail, Context};
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat, ImageReader};

use super::resizer;

/// What a platform requires of its textures.
#[derive(Debug, Clone, Default)]
pub struct TextureConstraints {
    /// Promote images without an alpha channel to RGBA.
    pub ensure_alpha: bool,
    /// Longest side allowed before the image is downscaled.
    pub max_dimension: Option<u32>,
}

impl TextureConstraints {
    pub fn is_noop(&self) -> bool {
        !self.ensure_alpha && self.max_dimension.is_none()
    }
}

/// A decoded texture and the format it was stored in.
#[derive(Debug)]
pub struct LoadedTexture {
    pub image: DynamicImage,
    pub format: ImageFormat,
}

/// Result of a texture conversion.
#[derive(Debug)]
pub struct ConvertedTexture {
    pub image: DynamicImage,
    /// Original dimensions before conversion.
    pub original_width: u32,
    pub original_height: u32,
    /// Final dimensions after conversion.
    pub final_width: u32,
    pub final_height: u32,
    pub alpha_added: bool,
    pub was_resized: bool,
}

impl ConvertedTexture {
    pub fn changed(&self) -> bool {
        self.alpha_added || self.was_resized
    }
}

/// Decode an image file, detecting the format from its content.
pub fn load_texture_file(path: &Path) -> anyhow::Result<LoadedTexture> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("failed to read {}", path.display()))?;
    let format = reader
        .format()
        .with_context(|| format!("unrecognised image format: {}", path.display()))?;
    let image = reader
        .decode()
        .with_context(|| format!("failed to decode {}", path.display()))?;
    Ok(LoadedTexture { image, format })
}

/// Decode a base64 `data:` image URI.
pub fn load_texture_data_uri(uri: &str) -> anyhow::Result<LoadedTexture> {
    let (_, encoded) = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .context("image URI is not a base64 data URI")?;
    let bytes = BASE64_STANDARD
        .decode(encoded)
        .context("image data URI is not valid base64")?;
    let format = image::guess_format(&bytes).context("unrecognised embedded image format")?;
    let image = image::load_from_memory_with_format(&bytes, format)
        .context("failed to decode embedded image")?;
    Ok(LoadedTexture { image, format })
}

/// Apply `constraints` to a loaded texture.
///
/// Alpha is added by converting to RGBA8. Formats that cannot store alpha
/// (JPEG, BMP) fail instead, so the caller can skip the texture.
pub fn apply_constraints(
    texture: &LoadedTexture,
    constraints: &TextureConstraints,
) -> anyhow::Result<ConvertedTexture> {
    let img = &texture.image;
    let original_width = img.width();
    let original_height = img.height();

    let mut alpha_added = false;
    let mut out = if constraints.ensure_alpha && !img.color().has_alpha() {
        if !can_store_alpha(texture.format) {
            bail!("{:?} images cannot carry an alpha channel", texture.format);
        }
        alpha_added = true;
        DynamicImage::ImageRgba8(img.to_rgba8())
    } else {
        img.clone()
    };

    let mut was_resized = false;
    if let Some(max) = constraints.max_dimension {
        if let Some(resized) = resizer::downscale_to_fit(&out, max) {
            out = resized;
            was_resized = true;
        }
    }

    Ok(ConvertedTexture {
        final_width: out.width(),
        final_height: out.height(),
        image: out,
        original_width,
        original_height,
        alpha_added,
        was_resized,
    })
}

/// Write a converted texture, keeping the source format.
pub fn save_texture(image: &DynamicImage, path: &Path, format: ImageFormat) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let image = if can_store_alpha(format) {
        image.clone()
    } else {
        DynamicImage::ImageRgb8(image.to_rgb8())
    };
    image
        .save_with_format(path, format)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Encode an image as a `data:image/png;base64,` URI.
pub fn encode_png_data_uri(image: &DynamicImage) -> anyhow::Result<String> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("failed to encode PNG")?;
    Ok(format!("data:image/png;base64,{}", BASE64_STANDARD.encode(bytes)))
}

fn can_store_alpha(format: ImageFormat) -> bool {
    !matches!(format, ImageFormat::Jpeg | ImageFormat::Bmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{RgbImage, RgbaImage};
    use tempfile::TempDir;

    fn rgb(width: u32, height: u32, format: ImageFormat) -> LoadedTexture {
        LoadedTexture {
            image: DynamicImage::ImageRgb8(RgbImage::new(width, height)),
            format,
        }
    }

    #[test]
    fn rgb_png_gains_alpha() {
        let constraints = TextureConstraints {
            ensure_alpha: true,
            max_dimension: None,
        };
        let result = apply_constraints(&rgb(16, 16, ImageFormat::Png), &constraints).unwrap();
        assert!(result.alpha_added);
        assert!(!result.was_resized);
        assert!(result.image.color().has_alpha());
    }

    #[test]
    fn rgba_needs_nothing() {
        let texture = LoadedTexture {
            image: DynamicImage::ImageRgba8(RgbaImage::new(8, 8)),
            format: ImageFormat::Png,
        };
        let constraints = TextureConstraints {
            ensure_alpha: true,
            max_dimension: Some(1024),
        };
        let result = apply_constraints(&texture, &constraints).unwrap();
        assert!(!result.changed());
    }

    #[test]
    fn jpeg_cannot_gain_alpha() {
        let constraints = TextureConstraints {
            ensure_alpha: true,
            max_dimension: None,
        };
        assert!(apply_constraints(&rgb(8, 8, ImageFormat::Jpeg), &constraints).is_err());
    }

    #[test]
    fn oversized_is_downscaled() {
        let constraints = TextureConstraints {
            ensure_alpha: false,
            max_dimension: Some(1024),
        };
        let result = apply_constraints(&rgb(2048, 1536, ImageFormat::Jpeg), &constraints).unwrap();
        assert!(result.was_resized);
        assert_eq!(result.original_width, 2048);
        assert_eq!((result.final_width, result.final_height), (1024, 768));
    }

    #[test]
    fn file_round_trip_detects_format() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("albedo.png");
        save_texture(&rgb(4, 2, ImageFormat::Png).image, &path, ImageFormat::Png).unwrap();

        let loaded = load_texture_file(&path).unwrap();
        assert_eq!(loaded.format, ImageFormat::Png);
        assert_eq!((loaded.image.width(), loaded.image.height()), (4, 2));
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(load_texture_file(&tmp.path().join("nope.png")).is_err());
    }

    #[test]
    fn png_data_uri_decodes() {
        let uri = encode_png_data_uri(&DynamicImage::ImageRgba8(RgbaImage::new(3, 5))).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        let loaded = load_texture_data_uri(&uri).unwrap();
        assert_eq!(loaded.format, ImageFormat::Png);
        assert_eq!(loaded.image.height(), 5);
    }

    #[test]
    fn bad_data_uri_is_an_error() {
        assert!(load_texture_data_uri("data:image/png;base64,@@@").is_err());
        assert!(load_texture_data_uri("texture.png").is_err());
    }
}
