use crate::api::ingest::error::IngestError;
use app_state::IngestionSettings;
use color_eyre::eyre::eyre;
use fast_image_resize as fr;

/// How uploaded images are normalized before storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageOptions {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: f32,
    pub lossless: bool,
}

impl From<&IngestionSettings> for ImageOptions {
    fn from(settings: &IngestionSettings) -> Self {
        Self {
            max_width: settings.max_width,
            max_height: settings.max_height,
            quality: settings.quality,
            lossless: settings.lossless,
        }
    }
}

/// An encoded WebP image and its final dimensions.
#[derive(Debug)]
pub struct OptimizedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Largest size with the same aspect ratio that fits inside `max_width` x `max_height`.
/// Images that already fit are returned unchanged; nothing is ever upscaled.
#[must_use]
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    let scale = (f64::from(max_width) / f64::from(width))
        .min(f64::from(max_height) / f64::from(height));

    let scaled = |side: u32, max: u32| {
        ((f64::from(side) * scale).round() as u32).clamp(1, max)
    };
    (scaled(width, max_width), scaled(height, max_height))
}

/// Decodes an uploaded image, shrinks it to fit the configured bounds and
/// re-encodes it as WebP. CPU bound, run it on the blocking pool.
///
/// # Errors
///
/// * `IngestError::BadRequest` if the bytes are not a decodable image.
/// * `IngestError::Internal` if resizing or encoding fails.
pub fn optimize_image(bytes: &[u8], options: &ImageOptions) -> Result<OptimizedImage, IngestError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| IngestError::BadRequest(format!("Unsupported or corrupt image: {e}")))?;

    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(IngestError::BadRequest("Image has no pixels".to_owned()));
    }
    let (dst_width, dst_height) = fit_within(width, height, options.max_width, options.max_height);
    let rgba = img.into_rgba8().into_raw();

    let pixels = if (dst_width, dst_height) == (width, height) {
        rgba
    } else {
        let src_image = fr::images::Image::from_vec_u8(width, height, rgba, fr::PixelType::U8x4)
            .map_err(|e| eyre!("Resize source error: {e}"))?;
        let mut dst_image = fr::images::Image::new(dst_width, dst_height, fr::PixelType::U8x4);
        fr::Resizer::new()
            .resize(&src_image, &mut dst_image, None)
            .map_err(|e| eyre!("Resizing failed: {e}"))?;
        dst_image.into_vec()
    };

    let memory = webp::Encoder::from_rgba(&pixels, dst_width, dst_height)
        .encode_simple(options.lossless, options.quality)
        .map_err(|e| eyre!("WebP encoding failed: {e:?}"))?;

    Ok(OptimizedImage {
        bytes: memory.to_vec(),
        width: dst_width,
        height: dst_height,
    })
}
