use image::DynamicImage;

/// Dimensions that fit `width × height` inside `max × max`, keeping the
/// aspect ratio. Returns `None` when the image already fits.
pub fn fit_within(width: u32, height: u32, max: u32) -> Option<(u32, u32)> {
    let longer = width.max(height);
    if longer <= max || max == 0 {
        return None;
    }
    let scale = f64::from(max) / f64::from(longer);
    let scaled = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, max);
    Some((scaled(width), scaled(height)))
}

/// Downscale so the longer side equals `max`. Images that already fit are
/// returned unchanged.
pub fn downscale_to_fit(img: &DynamicImage, max: u32) -> Option<DynamicImage> {
    fit_within(img.width(), img.height(), max).map(|(w, h)| resize_to(img, w, h))
}

/// Resize an image to the given dimensions using Lanczos3 filter.
pub fn resize_to(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    img.resize_exact(width, height, image::imageops::FilterType::Lanczos3)
}
