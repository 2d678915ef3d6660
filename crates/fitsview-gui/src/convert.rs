use fitsview_core::data_url::DecodedImage;

/// Convert a decoded RGBA image to an egui ColorImage.
pub fn decoded_to_color_image(image: &DecodedImage) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [image.width as usize, image.height as usize],
        &image.rgba,
    )
}

/// Upload a decoded image as a texture. Nearest filtering keeps native pixels
/// visible when zoomed.
pub fn load_texture(ctx: &egui::Context, name: &str, image: &DecodedImage) -> egui::TextureHandle {
    ctx.load_texture(
        name,
        decoded_to_color_image(image),
        egui::TextureOptions::NEAREST,
    )
}
