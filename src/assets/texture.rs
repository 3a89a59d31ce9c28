use crate::assets::io::{AssetSource, read_with_progress};
use crate::errors::{Result, StageError};
use crate::resources::image::Image;

/// Decodes PNG bytes into RGBA8.
pub fn decode_image(bytes: &[u8], label: &str) -> Result<Image> {
    let img = image::load_from_memory(bytes)?;
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Image::new(label, width, height, rgba.into_raw()))
}

/// Reads and decodes an image; decoding runs on a blocking thread.
pub async fn load_image(source: AssetSource) -> Result<Image> {
    let bytes = read_with_progress(&source, |_| {}).await?;
    let label = source.name().into_owned();
    tokio::task::spawn_blocking(move || decode_image(&bytes, &label))
        .await
        .map_err(|e| StageError::asset(source.name(), e))?
}
