use crate::config::ImageConfig;
use crate::error::Error;
use crate::fetch::Fetcher;

use bytes::Bytes;
use image::imageops::FilterType;
use std::fmt;
use std::io;
use std::sync::Arc;
use tokio::task;

/// Decoded RGBA pixels, ready for a display shell.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Bytes,
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rgba", &self.rgba.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Official artwork, scaled to the configured square.
    Artwork,
    /// In-game sprite, kept at native resolution.
    Sprite,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum Unavailable {
    #[error("no image url")]
    Missing,
    #[error("download failed: {0}")]
    Download(#[from] Error),
    #[error("decode failed: {0}")]
    Decode(Arc<image::ImageError>),
    #[error("decoder task did not finish")]
    Interrupted,
}

impl From<image::ImageError> for Unavailable {
    fn from(error: image::ImageError) -> Self {
        Self::Decode(Arc::new(error))
    }
}

impl Bitmap {
    pub fn decode(bytes: &[u8], resize_to: Option<(u32, u32)>) -> Result<Self, image::ImageError> {
        let mut image = image::ImageReader::new(io::Cursor::new(bytes))
            .with_guessed_format()?
            .decode()?;

        if let Some((width, height)) = resize_to {
            image = image.resize_exact(width, height, FilterType::Lanczos3);
        }

        let image = image.to_rgba8();

        Ok(Self {
            width: image.width(),
            height: image.height(),
            rgba: Bytes::from(image.into_raw()),
        })
    }
}

/// Downloads and decodes one image. Never touches the network when `url`
/// is absent.
pub async fn resolve_image(
    fetcher: &dyn Fetcher,
    config: &ImageConfig,
    url: Option<&str>,
    kind: ImageKind,
) -> Result<Bitmap, Unavailable> {
    let url = url.ok_or(Unavailable::Missing)?;
    tracing::debug!("Downloading {:?} image: {}", kind, url);

    let bytes = fetcher.get(url).await?;

    let resize_to = match kind {
        ImageKind::Artwork => Some((config.artwork_width, config.artwork_height)),
        ImageKind::Sprite => None,
    };

    // Decoding is CPU bound; keep it off the async workers
    let bitmap = task::spawn_blocking(move || Bitmap::decode(&bytes, resize_to))
        .await
        .map_err(|e| {
            tracing::warn!("Image decoder task failed for {}: {}", url, e);
            Unavailable::Interrupted
        })??;

    Ok(bitmap)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use bytes::Bytes;
    use std::io;

    pub fn png(width: u32, height: u32) -> Bytes {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 203, 5, 255]));
        let mut buffer = io::Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, image::ImageFormat::Png)
            .unwrap();

        Bytes::from(buffer.into_inner())
    }
}
