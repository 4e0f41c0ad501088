use std::rc::Rc;
use std::sync::Arc;

use anyhow::Context;

use crate::assets::OverlayAsset;
use crate::error::{SidleError, SidleResult};
use crate::host::{Drawable, ImageDecoder};

/// Decoded pixels in the form most host compositors consume directly.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Drawable for PreparedImage {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// [`ImageDecoder`] that decodes any format the `image` crate reads and
/// hands hosts a [`PreparedImage`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PixelImageDecoder;

impl ImageDecoder for PixelImageDecoder {
    fn decode(&self, bytes: &[u8]) -> SidleResult<OverlayAsset> {
        let prepared = decode_image(bytes)?;
        let (width, height) = (prepared.width, prepared.height);
        Ok(OverlayAsset {
            drawable: Rc::new(prepared),
            width,
            height,
        })
    }
}

pub fn decode_image(bytes: &[u8]) -> SidleResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(SidleError::asset("decoded image has a zero dimension"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}
