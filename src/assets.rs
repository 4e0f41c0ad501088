use std::rc::Rc;

use kurbo::Size;

use crate::host::Drawable;

/// A decoded overlay image: an opaque host drawable plus its intrinsic
/// pixel size. Decoded once at controller construction and shared
/// read-only across visit cycles.
#[derive(Clone)]
pub struct OverlayAsset {
    pub drawable: Rc<dyn Drawable>,
    pub width: u32,
    pub height: u32,
}

impl OverlayAsset {
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}
