use kurbo::{Size, Vec2};

/// Horizontal edge an overlay is anchored to and slides from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HorizontalEdge {
    Left,
    Right,
}

impl HorizontalEdge {
    /// Whether the texture must be mirrored on this axis to stay upright.
    pub fn flips_texture(self) -> bool {
        matches!(self, Self::Right)
    }
}

/// Vertical edge an overlay is anchored to and slides from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VerticalEdge {
    Top,
    Bottom,
}

impl VerticalEdge {
    /// Whether the texture must be mirrored on this axis to stay upright.
    pub fn flips_texture(self) -> bool {
        matches!(self, Self::Top)
    }
}

/// Per-axis anchor edges chosen for one visit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnchorEdges {
    pub horizontal: HorizontalEdge,
    pub vertical: VerticalEdge,
}

/// Geometry applied to an attached overlay drawable.
///
/// Offsets are measured from the anchored edge on each axis: 0 is flush
/// with the root, negative values move the overlay off-root past that edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayGeometry {
    pub offset: Vec2,
    /// Placed size after scale-to-fit.
    pub size: Size,
    pub anchors: AnchorEdges,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl OverlayGeometry {
    pub fn new(offset: Vec2, size: Size, anchors: AnchorEdges) -> Self {
        Self {
            offset,
            size,
            anchors,
            flip_x: anchors.horizontal.flips_texture(),
            flip_y: anchors.vertical.flips_texture(),
        }
    }
}

/// Uniform scale-to-fit ratio in [0, 1]: preserves aspect ratio, never
/// upscales past native size, never exceeds the root's bounds.
///
/// Asset dimensions must be positive; decoding enforces that.
pub fn fit_ratio(root: Size, asset: Size) -> f64 {
    (root.width / asset.width)
        .min(root.height / asset.height)
        .min(1.0)
        .max(0.0)
}

/// Asset size scaled by [`fit_ratio`].
pub fn placed_size(root: Size, asset: Size) -> Size {
    let ratio = fit_ratio(root, asset);
    Size::new(asset.width * ratio, asset.height * ratio)
}

/// Offset from the anchor edges for a blend value in [0, 1]:
/// 0 is flush with the root, 1 is fully off-root on both axes.
pub fn slide_offset(blend: f64, size: Size) -> Vec2 {
    Vec2::new(-blend * size.width, -blend * size.height)
}
