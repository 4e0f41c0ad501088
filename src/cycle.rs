use std::rc::Rc;

use kurbo::Size;
use rand::Rng;
use rand::rngs::StdRng;

use crate::assets::OverlayAsset;
use crate::config::CycleTimings;
use crate::discover;
use crate::host::{AttachPoint, Clock, Drawable, RootDiscovery};
use crate::placement::{self, AnchorEdges, HorizontalEdge, OverlayGeometry, VerticalEdge};
use crate::sequence::{Sequence, Step};

/// The currently placed overlay. Detaches from its root when dropped, so
/// there is exactly one removal path whether a visit ends normally or is
/// cancelled mid-animation.
struct OverlayInstance {
    attach: Rc<dyn AttachPoint>,
    drawable: Rc<dyn Drawable>,
    placed: Size,
    anchors: AnchorEdges,
}

impl OverlayInstance {
    /// Apply the slide geometry for a blend value in [0, 1]:
    /// 0 is flush with the root, 1 is fully off-root.
    fn slide(&self, blend: f64) {
        let geometry = OverlayGeometry::new(
            placement::slide_offset(blend, self.placed),
            self.placed,
            self.anchors,
        );
        self.attach.set_geometry(&self.drawable, &geometry);
    }
}

impl Drop for OverlayInstance {
    fn drop(&mut self) {
        self.attach.detach(&self.drawable);
    }
}

enum Phase {
    Boot,
    Acquire,
    Emerge { overlay: OverlayInstance, started_at: f64 },
    Hold { overlay: OverlayInstance },
    Leave { overlay: OverlayInstance, started_at: f64 },
}

/// The overlay animator: an explicit state machine running the infinite
/// acquire → emerge → hold → leave visit cycle, one phase section per
/// [`Sequence::resume`] call.
///
/// Roots are re-queried fresh at the start of every cycle; a cycle with no
/// usable roots is skipped, proceeding straight to the between-cycles wait.
pub struct OverlayCycle {
    clock: Rc<dyn Clock>,
    discovery: Rc<dyn RootDiscovery>,
    /// Non-empty; the controller enforces that at construction.
    assets: Vec<Rc<OverlayAsset>>,
    timings: CycleTimings,
    rng: StdRng,
    phase: Phase,
}

impl OverlayCycle {
    pub fn new(
        clock: Rc<dyn Clock>,
        discovery: Rc<dyn RootDiscovery>,
        assets: Vec<Rc<OverlayAsset>>,
        timings: CycleTimings,
        rng: StdRng,
    ) -> Self {
        Self {
            clock,
            discovery,
            assets,
            timings,
            rng,
            phase: Phase::Boot,
        }
    }

    /// Drop any live overlay (detaching it) and rewind to the start of the
    /// sequence.
    pub fn clear(&mut self) {
        self.phase = Phase::Boot;
    }

    pub fn has_live_overlay(&self) -> bool {
        matches!(
            self.phase,
            Phase::Emerge { .. } | Phase::Hold { .. } | Phase::Leave { .. }
        )
    }

    fn draw_secs(&mut self, [min, max]: [f64; 2]) -> f64 {
        self.rng.gen_range(min..=max)
    }

    /// Skip to the between-cycles wait; the next resume starts a new cycle.
    fn rest(&mut self) -> Step {
        self.phase = Phase::Acquire;
        Step::Wait(self.draw_secs(self.timings.between_secs))
    }

    fn acquire(&mut self) -> Step {
        let Some(mut roots) = discover::eligible_roots(self.discovery.as_ref()) else {
            return self.rest();
        };

        let root = roots.swap_remove(self.rng.gen_range(0..roots.len()));
        let asset_index = self.rng.gen_range(0..self.assets.len());
        let asset = &self.assets[asset_index];

        let anchors = AnchorEdges {
            horizontal: if self.rng.gen_bool(0.5) {
                HorizontalEdge::Left
            } else {
                HorizontalEdge::Right
            },
            vertical: if self.rng.gen_bool(0.5) {
                VerticalEdge::Top
            } else {
                VerticalEdge::Bottom
            },
        };

        let placed = placement::placed_size(root.attach.bounds(), asset.size());
        tracing::debug!(root = %root.name, asset = asset_index, ?anchors, "overlay emerging");

        let overlay = OverlayInstance {
            attach: root.attach.clone(),
            drawable: asset.drawable.clone(),
            placed,
            anchors,
        };
        overlay.attach.attach(&overlay.drawable);
        overlay.slide(1.0);

        self.phase = Phase::Emerge {
            overlay,
            started_at: self.clock.now(),
        };
        Step::NextTick
    }

    fn emerge(&mut self, overlay: OverlayInstance, started_at: f64) -> Step {
        let t = (self.clock.now() - started_at) / self.timings.emerge_secs;
        if t < 1.0 {
            overlay.slide(1.0 - self.timings.ease.apply(t));
            self.phase = Phase::Emerge { overlay, started_at };
            return Step::NextTick;
        }

        // Snap flush; coarse ticks may overshoot the duration.
        overlay.slide(0.0);
        self.phase = Phase::Hold { overlay };
        Step::Wait(self.draw_secs(self.timings.hold_secs))
    }

    fn leave(&mut self, overlay: OverlayInstance, started_at: f64) -> Step {
        let t = (self.clock.now() - started_at) / self.timings.leave_secs;
        if t < 1.0 {
            overlay.slide(self.timings.ease.apply(t));
            self.phase = Phase::Leave { overlay, started_at };
            return Step::NextTick;
        }

        drop(overlay);
        self.rest()
    }
}

impl Sequence for OverlayCycle {
    fn resume(&mut self) -> Option<Step> {
        let step = match std::mem::replace(&mut self.phase, Phase::Boot) {
            Phase::Boot => {
                self.phase = Phase::Acquire;
                Step::Wait(self.draw_secs(self.timings.initial_wait_secs))
            }
            Phase::Acquire => self.acquire(),
            Phase::Emerge { overlay, started_at } => self.emerge(overlay, started_at),
            Phase::Hold { overlay } => {
                tracing::debug!("overlay leaving");
                self.phase = Phase::Leave {
                    overlay,
                    started_at: self.clock.now(),
                };
                Step::NextTick
            }
            Phase::Leave { overlay, started_at } => self.leave(overlay, started_at),
        };
        Some(step)
    }
}
