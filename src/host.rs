//! Traits the host application implements, plus the implementations the
//! crate ships for hosts that only need the common cases.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

use kurbo::Size;

use crate::assets::OverlayAsset;
use crate::error::SidleResult;
use crate::placement::OverlayGeometry;

/// Monotonic wall-clock source, in seconds. No epoch is implied; only
/// differences between readings are meaningful.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Callback registered with a [`TickSource`], invoked once per host update
/// cycle. No fixed interval is guaranteed.
pub type TickFn = Rc<dyn Fn()>;

/// Identifies one subscription on a [`TickSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

/// The host's per-frame tick signal.
///
/// Unsubscribing an id that is no longer registered must be a no-op, and
/// both operations must be safe from within a delivered tick callback.
pub trait TickSource {
    fn subscribe(&self, tick: TickFn) -> SubscriberId;
    fn unsubscribe(&self, id: SubscriberId);
}

/// Queryable set of host UI surfaces able to carry an overlay.
pub trait RootDiscovery {
    /// All currently live root surfaces.
    ///
    /// An error means the discovery capability itself is unavailable,
    /// which callers treat differently from an empty list.
    fn list_roots(&self) -> SidleResult<Vec<RenderRoot>>;
}

/// A host UI surface paired with its display name.
#[derive(Clone)]
pub struct RenderRoot {
    pub name: String,
    pub attach: Rc<dyn AttachPoint>,
}

/// Opaque drawable content produced by an [`ImageDecoder`] and consumed by
/// an [`AttachPoint`]. Hosts downcast through [`Drawable::as_any`].
pub trait Drawable: Any {
    fn as_any(&self) -> &dyn Any;
}

/// Decodes encoded image bytes into a drawable plus its intrinsic size.
pub trait ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> SidleResult<OverlayAsset>;
}

/// Host primitive to add, remove and position a drawable on one root
/// surface's render tree.
pub trait AttachPoint {
    /// Current width/height of the root's content area.
    fn bounds(&self) -> Size;
    fn attach(&self, drawable: &Rc<dyn Drawable>);
    fn detach(&self, drawable: &Rc<dyn Drawable>);
    fn set_geometry(&self, drawable: &Rc<dyn Drawable>, geometry: &OverlayGeometry);
}

/// [`Clock`] backed by [`std::time::Instant`].
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// [`TickSource`] for hosts that own a plain frame loop: call
/// [`ManualTickSource::emit`] once per update.
///
/// Delivery iterates a snapshot of the subscriber list, so callbacks may
/// subscribe or unsubscribe (themselves included) while a tick is being
/// delivered.
#[derive(Default)]
pub struct ManualTickSource {
    subscribers: RefCell<Vec<(SubscriberId, TickFn)>>,
    next_id: Cell<u64>,
}

impl ManualTickSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one tick to every current subscriber.
    pub fn emit(&self) {
        let snapshot: Vec<TickFn> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, tick)| tick.clone())
            .collect();
        for tick in snapshot {
            tick();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl TickSource for ManualTickSource {
    fn subscribe(&self, tick: TickFn) -> SubscriberId {
        let id = SubscriberId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, tick));
        id
    }

    fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.borrow_mut().retain(|(s, _)| *s != id);
    }
}
