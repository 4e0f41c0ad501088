//! Timed, eased slide-in overlay animations for host UI surfaces.
//!
//! `sidle` periodically discovers the host application's live UI root
//! surfaces, picks one at random, and slides a transient image overlay in
//! from a random corner — eased over wall-clock time, held for a while,
//! then slid back out — forever, until stopped.
//!
//! The host supplies four capabilities through the traits in [`host`]:
//! per-frame ticks, a monotonic clock, surface discovery, and an
//! attach/geometry primitive per surface. The crate supplies the
//! cooperative scheduling and the animation: everything runs on the
//! thread that delivers ticks, waits are expressed as deadlines rather
//! than sleeps, and at most one overlay is ever attached.
#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod controller;
pub mod cycle;
pub mod decode;
pub mod discover;
pub mod ease;
pub mod error;
pub mod host;
pub mod placement;
pub mod scheduler;
pub mod sequence;

pub use assets::OverlayAsset;
pub use config::CycleTimings;
pub use controller::{Controller, HostContext};
pub use cycle::OverlayCycle;
pub use decode::{PixelImageDecoder, PreparedImage};
pub use ease::Ease;
pub use error::{SidleError, SidleResult};
pub use host::{
    AttachPoint, Clock, Drawable, ImageDecoder, ManualTickSource, MonotonicClock, RenderRoot,
    RootDiscovery, SubscriberId, TickFn, TickSource,
};
pub use placement::{AnchorEdges, HorizontalEdge, OverlayGeometry, VerticalEdge};
pub use scheduler::{Scheduler, SchedulerStatus};
pub use sequence::{Sequence, Step};
