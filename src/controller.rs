use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::assets::OverlayAsset;
use crate::config::CycleTimings;
use crate::cycle::OverlayCycle;
use crate::error::{SidleError, SidleResult};
use crate::host::{Clock, ImageDecoder, RootDiscovery, SubscriberId, TickFn, TickSource};
use crate::scheduler::{Scheduler, SchedulerStatus};

/// Host capabilities the controller needs, injected at construction.
#[derive(Clone)]
pub struct HostContext {
    pub clock: Rc<dyn Clock>,
    pub discovery: Rc<dyn RootDiscovery>,
    pub decoder: Rc<dyn ImageDecoder>,
}

struct ActiveRun {
    driver: Rc<RefCell<Scheduler<OverlayCycle>>>,
    subscriber: SubscriberId,
}

/// Owns start/stop for the overlay visit loop.
///
/// Assets are decoded once at construction and live as long as the
/// controller value, independent of the active/inactive state. [`start`]
/// while active resets the run; [`stop`] while inactive is a no-op.
///
/// Everything runs on the thread that delivers tick callbacks. `stop` is
/// safe from sibling handlers on that path — the tick callback releases
/// its borrow of the run state before control returns to the host loop.
/// Calling `stop` re-entrantly from inside the running sequence body
/// itself (i.e. from a host primitive invoked by the animator) is outside
/// the contract.
///
/// [`start`]: Controller::start
/// [`stop`]: Controller::stop
pub struct Controller {
    host: HostContext,
    tick_source: Rc<dyn TickSource>,
    timings: CycleTimings,
    assets: Vec<Rc<OverlayAsset>>,
    run: Option<ActiveRun>,
}

impl Controller {
    /// Validate the timings and decode every configured asset.
    pub fn new(
        host: HostContext,
        tick_source: Rc<dyn TickSource>,
        timings: CycleTimings,
        asset_sources: &[&[u8]],
    ) -> SidleResult<Self> {
        timings.validate()?;
        if asset_sources.is_empty() {
            return Err(SidleError::config("at least one overlay asset is required"));
        }

        let mut assets = Vec::with_capacity(asset_sources.len());
        for bytes in asset_sources {
            assets.push(Rc::new(host.decoder.decode(bytes)?));
        }

        Ok(Self {
            host,
            tick_source,
            timings,
            assets,
            run: None,
        })
    }

    pub fn is_active(&self) -> bool {
        self.run.is_some()
    }

    /// Begin the visit loop, resetting any run already in progress.
    pub fn start(&mut self) {
        self.stop();

        let cycle = OverlayCycle::new(
            self.host.clock.clone(),
            self.host.discovery.clone(),
            self.assets.clone(),
            self.timings,
            StdRng::from_entropy(),
        );
        let driver = Rc::new(RefCell::new(Scheduler::new(
            cycle,
            self.host.clock.now(),
        )));

        // The callback self-deregisters when the scheduler finishes or
        // faults, so the slot it reads its own id from is shared with it.
        let own_id = Rc::new(Cell::new(None::<SubscriberId>));
        let tick: TickFn = Rc::new({
            let driver = driver.clone();
            let clock = self.host.clock.clone();
            let tick_source = self.tick_source.clone();
            let own_id = own_id.clone();
            move || {
                let Ok(mut scheduler) = driver.try_borrow_mut() else {
                    // A tick delivered while a resume is still running is
                    // skipped, not queued.
                    return;
                };
                let outcome = scheduler.tick(clock.now());
                drop(scheduler);
                match outcome {
                    Ok(SchedulerStatus::Waiting | SchedulerStatus::Resumed) => {}
                    Ok(SchedulerStatus::Finished) => {
                        if let Some(id) = own_id.take() {
                            tick_source.unsubscribe(id);
                        }
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "overlay scheduler fault, halting run");
                        if let Some(id) = own_id.take() {
                            tick_source.unsubscribe(id);
                        }
                    }
                }
            }
        });

        let subscriber = self.tick_source.subscribe(tick);
        own_id.set(Some(subscriber));
        tracing::debug!(?subscriber, "overlay loop started");
        self.run = Some(ActiveRun { driver, subscriber });
    }

    /// Stop the visit loop and remove any live overlay, whatever phase it
    /// is in.
    pub fn stop(&mut self) {
        let Some(run) = self.run.take() else { return };
        self.tick_source.unsubscribe(run.subscriber);
        run.driver.borrow_mut().sequence_mut().clear();
        tracing::debug!(subscriber = ?run.subscriber, "overlay loop stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Drawable, ManualTickSource, RenderRoot};

    #[derive(Clone, Default)]
    struct ZeroClock;

    impl Clock for ZeroClock {
        fn now(&self) -> f64 {
            0.0
        }
    }

    struct NoRoots;

    impl RootDiscovery for NoRoots {
        fn list_roots(&self) -> SidleResult<Vec<RenderRoot>> {
            Ok(Vec::new())
        }
    }

    struct TestDrawable;

    impl Drawable for TestDrawable {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    struct FixedDecoder;

    impl ImageDecoder for FixedDecoder {
        fn decode(&self, _bytes: &[u8]) -> SidleResult<OverlayAsset> {
            Ok(OverlayAsset {
                drawable: Rc::new(TestDrawable),
                width: 8,
                height: 8,
            })
        }
    }

    fn host() -> HostContext {
        HostContext {
            clock: Rc::new(ZeroClock),
            discovery: Rc::new(NoRoots),
            decoder: Rc::new(FixedDecoder),
        }
    }

    fn controller(ticks: Rc<ManualTickSource>) -> Controller {
        Controller::new(host(), ticks, CycleTimings::default(), &[b"img".as_slice()]).unwrap()
    }

    #[test]
    fn empty_asset_set_is_rejected() {
        let err = Controller::new(
            host(),
            Rc::new(ManualTickSource::new()),
            CycleTimings::default(),
            &[],
        );
        assert!(err.is_err());
    }

    #[test]
    fn invalid_timings_are_rejected() {
        let timings = CycleTimings {
            hold_secs: [5.0, 1.0],
            ..Default::default()
        };
        let err = Controller::new(
            host(),
            Rc::new(ManualTickSource::new()),
            timings,
            &[b"img".as_slice()],
        );
        assert!(err.is_err());
    }

    #[test]
    fn start_subscribes_and_stop_unsubscribes() {
        let ticks = Rc::new(ManualTickSource::new());
        let mut controller = controller(ticks.clone());
        assert!(!controller.is_active());

        controller.start();
        assert!(controller.is_active());
        assert_eq!(ticks.subscriber_count(), 1);

        controller.stop();
        assert!(!controller.is_active());
        assert_eq!(ticks.subscriber_count(), 0);
    }

    #[test]
    fn restart_replaces_the_subscription() {
        let ticks = Rc::new(ManualTickSource::new());
        let mut controller = controller(ticks.clone());

        controller.start();
        ticks.emit();
        controller.start();
        assert_eq!(ticks.subscriber_count(), 1);
        assert!(controller.is_active());
    }

    #[test]
    fn stop_while_inactive_is_a_noop() {
        let ticks = Rc::new(ManualTickSource::new());
        let mut controller = controller(ticks.clone());

        controller.stop();
        controller.stop();
        assert!(!controller.is_active());
        assert_eq!(ticks.subscriber_count(), 0);
    }
}
