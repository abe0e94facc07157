use crate::{Animation, now_millis};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

/// Owned handle to an [`Animation`] ticking on a background task.
///
/// The animation is moved onto a tokio task that steps it once per
/// [`interval`](Animation::interval) and publishes each resulting frame on a
/// `watch` channel. A step always finishes before the next one starts; when
/// the task falls behind, the next step is delayed instead of bursting.
///
/// The timer lives exactly as long as the handle: [`stop`](Self::stop) or
/// dropping the handle aborts the task, after which subscribers see the
/// channel close.
///
/// # Example
///
/// ```
/// use ticker_sim::{LiveTicker, StockTicker, TickerConfig, now_millis};
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let mut ticker = StockTicker::new(TickerConfig::default());
/// ticker.seed(now_millis());
///
/// let live = LiveTicker::spawn(ticker);
/// let mut frames = live.subscribe();
///
/// frames.changed().await.unwrap();
/// assert_eq!(frames.borrow().line.len(), 31);
///
/// live.stop();
/// # }
/// ```
#[derive(Debug)]
pub struct LiveTicker<F> {
    frames: watch::Receiver<F>,
    handle: Option<JoinHandle<()>>,
}

impl<F> LiveTicker<F>
where
    F: Clone + Send + Sync + 'static,
{
    /// Starts driving `animation`. The first step runs one interval from now.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn spawn<A>(animation: A) -> Self
    where
        A: Animation<Frame = F> + Send + 'static,
    {
        let (sender, frames) = watch::channel(animation.frame());
        let period = animation.interval();

        let handle = tokio::spawn(run(animation, sender));
        info!(?period, "live animation started");

        Self {
            frames,
            handle: Some(handle),
        }
    }

    /// New receiver of published frames.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<F> {
        self.frames.clone()
    }

    /// Most recently published frame.
    #[must_use]
    pub fn latest(&self) -> F {
        self.frames.borrow().clone()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Stops the timer. No further frames are published.
    pub fn stop(mut self) {
        self.shutdown();
    }
}

impl<F> LiveTicker<F> {
    fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("live animation stopped");
        }
    }
}

impl<F> Drop for LiveTicker<F> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run<A: Animation>(mut animation: A, frames: watch::Sender<A::Frame>) {
    let period = animation.interval();
    let mut timer = time::interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        timer.tick().await;

        animation.advance(now_millis());

        if frames.send(animation.frame()).is_err() {
            debug!("no frame subscribers left");
            break;
        }
    }
}
