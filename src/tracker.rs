//! # Wake/Sleep Classification
//!
//! The core state machine: consumes one accelerometer sample per call and
//! notifies a sink whenever the classified state changes.
//!
//! ## Decision Rule
//!
//! Per-sample angle estimates are aggregated into fixed windows (5 s at
//! defaults) and the absolute change between consecutive window means is
//! recorded in a trailing history (60 windows = 5 minutes at defaults). The
//! classification is asymmetric on purpose:
//!
//! - **Asleep** requires the *entire* trailing history to stay at or below
//!   the angle-change threshold, i.e. many consecutive calm windows
//! - **Awake** requires a single window anywhere in the history to exceed
//!   the threshold, so one disruptive movement is enough
//!
//! This gives sleep onset inertia while wake detection stays prompt, the
//! usual shape of actigraphy-based sleep scoring.
//!
//! ## Warm-Up
//!
//! Until the change history has been filled once end-to-end, its slots still
//! hold their initial zeros; a scan over them would see fabricated calm. A
//! countdown equal to the history length suppresses classification until
//! every slot holds a real measurement, so no event fires during roughly the
//! first `window_seconds * history_windows` seconds of wear.

use crate::config::Config;
use crate::ring_buffer::RingBuffer;
use crate::signal::{arm_angle_deg, ema};
use crate::SleepState;

/// Capability boundary for sample ingestion.
///
/// One call per sample, in chronological order, at the configured rate.
/// There is no return value and no error path; malformed floating input
/// propagates arithmetically rather than being rejected.
pub trait SleepTracker {
    fn update_accel(&mut self, x: f32, y: f32, z: f32);
}

/// Accelerometer-only wake/sleep classifier after van Hees et al. 2015.
///
/// The event sink is any `FnMut(SleepState)`; it is stored at construction
/// and invoked synchronously from inside [`SleepTracker::update_accel`],
/// exactly when the classification changes. The first classification after
/// warm-up always counts as a change.
///
/// # Example
/// ```
/// use sleep_tracker_lib::tracker::{SleepTracker, VanHeesTracker};
///
/// let mut tracker = VanHeesTracker::new(|state| {
///     println!("state changed: {:?}", state);
/// });
/// tracker.update_accel(0.0, 0.0, 1.0);
/// assert_eq!(tracker.state(), None); // still warming up
/// ```
pub struct VanHeesTracker<F: FnMut(SleepState)> {
    // tuning, fixed at construction
    eta: f32,
    window_len: usize,
    angle_threshold_deg: f32,

    // per-axis smoothed acceleration
    accel_avgs: [f32; 3],
    /// Samples accumulated in the current window; always <= window_len
    iteration: usize,
    /// Angle trace of the current window
    arm_angle_hist: RingBuffer<f32>,
    /// Window-to-window angle changes, the decision memory
    arm_angle_change_hist: RingBuffer<f32>,
    /// Mean of the most recently completed window; None until one exists
    prev_window_mean: Option<f32>,
    /// Windows left before the change history has been filled end-to-end
    warmup_remaining: usize,
    /// Last classification handed to the sink; None until post-warm-up
    state: Option<SleepState>,

    on_change: F,
}

impl<F: FnMut(SleepState)> VanHeesTracker<F> {
    /// Build a tracker with the default tuning (10 Hz, 5 s windows,
    /// 60-window history, 5° threshold).
    pub fn new(on_change: F) -> Self {
        Self::with_config(&Config::default(), on_change)
    }

    /// Build a tracker from a loaded configuration.
    ///
    /// Both ring buffers are allocated here, once; ingestion never
    /// allocates afterwards.
    pub fn with_config(config: &Config, on_change: F) -> Self {
        let window_len = config.window_len();
        let history_windows = config.classifier.history_windows;
        Self {
            eta: config.classifier.smoothing_eta,
            window_len,
            angle_threshold_deg: config.classifier.angle_threshold_deg,
            accel_avgs: [0.0; 3],
            iteration: 0,
            arm_angle_hist: RingBuffer::new(window_len),
            arm_angle_change_hist: RingBuffer::new(history_windows),
            prev_window_mean: None,
            warmup_remaining: history_windows,
            state: None,
            on_change,
        }
    }

    /// The most recent classification, or `None` while warming up.
    pub fn state(&self) -> Option<SleepState> {
        self.state
    }

    /// Close out a completed window: fold its angle trace into the change
    /// history and reclassify once warm.
    fn finish_window(&mut self) {
        let window_mean = self.arm_angle_hist.iter().sum::<f32>() / self.window_len as f32;

        if let Some(prev_mean) = self.prev_window_mean {
            let change = (window_mean - prev_mean).abs();
            self.arm_angle_change_hist.push(change);

            if self.warmup_remaining > 0 {
                // change history still contains initial zeros
                self.warmup_remaining -= 1;
            } else {
                // calm across the whole history means sleep; one disruptive
                // window anywhere in it means wake
                let threshold = self.angle_threshold_deg;
                let new_state = if self.arm_angle_change_hist.iter().any(|&c| c > threshold) {
                    SleepState::Awake
                } else {
                    SleepState::Asleep
                };

                if self.state != Some(new_state) {
                    (self.on_change)(new_state);
                }
                self.state = Some(new_state);
            }
        }

        self.prev_window_mean = Some(window_mean);
        self.iteration = 0;
    }
}

impl<F: FnMut(SleepState)> SleepTracker for VanHeesTracker<F> {
    fn update_accel(&mut self, x: f32, y: f32, z: f32) {
        // update per-axis averages
        self.accel_avgs[0] = ema(x, self.accel_avgs[0], self.eta);
        self.accel_avgs[1] = ema(y, self.accel_avgs[1], self.eta);
        self.accel_avgs[2] = ema(z, self.accel_avgs[2], self.eta);

        // estimate arm angle and extend the window's trace
        self.arm_angle_hist.push(arm_angle_deg(
            self.accel_avgs[0],
            self.accel_avgs[1],
            self.accel_avgs[2],
        ));
        self.iteration += 1;

        if self.iteration == self.window_len {
            self.finish_window();
        }
    }
}
