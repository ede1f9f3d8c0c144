//! Shared celebration state driven by the scorekeeper and by timers.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use scorepad_core::{HapticKind, Milestone, ToastPayload};
use tracing::{debug, info, trace};

use crate::api::{HapticService, SoundService};

use super::queue::{Channel, CelebrationQueue, DisplayToken, PendingCounts, Promoted};
use super::timers::DismissTimers;

struct Stage {
    queue: CelebrationQueue,
    timers: DismissTimers,
}

struct Inner {
    stage: Mutex<Stage>,
    sound: Arc<dyn SoundService>,
    haptics: Arc<dyn HapticService>,
    auto_dismiss: bool,
}

/// Sound and haptic cue owed to a freshly displayed full-screen milestone.
struct Cue {
    sound_key: String,
    haptic: HapticKind,
}

/// Cloneable handle to the celebration queue and its timers.
///
/// Cues fire after the internal lock is released, so services may call back
/// into the handle.
#[derive(Clone)]
pub struct CelebrationCenter {
    inner: Arc<Inner>,
}

impl CelebrationCenter {
    pub fn new(
        queue: CelebrationQueue,
        sound: Arc<dyn SoundService>,
        haptics: Arc<dyn HapticService>,
        auto_dismiss: bool,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                stage: Mutex::new(Stage {
                    queue,
                    timers: DismissTimers::default(),
                }),
                sound,
                haptics,
                auto_dismiss,
            }),
        }
    }

    /// Queues newly detected milestones and displays whatever becomes
    /// current.
    pub fn enqueue(&self, milestones: Vec<Milestone>) {
        if milestones.is_empty() {
            return;
        }

        let cues = {
            let mut stage = self.lock();
            let count = milestones.len();
            let promoted = stage.queue.enqueue(milestones);
            debug!(
                target: "scorepad::celebration",
                count,
                pending = ?stage.queue.pending_counts(),
                "milestones enqueued"
            );
            self.show(&mut stage, promoted)
        };
        self.play(cues);
    }

    pub fn current_full_screen(&self) -> Option<Milestone> {
        self.lock()
            .queue
            .current_full_screen()
            .map(|displayed| displayed.item.clone())
    }

    pub fn current_toast(&self) -> Option<ToastPayload> {
        self.lock()
            .queue
            .current_toast()
            .map(|displayed| displayed.item.clone())
    }

    /// Dismisses the current item on `channel`, cancels its timer and
    /// advances the queue. A no-op when nothing is showing.
    pub fn dismiss(&self, channel: Channel) {
        let cues = {
            let mut stage = self.lock();
            stage.timers.cancel(channel);
            if stage.queue.current_token(channel).is_none() {
                return;
            }
            debug!(
                target: "scorepad::celebration",
                channel = channel.as_str(),
                "dismissed"
            );
            let promoted = stage.queue.dismiss(channel);
            self.show(&mut stage, promoted)
        };
        self.play(cues);
    }

    pub fn pending_counts(&self) -> PendingCounts {
        self.lock().queue.pending_counts()
    }

    /// Returns true if an auto-dismiss timer is pending on `channel`.
    pub fn has_timer(&self, channel: Channel) -> bool {
        self.lock().timers.is_armed(channel)
    }

    /// Drops every shown and pending item and cancels both timers.
    pub fn clear(&self) {
        let mut stage = self.lock();
        stage.timers.cancel_all();
        stage.queue.clear();
        debug!(target: "scorepad::celebration", "celebrations cleared");
    }

    fn expire(&self, channel: Channel, token: DisplayToken) {
        let cues = {
            let mut stage = self.lock();
            stage.timers.release(channel, token);
            let Some(promoted) = stage.queue.dismiss_if_current(channel, token) else {
                trace!(
                    target: "scorepad::timer",
                    channel = channel.as_str(),
                    token = ?token,
                    "stale timer ignored"
                );
                return;
            };
            debug!(
                target: "scorepad::timer",
                channel = channel.as_str(),
                "auto-dismissed"
            );
            self.show(&mut stage, promoted)
        };
        self.play(cues);
    }

    fn show(&self, stage: &mut Stage, promoted: Promoted) -> Vec<Cue> {
        let mut cues = Vec::new();

        if let Some(displayed) = promoted.full_screen {
            let milestone = displayed.item;
            info!(
                target: "scorepad::celebration",
                milestone = %milestone.id,
                priority = milestone.priority,
                "full-screen celebration displayed"
            );
            cues.push(Cue {
                sound_key: milestone.display.sound_key.clone(),
                haptic: milestone.display.haptic,
            });
            self.arm(
                stage,
                Channel::FullScreen,
                displayed.token,
                milestone.display.duration(),
            );
        }

        if let Some(displayed) = promoted.toast {
            debug!(
                target: "scorepad::celebration",
                milestone = %displayed.item.id,
                message = %displayed.item.message,
                "toast displayed"
            );
            self.arm(stage, Channel::Toast, displayed.token, displayed.item.duration());
        }

        cues
    }

    fn arm(&self, stage: &mut Stage, channel: Channel, token: DisplayToken, delay: Duration) {
        if !self.inner.auto_dismiss {
            return;
        }

        let center: Weak<Inner> = Arc::downgrade(&self.inner);
        stage.timers.arm(channel, token, delay, move || {
            if let Some(inner) = center.upgrade() {
                CelebrationCenter { inner }.expire(channel, token);
            }
        });
    }

    fn play(&self, cues: Vec<Cue>) {
        for cue in cues {
            self.inner.sound.play(&cue.sound_key);
            self.inner.haptics.trigger(cue.haptic.as_ref());
        }
    }

    fn lock(&self) -> MutexGuard<'_, Stage> {
        self.inner
            .stage
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CelebrationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stage = self.lock();
        f.debug_struct("CelebrationCenter")
            .field("queue", &stage.queue)
            .field("auto_dismiss", &self.inner.auto_dismiss)
            .finish()
    }
}
