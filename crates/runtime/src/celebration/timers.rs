//! Auto-dismiss timers, one slot per channel.
//!
//! Arming a slot aborts whatever timer occupied it. Each timer remembers the
//! display token it was armed for; the center re-checks that token when the
//! timer fires, so an abort that loses the race never dismisses a later item.
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use super::queue::{Channel, DisplayToken};

struct ArmedTimer {
    token: DisplayToken,
    task: JoinHandle<()>,
}

#[derive(Default)]
pub(crate) struct DismissTimers {
    full_screen: Option<ArmedTimer>,
    toast: Option<ArmedTimer>,
}

impl DismissTimers {
    fn slot(&mut self, channel: Channel) -> &mut Option<ArmedTimer> {
        match channel {
            Channel::FullScreen => &mut self.full_screen,
            Channel::Toast => &mut self.toast,
        }
    }

    /// Spawns a timer that calls `on_expire` after `delay`.
    ///
    /// Returns false when no tokio runtime is available; the item then stays
    /// up until dismissed by hand.
    pub(crate) fn arm(
        &mut self,
        channel: Channel,
        token: DisplayToken,
        delay: Duration,
        on_expire: impl FnOnce() + Send + 'static,
    ) -> bool {
        self.cancel(channel);

        let Ok(handle) = Handle::try_current() else {
            warn!(
                target: "scorepad::timer",
                channel = channel.as_str(),
                "no tokio runtime, auto-dismiss disabled for this item"
            );
            return false;
        };

        let task = handle.spawn(async move {
            tokio::time::sleep(delay).await;
            on_expire();
        });
        *self.slot(channel) = Some(ArmedTimer { token, task });
        true
    }

    /// Aborts the timer on `channel`, if any.
    pub(crate) fn cancel(&mut self, channel: Channel) {
        if let Some(timer) = self.slot(channel).take() {
            trace!(
                target: "scorepad::timer",
                channel = channel.as_str(),
                token = ?timer.token,
                "timer cancelled"
            );
            timer.task.abort();
        }
    }

    /// Forgets the timer armed for `token` without aborting it.
    ///
    /// Called from the timer's own task once it has fired.
    pub(crate) fn release(&mut self, channel: Channel, token: DisplayToken) {
        let slot = self.slot(channel);
        if slot.as_ref().is_some_and(|timer| timer.token == token) {
            slot.take();
        }
    }

    pub(crate) fn cancel_all(&mut self) {
        self.cancel(Channel::FullScreen);
        self.cancel(Channel::Toast);
    }

    pub(crate) fn is_armed(&self, channel: Channel) -> bool {
        match channel {
            Channel::FullScreen => self.full_screen.is_some(),
            Channel::Toast => self.toast.is_some(),
        }
    }
}

impl Drop for DismissTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
