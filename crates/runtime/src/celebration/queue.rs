//! Two-channel FIFO of pending celebrations.
//!
//! Full-screen milestones and toasts queue independently. Each channel shows
//! at most one item at a time; the next item is promoted only when the
//! current one is dismissed. Every promotion stamps the item with a fresh
//! [`DisplayToken`] so a late timer can tell whether the item it was armed for
//! is still on screen.
use std::collections::VecDeque;

use scorepad_core::{Milestone, Presentation, ToastPayload};

/// Presentation channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    FullScreen,
    Toast,
}

impl Channel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Channel::FullScreen => "full_screen",
            Channel::Toast => "toast",
        }
    }
}

/// Identity of one display of one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayToken(u64);

/// An item currently on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Displayed<T> {
    pub token: DisplayToken,
    pub item: T,
}

/// Items that became current as the result of one queue operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Promoted {
    pub full_screen: Option<Displayed<Milestone>>,
    pub toast: Option<Displayed<ToastPayload>>,
}

impl Promoted {
    pub fn is_empty(&self) -> bool {
        self.full_screen.is_none() && self.toast.is_none()
    }
}

/// Number of items waiting behind the current ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PendingCounts {
    pub full_screen: usize,
    pub toasts: usize,
}

#[derive(Clone, Debug, Default)]
pub struct CelebrationQueue {
    full_screen: VecDeque<Milestone>,
    toasts: VecDeque<ToastPayload>,
    current_full_screen: Option<Displayed<Milestone>>,
    current_toast: Option<Displayed<ToastPayload>>,
    toast_duration_ms: Option<u64>,
    next_token: u64,
}

impl CelebrationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces every toast to stay up for `duration_ms`.
    pub fn with_toast_duration_ms(mut self, duration_ms: Option<u64>) -> Self {
        self.toast_duration_ms = duration_ms;
        self
    }

    /// Routes a batch of freshly detected milestones.
    ///
    /// The batch is ordered by priority (highest first, detection order among
    /// equals) and appended behind whatever is already waiting.
    pub fn enqueue(&mut self, milestones: impl IntoIterator<Item = Milestone>) -> Promoted {
        let mut batch: Vec<Presentation> = milestones
            .into_iter()
            .map(Milestone::into_presentation)
            .collect();
        batch.sort_by(|a, b| b.priority().cmp(&a.priority()));

        for presentation in batch {
            match presentation {
                Presentation::FullScreen(milestone) => self.full_screen.push_back(milestone),
                Presentation::Toast(mut toast) => {
                    if let Some(duration_ms) = self.toast_duration_ms {
                        toast.duration_ms = duration_ms;
                    }
                    self.toasts.push_back(toast);
                }
            }
        }

        self.promote()
    }

    pub fn current_full_screen(&self) -> Option<&Displayed<Milestone>> {
        self.current_full_screen.as_ref()
    }

    pub fn current_toast(&self) -> Option<&Displayed<ToastPayload>> {
        self.current_toast.as_ref()
    }

    /// Token of the item currently shown on `channel`.
    pub fn current_token(&self, channel: Channel) -> Option<DisplayToken> {
        match channel {
            Channel::FullScreen => self.current_full_screen.as_ref().map(|d| d.token),
            Channel::Toast => self.current_toast.as_ref().map(|d| d.token),
        }
    }

    /// Drops the current item on `channel` and promotes the next one.
    /// A no-op when nothing is showing.
    pub fn dismiss(&mut self, channel: Channel) -> Promoted {
        match channel {
            Channel::FullScreen => self.current_full_screen = None,
            Channel::Toast => self.current_toast = None,
        }
        self.promote()
    }

    /// Dismisses only if `token` still identifies the current item on
    /// `channel`. Returns `None` for a stale token.
    pub fn dismiss_if_current(&mut self, channel: Channel, token: DisplayToken) -> Option<Promoted> {
        if self.current_token(channel) != Some(token) {
            return None;
        }
        Some(self.dismiss(channel))
    }

    pub fn pending_counts(&self) -> PendingCounts {
        PendingCounts {
            full_screen: self.full_screen.len(),
            toasts: self.toasts.len(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.current_full_screen.is_none()
            && self.current_toast.is_none()
            && self.full_screen.is_empty()
            && self.toasts.is_empty()
    }

    /// Discards everything, shown or pending.
    pub fn clear(&mut self) {
        self.full_screen.clear();
        self.toasts.clear();
        self.current_full_screen = None;
        self.current_toast = None;
    }

    fn promote(&mut self) -> Promoted {
        let mut promoted = Promoted::default();

        if self.current_full_screen.is_none()
            && let Some(item) = self.full_screen.pop_front()
        {
            let displayed = Displayed {
                token: self.issue_token(),
                item,
            };
            promoted.full_screen = Some(displayed.clone());
            self.current_full_screen = Some(displayed);
        }

        if self.current_toast.is_none()
            && let Some(item) = self.toasts.pop_front()
        {
            let displayed = Displayed {
                token: self.issue_token(),
                item,
            };
            promoted.toast = Some(displayed.clone());
            self.current_toast = Some(displayed);
        }

        promoted
    }

    fn issue_token(&mut self) -> DisplayToken {
        self.next_token += 1;
        DisplayToken(self.next_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorepad_core::milestone::spec_for;
    use scorepad_core::{MilestoneKind, PlayerId};

    fn milestone(player: u32, kind: MilestoneKind) -> Milestone {
        spec_for(kind).build(PlayerId(player), &format!("P{player}"))
    }

    #[test]
    fn batch_is_sorted_by_priority_before_routing() {
        let mut queue = CelebrationQueue::new();

        let promoted = queue.enqueue([
            milestone(1, MilestoneKind::Comeback),
            milestone(1, MilestoneKind::FullHouse),
            milestone(2, MilestoneKind::FiveOfAKind),
            milestone(2, MilestoneKind::BonusUnlocked),
        ]);

        let shown = promoted.full_screen.unwrap();
        assert_eq!(shown.item.kind, MilestoneKind::FiveOfAKind);
        assert_eq!(promoted.toast.unwrap().item.id.kind, MilestoneKind::BonusUnlocked);
        assert_eq!(
            queue.pending_counts(),
            PendingCounts {
                full_screen: 1,
                toasts: 1
            }
        );
    }

    #[test]
    fn later_batches_wait_behind_earlier_ones() {
        let mut queue = CelebrationQueue::new();
        queue.enqueue([milestone(1, MilestoneKind::Comeback)]);

        let promoted = queue.enqueue([milestone(2, MilestoneKind::FiveOfAKind)]);

        assert!(promoted.is_empty());
        assert_eq!(
            queue.current_full_screen().unwrap().item.kind,
            MilestoneKind::Comeback
        );

        let promoted = queue.dismiss(Channel::FullScreen);
        assert_eq!(promoted.full_screen.unwrap().item.kind, MilestoneKind::FiveOfAKind);
    }

    #[test]
    fn dismiss_on_empty_channel_is_a_no_op() {
        let mut queue = CelebrationQueue::new();

        assert!(queue.dismiss(Channel::FullScreen).is_empty());
        assert!(queue.dismiss(Channel::Toast).is_empty());
        assert!(queue.is_idle());
    }

    #[test]
    fn channels_advance_independently() {
        let mut queue = CelebrationQueue::new();
        queue.enqueue([
            milestone(1, MilestoneKind::FiveOfAKind),
            milestone(1, MilestoneKind::LargeStraight),
            milestone(2, MilestoneKind::FullHouse),
        ]);

        let promoted = queue.dismiss(Channel::Toast);

        assert!(promoted.full_screen.is_none());
        assert_eq!(promoted.toast.unwrap().item.id.kind, MilestoneKind::FullHouse);
        assert_eq!(
            queue.current_full_screen().unwrap().item.kind,
            MilestoneKind::FiveOfAKind
        );
    }

    #[test]
    fn stale_token_does_not_dismiss_a_newer_item() {
        let mut queue = CelebrationQueue::new();
        queue.enqueue([
            milestone(1, MilestoneKind::FiveOfAKind),
            milestone(2, MilestoneKind::Comeback),
        ]);
        let first = queue.current_token(Channel::FullScreen).unwrap();
        queue.dismiss(Channel::FullScreen);

        assert!(queue.dismiss_if_current(Channel::FullScreen, first).is_none());
        assert_eq!(
            queue.current_full_screen().unwrap().item.kind,
            MilestoneKind::Comeback
        );

        let second = queue.current_token(Channel::FullScreen).unwrap();
        assert_ne!(first, second);
        assert!(queue.dismiss_if_current(Channel::FullScreen, second).is_some());
        assert!(queue.current_full_screen().is_none());
    }

    #[test]
    fn toast_duration_override_applies_to_toasts_only() {
        let mut queue = CelebrationQueue::new().with_toast_duration_ms(Some(900));
        queue.enqueue([
            milestone(1, MilestoneKind::FiveOfAKind),
            milestone(1, MilestoneKind::FullHouse),
        ]);

        assert_eq!(queue.current_toast().unwrap().item.duration_ms, 900);
        assert_eq!(
            queue.current_full_screen().unwrap().item.display.duration_ms,
            4_000
        );
    }

    #[test]
    fn clear_drops_shown_and_pending_items() {
        let mut queue = CelebrationQueue::new();
        queue.enqueue([
            milestone(1, MilestoneKind::FiveOfAKind),
            milestone(2, MilestoneKind::Comeback),
            milestone(2, MilestoneKind::FullHouse),
        ]);

        queue.clear();

        assert!(queue.is_idle());
        assert_eq!(queue.pending_counts(), PendingCounts::default());
    }
}
