//! High-level scorekeeper façade.
//!
//! The scorekeeper owns the [`ScoreState`], runs every accepted entry through
//! [`ScoreEngine`] and hands the detected milestones to the
//! [`CelebrationCenter`]. Presentation layers talk to this type only.

use std::collections::HashSet;
use std::sync::Arc;

use scorepad_core::{
    Leaderboard, Milestone, Player, PlayerId, PlayerScore, ScoreCategory, ScoreEngine,
    ScoreMutation, ScoreState, ToastPayload, TurnStatus, UpdateOutcome, resolve_turn,
};
use tracing::debug;

use crate::api::{
    HapticService, Result, RuntimeError, SettingsProvider, SilentCues, SoundService,
    StaticSettings,
};
use crate::celebration::{CelebrationCenter, CelebrationQueue, Channel, PendingCounts};
use crate::config::ScorekeeperConfig;

/// Score and celebration engine for one table of players.
///
/// Mutations take `&mut self` and run to completion before returning, so
/// detection always diffs against the state captured right before the entry.
/// Presentation queries and dismissals take `&self`.
pub struct Scorekeeper {
    state: ScoreState,
    settings: Arc<dyn SettingsProvider>,
    celebrations: CelebrationCenter,
}

impl Scorekeeper {
    /// Create a new scorekeeper builder
    pub fn builder() -> ScorekeeperBuilder {
        ScorekeeperBuilder::new()
    }

    /// Records one score entry and queues whatever it triggered.
    ///
    /// The celebration level is read from the settings provider on every
    /// call. Rejected entries leave the state and the queue untouched.
    pub fn update(&mut self, mutation: ScoreMutation) -> Result<UpdateOutcome> {
        let level = self.settings.celebration_level();

        let outcome = match ScoreEngine::new(&mut self.state).execute(&mutation, level) {
            Ok(outcome) => outcome,
            Err(error) => {
                debug!(
                    target: "scorepad::engine",
                    player = %mutation.player,
                    category = %mutation.category,
                    value = mutation.value,
                    code = error.error_code(),
                    "score entry rejected"
                );
                return Err(error.into());
            }
        };

        debug!(
            target: "scorepad::engine",
            player = %mutation.player,
            category = %mutation.category,
            value = mutation.value,
            grand_total = outcome.totals.grand_total,
            turn = outcome.turn.turn_number,
            milestones = outcome.milestones.len(),
            %level,
            "score recorded"
        );

        self.celebrations.enqueue(outcome.milestones.clone());
        Ok(outcome)
    }

    /// Shorthand for [`Scorekeeper::update`].
    pub fn set_category_score(
        &mut self,
        player: PlayerId,
        category: ScoreCategory,
        value: u32,
    ) -> Result<UpdateOutcome> {
        self.update(ScoreMutation::new(player, category, value))
    }

    pub fn current_full_screen_milestone(&self) -> Option<Milestone> {
        self.celebrations.current_full_screen()
    }

    pub fn current_toast(&self) -> Option<ToastPayload> {
        self.celebrations.current_toast()
    }

    /// Cancels the full-screen timer and shows the next queued milestone.
    pub fn dismiss_full_screen_milestone(&self) {
        self.celebrations.dismiss(Channel::FullScreen);
    }

    /// Cancels the toast timer and shows the next queued toast.
    pub fn dismiss_toast(&self) {
        self.celebrations.dismiss(Channel::Toast);
    }

    pub fn resolve_turn(&self) -> TurnStatus {
        resolve_turn(self.state.ledger.scores(), &self.state.players)
    }

    /// Leaderboard as of the last accepted entry.
    ///
    /// The board is recomputed once per accepted entry, so trends compare
    /// against the board before that entry. Repeated queries return the same
    /// board and never move the trend baseline.
    pub fn rank(&self) -> Leaderboard {
        self.state.ranking.latest().cloned().unwrap_or_default()
    }

    pub fn pending_counts(&self) -> PendingCounts {
        self.celebrations.pending_counts()
    }

    /// Starts the same table over: entries, ranking history, fired
    /// milestones and pending celebrations are all discarded.
    pub fn reset(&mut self) {
        self.state.reset();
        self.celebrations.clear();
        debug!(
            target: "scorepad::engine",
            players = self.state.players.len(),
            "game reset"
        );
    }

    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    pub fn score(&self, player: PlayerId) -> Option<&PlayerScore> {
        self.state.ledger.score(player)
    }

    pub fn scores(&self) -> &[PlayerScore] {
        self.state.ledger.scores()
    }

    /// Cloneable handle for presentation code that outlives a borrow.
    pub fn celebrations(&self) -> CelebrationCenter {
        self.celebrations.clone()
    }
}

/// Builder for [`Scorekeeper`] with flexible configuration.
pub struct ScorekeeperBuilder {
    config: ScorekeeperConfig,
    players: Vec<Player>,
    settings: Option<Arc<dyn SettingsProvider>>,
    sound: Arc<dyn SoundService>,
    haptics: Arc<dyn HapticService>,
}

impl ScorekeeperBuilder {
    fn new() -> Self {
        Self {
            config: ScorekeeperConfig::default(),
            players: Vec::new(),
            settings: None,
            sound: Arc::new(SilentCues),
            haptics: Arc::new(SilentCues),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: ScorekeeperConfig) -> Self {
        self.config = config;
        self
    }

    /// Seat the players, in turn order
    pub fn players(mut self, players: impl IntoIterator<Item = Player>) -> Self {
        self.players = players.into_iter().collect();
        self
    }

    /// Seat one more player
    pub fn player(mut self, player: Player) -> Self {
        self.players.push(player);
        self
    }

    /// Set the settings provider.
    ///
    /// Defaults to [`StaticSettings`] at the configured celebration level.
    pub fn settings(mut self, settings: impl SettingsProvider + 'static) -> Self {
        self.settings = Some(Arc::new(settings));
        self
    }

    /// Set the sound service (defaults to silence)
    pub fn sound(mut self, sound: impl SoundService + 'static) -> Self {
        self.sound = Arc::new(sound);
        self
    }

    /// Set the haptic service (defaults to silence)
    pub fn haptics(mut self, haptics: impl HapticService + 'static) -> Self {
        self.haptics = Arc::new(haptics);
        self
    }

    /// Build the scorekeeper.
    ///
    /// Fails if the same player id is seated twice.
    pub fn build(self) -> Result<Scorekeeper> {
        let mut seen = HashSet::with_capacity(self.players.len());
        if let Some(duplicate) = self.players.iter().find(|player| !seen.insert(player.id)) {
            return Err(RuntimeError::DuplicatePlayer {
                player: duplicate.id,
            });
        }

        let settings = self.settings.unwrap_or_else(|| {
            Arc::new(StaticSettings::new(self.config.celebration_level)) as Arc<dyn SettingsProvider>
        });

        let queue = CelebrationQueue::new().with_toast_duration_ms(self.config.toast_duration_ms);
        let celebrations =
            CelebrationCenter::new(queue, self.sound, self.haptics, self.config.auto_dismiss);

        let state = ScoreState::new(self.players, self.config.score);

        debug!(
            target: "scorepad::engine",
            players = state.players.len(),
            auto_dismiss = self.config.auto_dismiss,
            "scorekeeper built"
        );

        Ok(Scorekeeper {
            state,
            settings,
            celebrations,
        })
    }
}
