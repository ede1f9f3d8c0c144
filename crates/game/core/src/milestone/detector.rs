use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::ranking::Leaderboard;
use crate::state::{Player, PlayerId, PlayerScore, ScoreDelta};

use super::rules::{DetectionContext, Detected, MilestoneRule, default_rules};
use super::{CelebrationLevel, Milestone, MilestoneId, spec_for};

/// Snapshots compared by one detection pass.
///
/// `before` must be captured immediately before the mutation that produced
/// `after`; diffing anything else misses or invents transitions.
#[derive(Clone, Copy, Debug)]
pub struct DetectionInput<'a> {
    pub players: &'a [Player],
    pub before: &'a [PlayerScore],
    pub after: &'a [PlayerScore],
    pub previous_ranking: Option<&'a Leaderboard>,
    pub ranking: &'a Leaderboard,
    pub level: CelebrationLevel,
}

/// Turns snapshot transitions into milestones.
///
/// The detector remembers which milestone ids already fired and each
/// player's last recorded position. Both memories carry across calls and are
/// cleared only by [`reset`](Self::reset).
#[derive(Clone)]
pub struct MilestoneDetector {
    rules: Arc<[Arc<dyn MilestoneRule>]>,
    fired: HashSet<MilestoneId>,
    positions: HashMap<PlayerId, usize>,
}

impl MilestoneDetector {
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    pub fn with_rules(rules: Arc<[Arc<dyn MilestoneRule>]>) -> Self {
        Self {
            rules,
            fired: HashSet::new(),
            positions: HashMap::new(),
        }
    }

    /// Records starting positions from an initial leaderboard.
    pub fn seed_positions(&mut self, board: Option<&Leaderboard>) {
        if let Some(board) = board {
            self.record_positions(board);
        }
    }

    /// Runs every rule against one update and returns the surviving
    /// milestones, in detection order.
    ///
    /// Each finding is dropped if its player is not seated, if its id has
    /// already fired, or if `input.level` filters its kind. An id is marked
    /// fired before the level filter, so changing the level later never
    /// resurrects an old event.
    pub fn detect(&mut self, input: &DetectionInput<'_>) -> Vec<Milestone> {
        let delta = ScoreDelta::from_snapshots(input.before, input.after);

        let mut found: Vec<Detected> = Vec::new();
        {
            let ctx = DetectionContext {
                input,
                delta: &delta,
                recorded_positions: &self.positions,
            };
            for rule in self.rules.iter() {
                rule.detect(&ctx, &mut found);
            }
        }

        // Positions carry forward whether or not a comeback fired.
        self.record_positions(input.ranking);

        found
            .into_iter()
            .filter_map(|detected| {
                let player = input
                    .players
                    .iter()
                    .find(|player| player.id == detected.player)?;

                let id = MilestoneId::new(detected.player, detected.kind);
                if !self.fired.insert(id) {
                    return None;
                }
                if !input.level.allows(detected.kind) {
                    return None;
                }

                Some(spec_for(detected.kind).build(player.id, &player.name))
            })
            .collect()
    }

    pub fn has_fired(&self, id: MilestoneId) -> bool {
        self.fired.contains(&id)
    }

    /// Position recorded for `player` at the end of the last pass.
    pub fn recorded_position(&self, player: PlayerId) -> Option<usize> {
        self.positions.get(&player).copied()
    }

    /// Forgets fired ids and recorded positions.
    pub fn reset(&mut self) {
        self.fired.clear();
        self.positions.clear();
    }

    fn record_positions(&mut self, board: &Leaderboard) {
        self.positions = board
            .entries()
            .iter()
            .map(|entry| (entry.player, entry.position))
            .collect();
    }
}

impl Default for MilestoneDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MilestoneDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MilestoneDetector")
            .field(
                "rules",
                &self.rules.iter().map(|rule| rule.name()).collect::<Vec<_>>(),
            )
            .field("fired", &self.fired)
            .field("positions", &self.positions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milestone::MilestoneKind;
    use crate::ranking::RankingEngine;
    use crate::state::{ScoreCategory, ScoreLedger};

    /// Minimal harness that mirrors the engine's snapshot/rank/detect order.
    struct Table {
        players: Vec<Player>,
        ledger: ScoreLedger,
        ranking: RankingEngine,
        detector: MilestoneDetector,
        level: CelebrationLevel,
    }

    impl Table {
        fn new(count: u32, level: CelebrationLevel) -> Self {
            let players: Vec<Player> = (1..=count)
                .map(|id| Player::new(PlayerId(id), format!("P{id}"), "#123456"))
                .collect();
            let ledger = ScoreLedger::for_players(&players);
            let mut ranking = RankingEngine::default();
            ranking.rank(ledger.scores(), &players);
            let mut detector = MilestoneDetector::new();
            detector.seed_positions(ranking.latest());
            Self {
                players,
                ledger,
                ranking,
                detector,
                level,
            }
        }

        fn set(&mut self, player: u32, category: ScoreCategory, value: u32) -> Vec<Milestone> {
            let before = self.ledger.scores().to_vec();
            let previous = self.ranking.latest().cloned();
            self.ledger
                .set_category_score(PlayerId(player), category, value)
                .unwrap();
            let board = self.ranking.rank(self.ledger.scores(), &self.players);
            self.detector.detect(&DetectionInput {
                players: &self.players,
                before: &before,
                after: self.ledger.scores(),
                previous_ranking: previous.as_ref(),
                ranking: &board,
                level: self.level,
            })
        }

        fn redetect(&mut self) -> Vec<Milestone> {
            let scores = self.ledger.scores().to_vec();
            let previous = self.ranking.latest().cloned();
            let board = self.ranking.rank(&scores, &self.players);
            self.detector.detect(&DetectionInput {
                players: &self.players,
                before: &scores,
                after: &scores,
                previous_ranking: previous.as_ref(),
                ranking: &board,
                level: self.level,
            })
        }
    }

    fn kinds(milestones: &[Milestone]) -> Vec<MilestoneKind> {
        milestones.iter().map(|m| m.kind).collect()
    }

    #[test]
    fn five_of_a_kind_fires_exactly_once() {
        let mut table = Table::new(2, CelebrationLevel::Epic);

        let first = table.set(1, ScoreCategory::FiveOfAKind, 50);
        assert_eq!(kinds(&first), vec![MilestoneKind::FiveOfAKind]);
        assert!(first[0].full_screen);

        let later = table.set(1, ScoreCategory::Chance, 20);
        assert!(later.is_empty());
        assert!(table.redetect().is_empty());
    }

    #[test]
    fn scratched_category_does_not_fire() {
        let mut table = Table::new(2, CelebrationLevel::Epic);
        assert!(table.set(1, ScoreCategory::FiveOfAKind, 0).is_empty());
        assert!(table.set(1, ScoreCategory::FullHouse, 0).is_empty());
    }

    #[test]
    fn straight_and_full_house_fire_at_epic_only() {
        let mut epic = Table::new(2, CelebrationLevel::Epic);
        assert_eq!(
            kinds(&epic.set(1, ScoreCategory::LargeStraight, 40)),
            vec![MilestoneKind::LargeStraight]
        );
        assert_eq!(
            kinds(&epic.set(2, ScoreCategory::FullHouse, 25)),
            vec![MilestoneKind::FullHouse]
        );

        let mut normal = Table::new(2, CelebrationLevel::Normal);
        assert!(normal.set(1, ScoreCategory::LargeStraight, 40).is_empty());
        assert!(normal.set(2, ScoreCategory::FullHouse, 25).is_empty());
    }

    #[test]
    fn minimal_drops_bonus() {
        let mut table = Table::new(1, CelebrationLevel::Minimal);
        table.set(1, ScoreCategory::Sixes, 30);
        table.set(1, ScoreCategory::Fives, 25);
        let unlocked = table.set(1, ScoreCategory::Fours, 8);
        assert!(unlocked.is_empty());
        assert!(table.detector.has_fired(MilestoneId::new(
            PlayerId(1),
            MilestoneKind::BonusUnlocked
        )));
    }

    #[test]
    fn bonus_unlock_is_reported_as_toast() {
        let mut table = Table::new(1, CelebrationLevel::Normal);
        table.set(1, ScoreCategory::Sixes, 30);
        table.set(1, ScoreCategory::Fives, 25);

        let unlocked = table.set(1, ScoreCategory::Fours, 8);

        assert_eq!(kinds(&unlocked), vec![MilestoneKind::BonusUnlocked]);
        assert!(!unlocked[0].full_screen);
        assert!(table.set(1, ScoreCategory::Threes, 9).is_empty());
    }

    #[test]
    fn comeback_from_last_to_first() {
        let mut table = Table::new(3, CelebrationLevel::Normal);
        table.set(1, ScoreCategory::Chance, 20);
        table.set(2, ScoreCategory::Chance, 15);
        // P3 is last with 0 and jumps to 25.
        let milestones = table.set(3, ScoreCategory::FullHouse, 25);

        assert_eq!(kinds(&milestones), vec![MilestoneKind::Comeback]);
        assert_eq!(milestones[0].player, PlayerId(3));
        assert_eq!(table.detector.recorded_position(PlayerId(3)), Some(1));
    }

    #[test]
    fn third_to_first_is_not_a_comeback() {
        let mut table = Table::new(4, CelebrationLevel::Epic);
        table.set(1, ScoreCategory::Chance, 20);
        table.set(2, ScoreCategory::Chance, 15);
        table.set(3, ScoreCategory::Chance, 10);
        // Order is P1, P2, P3, P4; P3 (third) overtakes everyone.
        let milestones = table.set(3, ScoreCategory::FullHouse, 25);

        assert!(!kinds(&milestones).contains(&MilestoneKind::Comeback));
        assert_eq!(table.detector.recorded_position(PlayerId(3)), Some(1));
    }

    #[test]
    fn comeback_fires_at_most_once_per_player() {
        let mut table = Table::new(2, CelebrationLevel::Normal);
        table.set(1, ScoreCategory::Chance, 10);
        assert_eq!(
            kinds(&table.set(2, ScoreCategory::Chance, 20)),
            vec![MilestoneKind::Comeback]
        );
        table.set(1, ScoreCategory::Sixes, 30);
        // P2 is last again and retakes the lead; the id already fired.
        assert!(table.set(2, ScoreCategory::FourOfAKind, 25).is_empty());
        assert!(table.redetect().is_empty());
    }

    #[test]
    fn last_seat_on_a_level_table_taking_the_lead_is_a_comeback() {
        let mut table = Table::new(3, CelebrationLevel::Normal);
        // Everyone on 0, so P3 holds position 3 by seat order.
        let milestones = table.set(3, ScoreCategory::Chance, 12);

        assert_eq!(kinds(&milestones), vec![MilestoneKind::Comeback]);
        assert_eq!(milestones[0].player, PlayerId(3));
    }

    #[test]
    fn tied_last_place_overtaking_the_leader_is_a_comeback() {
        let mut table = Table::new(2, CelebrationLevel::Normal);
        table.set(1, ScoreCategory::Chance, 20);
        table.set(2, ScoreCategory::Chance, 20);
        assert_eq!(table.detector.recorded_position(PlayerId(2)), Some(2));

        let milestones = table.set(2, ScoreCategory::FourOfAKind, 5);

        assert_eq!(kinds(&milestones), vec![MilestoneKind::Comeback]);
        assert_eq!(milestones[0].player, PlayerId(2));
        assert_eq!(table.detector.recorded_position(PlayerId(2)), Some(1));
    }

    #[test]
    fn unseated_player_yields_no_milestone_but_others_still_fire() {
        let mut table = Table::new(2, CelebrationLevel::Epic);
        let before = table.ledger.scores().to_vec();
        let mut ghost_ledger = ScoreLedger::new([PlayerId(1), PlayerId(2), PlayerId(99)]);
        ghost_ledger
            .set_category_score(PlayerId(99), ScoreCategory::FiveOfAKind, 50)
            .unwrap();
        ghost_ledger
            .set_category_score(PlayerId(1), ScoreCategory::FiveOfAKind, 50)
            .unwrap();
        let previous = table.ranking.latest().cloned();
        let board = table.ranking.rank(ghost_ledger.scores(), &table.players);

        let milestones = table.detector.detect(&DetectionInput {
            players: &table.players,
            before: &before,
            after: ghost_ledger.scores(),
            previous_ranking: previous.as_ref(),
            ranking: &board,
            level: CelebrationLevel::Epic,
        });

        assert_eq!(kinds(&milestones), vec![MilestoneKind::FiveOfAKind]);
        assert_eq!(milestones[0].player, PlayerId(1));
    }

    #[test]
    fn game_won_fires_when_last_category_is_filled() {
        let mut table = Table::new(2, CelebrationLevel::Epic);
        let mut last = Vec::new();
        for category in ScoreCategory::ALL {
            let value = if category == ScoreCategory::Chance { 5 } else { 0 };
            table.set(1, category, value);
            last = table.set(2, category, if category == ScoreCategory::Chance { 6 } else { 0 });
        }

        assert!(kinds(&last).contains(&MilestoneKind::GameWon));
        let won = last.iter().find(|m| m.kind == MilestoneKind::GameWon).unwrap();
        assert_eq!(won.player, PlayerId(2));
    }

    #[test]
    fn reset_forgets_fired_ids() {
        let mut table = Table::new(1, CelebrationLevel::Epic);
        table.set(1, ScoreCategory::FiveOfAKind, 50);
        table.detector.reset();
        table.ledger.reset();
        table.ranking.reset();

        assert_eq!(
            kinds(&table.set(1, ScoreCategory::FiveOfAKind, 50)),
            vec![MilestoneKind::FiveOfAKind]
        );
    }
}
