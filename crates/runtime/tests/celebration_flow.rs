use std::sync::{Arc, Mutex};

use scorepad_core::{
    CelebrationLevel, MilestoneKind, Player, PlayerId, ScoreCategory, ScoreConfig, get_totals,
};
use scorepad_runtime::{
    HapticService, PendingCounts, Scorekeeper, ScorekeeperConfig, SoundService,
};

#[derive(Default)]
struct Recorder {
    sounds: Mutex<Vec<String>>,
    haptics: Mutex<Vec<String>>,
}

impl Recorder {
    fn sounds(&self) -> Vec<String> {
        self.sounds.lock().unwrap().clone()
    }

    fn haptics(&self) -> Vec<String> {
        self.haptics.lock().unwrap().clone()
    }
}

impl SoundService for Recorder {
    fn play(&self, sound_key: &str) {
        self.sounds.lock().unwrap().push(sound_key.to_string());
    }
}

impl HapticService for Recorder {
    fn trigger(&self, haptic: &str) {
        self.haptics.lock().unwrap().push(haptic.to_string());
    }
}

fn players(count: u32) -> Vec<Player> {
    (1..=count)
        .map(|id| Player::new(PlayerId(id), format!("Player {id}"), "#ff8800"))
        .collect()
}

fn keeper(count: u32, level: CelebrationLevel, recorder: &Arc<Recorder>) -> Scorekeeper {
    Scorekeeper::builder()
        .players(players(count))
        .config(
            ScorekeeperConfig::default()
                .with_celebration_level(level)
                .with_auto_dismiss(false),
        )
        .sound(Arc::clone(recorder))
        .haptics(Arc::clone(recorder))
        .build()
        .unwrap()
}

#[test]
fn five_of_a_kind_is_shown_full_screen_with_cues_fired_once() {
    let recorder = Arc::new(Recorder::default());
    let mut keeper = keeper(3, CelebrationLevel::Normal, &recorder);

    let outcome = keeper
        .set_category_score(PlayerId(2), ScoreCategory::FiveOfAKind, 50)
        .unwrap();

    assert_eq!(outcome.milestones.len(), 1);
    let current = keeper.current_full_screen_milestone().unwrap();
    assert_eq!(current.kind, MilestoneKind::FiveOfAKind);
    assert_eq!(current.player, PlayerId(2));
    assert!(current.full_screen);

    // Re-querying must not replay the cues.
    for _ in 0..3 {
        assert!(keeper.current_full_screen_milestone().is_some());
    }
    assert_eq!(recorder.sounds(), vec!["five_of_a_kind".to_string()]);
    assert_eq!(recorder.haptics(), vec!["heavy".to_string()]);
}

#[test]
fn five_of_a_kind_fires_once_per_player() {
    let recorder = Arc::new(Recorder::default());
    let mut keeper = keeper(2, CelebrationLevel::Epic, &recorder);

    keeper
        .set_category_score(PlayerId(1), ScoreCategory::FiveOfAKind, 50)
        .unwrap();
    let later = keeper
        .set_category_score(PlayerId(1), ScoreCategory::Chance, 12)
        .unwrap();

    assert!(later.milestones.is_empty());
    assert_eq!(keeper.pending_counts(), PendingCounts::default());
}

#[test]
fn higher_priority_item_jumps_ahead_within_a_batch() {
    let recorder = Arc::new(Recorder::default());
    let mut keeper = keeper(2, CelebrationLevel::Epic, &recorder);

    // Player 2 goes from last to first with a five of a kind.
    keeper
        .set_category_score(PlayerId(1), ScoreCategory::Chance, 20)
        .unwrap();
    let outcome = keeper
        .set_category_score(PlayerId(2), ScoreCategory::FiveOfAKind, 50)
        .unwrap();

    let kinds: Vec<_> = outcome.milestones.iter().map(|m| m.kind).collect();
    assert!(kinds.contains(&MilestoneKind::FiveOfAKind));
    assert!(kinds.contains(&MilestoneKind::Comeback));

    assert_eq!(
        keeper.current_full_screen_milestone().unwrap().kind,
        MilestoneKind::FiveOfAKind
    );
    assert_eq!(keeper.pending_counts().full_screen, 1);

    keeper.dismiss_full_screen_milestone();
    assert_eq!(
        keeper.current_full_screen_milestone().unwrap().kind,
        MilestoneKind::Comeback
    );
    assert_eq!(recorder.sounds(), vec!["five_of_a_kind", "comeback"]);

    keeper.dismiss_full_screen_milestone();
    assert!(keeper.current_full_screen_milestone().is_none());

    // Nothing showing: dismissing again is a no-op.
    keeper.dismiss_full_screen_milestone();
    assert_eq!(recorder.sounds().len(), 2);
}

#[test]
fn bonus_arrives_as_a_toast_without_cues() {
    let recorder = Arc::new(Recorder::default());
    let mut keeper = keeper(2, CelebrationLevel::Normal, &recorder);

    for (category, value) in [
        (ScoreCategory::Ones, 3),
        (ScoreCategory::Twos, 6),
        (ScoreCategory::Threes, 9),
        (ScoreCategory::Fours, 12),
        (ScoreCategory::Fives, 15),
        (ScoreCategory::Sixes, 18),
    ] {
        keeper
            .set_category_score(PlayerId(1), category, value)
            .unwrap();
    }

    let totals = get_totals(keeper.score(PlayerId(1)).unwrap());
    assert_eq!(totals.upper_total, 63);
    assert_eq!(totals.upper_bonus, ScoreConfig::UPPER_BONUS);

    let toast = keeper.current_toast().unwrap();
    assert_eq!(toast.id.kind, MilestoneKind::BonusUnlocked);
    assert!(toast.message.starts_with("Upper Bonus!: Player 1"));
    assert!(keeper.current_full_screen_milestone().is_none());
    assert!(recorder.sounds().is_empty());

    keeper.dismiss_toast();
    assert!(keeper.current_toast().is_none());
}

#[test]
fn displayed_milestone_serializes_for_the_presentation_layer() {
    let recorder = Arc::new(Recorder::default());
    let mut keeper = keeper(2, CelebrationLevel::Normal, &recorder);
    keeper
        .set_category_score(PlayerId(1), ScoreCategory::FiveOfAKind, 50)
        .unwrap();

    let milestone = keeper.current_full_screen_milestone().unwrap();
    let json = serde_json::to_value(&milestone).unwrap();

    assert_eq!(json["kind"], "five-of-a-kind");
    assert_eq!(json["player"], 1);
    assert_eq!(json["display"]["sound_key"], "five_of_a_kind");
    assert_eq!(
        serde_json::to_value(keeper.pending_counts()).unwrap(),
        serde_json::json!({ "full_screen": 0, "toasts": 0 })
    );
}

#[test]
fn missing_runtime_leaves_items_up_until_dismissed() {
    let recorder = Arc::new(Recorder::default());
    let mut keeper = Scorekeeper::builder()
        .players(players(2))
        .sound(Arc::clone(&recorder))
        .build()
        .unwrap();

    keeper
        .set_category_score(PlayerId(1), ScoreCategory::FiveOfAKind, 50)
        .unwrap();

    assert!(keeper.current_full_screen_milestone().is_some());
    assert!(
        !keeper
            .celebrations()
            .has_timer(scorepad_runtime::Channel::FullScreen)
    );
    keeper.dismiss_full_screen_milestone();
    assert!(keeper.current_full_screen_milestone().is_none());
}

#[test]
fn tied_last_place_taking_the_lead_is_celebrated_as_a_comeback() {
    let recorder = Arc::new(Recorder::default());
    let mut keeper = keeper(2, CelebrationLevel::Normal, &recorder);

    keeper
        .set_category_score(PlayerId(1), ScoreCategory::Chance, 20)
        .unwrap();
    keeper
        .set_category_score(PlayerId(2), ScoreCategory::Chance, 20)
        .unwrap();
    assert_eq!(keeper.rank().position_of(PlayerId(2)), Some(2));

    keeper
        .set_category_score(PlayerId(2), ScoreCategory::FourOfAKind, 5)
        .unwrap();

    let current = keeper.current_full_screen_milestone().unwrap();
    assert_eq!(current.kind, MilestoneKind::Comeback);
    assert_eq!(current.player, PlayerId(2));
    assert_eq!(
        current.display.subtitle.as_deref(),
        Some("Player 2 went from last to first")
    );
    assert_eq!(recorder.sounds(), vec!["comeback"]);
}
