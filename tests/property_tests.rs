//! Property-based tests for board invariants.
//!
//! Random command sequences are applied to a fresh board and the
//! invariants are checked after every command.

use kanban_sim::{
    BoardConfig, KanbanGame, ResourceId, Stage, StageGroup, StoryId, WipLimits,
};
use proptest::collection::vec;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Command {
    Move(u32, Stage),
    Allocate(u32, u32),
    Return(u32),
    Round,
    ToggleMode,
}

fn stage() -> impl Strategy<Value = Stage> {
    prop::sample::select(Stage::BOARD.to_vec())
}

fn normal_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => (1u32..=20, stage()).prop_map(|(s, t)| Command::Move(s, t)),
        3 => (1u32..=10, 1u32..=20).prop_map(|(r, s)| Command::Allocate(r, s)),
        1 => (1u32..=10).prop_map(Command::Return),
        2 => Just(Command::Round),
    ]
}

fn any_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        9 => normal_command(),
        1 => Just(Command::ToggleMode),
    ]
}

/// Apply a command. Returns whether it was accepted.
fn apply(game: &mut KanbanGame, command: &Command) -> bool {
    match *command {
        Command::Move(s, t) => game.attempt_move(StoryId::new(s), t).is_ok(),
        Command::Allocate(r, s) => game
            .attempt_allocate(ResourceId::new(r), StoryId::new(s))
            .is_ok(),
        Command::Return(r) => game.return_resource_to_pool(ResourceId::new(r)).is_ok(),
        Command::Round => game.complete_round().is_ok(),
        Command::ToggleMode => {
            game.toggle_sandbox_mode();
            true
        }
    }
}

fn assert_exclusive(game: &KanbanGame) -> Result<(), TestCaseError> {
    for id in 1..=9 {
        prop_assert_eq!(game.state().holder_count(ResourceId::new(id)), 1);
    }
    Ok(())
}

fn assert_effort_bounds(game: &KanbanGame) -> Result<(), TestCaseError> {
    for story in game.list_active_stories() {
        prop_assert!(story.effort.analysis <= story.original_effort.analysis);
        prop_assert!(story.effort.development <= story.original_effort.development);
        prop_assert!(story.effort.testing <= story.original_effort.testing);
        if story.stage == Stage::Deployed {
            prop_assert_eq!(story.effort.testing, 0);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every resource is in exactly one place after any sequence of commands.
    #[test]
    fn resource_exclusivity(
        seed in 0u64..1000,
        commands in vec(any_command(), 1..120)
    ) {
        let mut game = KanbanGame::new(BoardConfig::default().with_seed(seed)).unwrap();
        for command in &commands {
            apply(&mut game, command);
            assert_exclusive(&game)?;
        }
    }

    /// Remaining effort stays between zero and the original estimate.
    #[test]
    fn effort_bounds(
        seed in 0u64..1000,
        commands in vec(normal_command(), 1..120)
    ) {
        let mut game = KanbanGame::new(BoardConfig::default().with_seed(seed)).unwrap();
        for command in &commands {
            apply(&mut game, command);
            assert_effort_bounds(&game)?;
        }
    }

    /// Normal play never exceeds a WIP limit.
    #[test]
    fn wip_limits_hold_in_normal_mode(
        seed in 0u64..1000,
        commands in vec(normal_command(), 1..150)
    ) {
        let mut game = KanbanGame::new(BoardConfig::default().with_seed(seed)).unwrap();
        let limits = WipLimits::default();
        for command in &commands {
            apply(&mut game, command);
            for status in game.wip_counts() {
                prop_assert!(status.count <= limits.limit(status.group));
            }
        }
    }

    /// A rejected command records no events and leaves the board unchanged.
    #[test]
    fn rejected_commands_have_no_effect(
        seed in 0u64..1000,
        commands in vec(any_command(), 1..80)
    ) {
        let mut game = KanbanGame::new(BoardConfig::default().with_seed(seed)).unwrap();
        for command in &commands {
            let before = game.snapshot();
            let cursor = game.event_cursor();
            if !apply(&mut game, command) {
                prop_assert_eq!(game.event_cursor(), cursor);
                prop_assert_eq!(game.snapshot(), before);
            }
        }
    }

    /// The clock only moves forward, one day per accepted round, and
    /// profit never decreases.
    #[test]
    fn clock_and_profit_are_monotonic(
        seed in 0u64..1000,
        commands in vec(any_command(), 1..120)
    ) {
        let mut game = KanbanGame::new(
            BoardConfig::default().with_seed(seed).with_max_days(20),
        ).unwrap();
        for command in &commands {
            let (day, profit) = (game.day(), game.total_profit());
            let accepted = apply(&mut game, command);

            prop_assert!(game.total_profit() >= profit);
            prop_assert!(game.day() <= game.max_days());
            let expected = if matches!(command, Command::Round) && accepted {
                day + 1
            } else {
                day
            };
            prop_assert_eq!(game.day(), expected);
        }
    }

    /// The backlog is refilled to five after every round while hidden
    /// stories remain.
    #[test]
    fn backlog_refills_after_round(
        seed in 0u64..1000,
        commands in vec(normal_command(), 1..60)
    ) {
        let mut game = KanbanGame::new(BoardConfig::default().with_seed(seed)).unwrap();
        for command in &commands {
            let accepted = apply(&mut game, command);
            if matches!(command, Command::Round) && accepted {
                let hidden = game.state().stories.hidden_count();
                let backlog = game.stories_in(Stage::Backlog).count();
                prop_assert!(backlog >= 5 || hidden == 0);
            }
        }
    }
}

#[test]
fn all_groups_reported() {
    let game = KanbanGame::new(BoardConfig::default()).unwrap();
    let groups: Vec<_> = game.wip_counts().iter().map(|w| w.group).collect();
    assert_eq!(groups, StageGroup::ALL.to_vec());
}
