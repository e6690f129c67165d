use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quizboss::app::screens::{EntryKind, MenuScreen};
use quizboss::app::{AppState, NavigationAction, StateManager};
use quizboss::bank::QuestionBank;
use quizboss::config::persistence::MemoryProgressStore;
use quizboss::config::GameConfig;
use quizboss::models::Progress;
use quizboss::quiz::Game;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn game_with(progress: Progress) -> Game<QuestionBank, MemoryProgressStore> {
    Game::with_rng(
        GameConfig::default(),
        QuestionBank::embedded().unwrap(),
        MemoryProgressStore::with_progress(progress),
        SmallRng::seed_from_u64(5),
    )
}

fn key(code: KeyCode) -> NavigationAction {
    StateManager::key_to_navigation(KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn test_menu_reflects_boss_gate() {
    let mut screen = MenuScreen::new();
    let game = game_with(Progress::new());
    screen.refresh(&game);

    let boss = screen.entries().last().unwrap();
    assert_eq!(
        boss.kind,
        EntryKind::Boss {
            unlocked: false,
            defeated: false
        }
    );

    let mut progress = Progress::new();
    for category in GameConfig::default().categories {
        progress.mark_cleared(&category);
    }
    screen.refresh(&game_with(progress));
    assert!(screen
        .entries()
        .iter()
        .take(5)
        .all(|entry| entry.kind == EntryKind::Category { cleared: true }));
    assert_eq!(
        screen.entries().last().unwrap().kind,
        EntryKind::Boss {
            unlocked: true,
            defeated: false
        }
    );
}

#[test]
fn test_screen_follows_game_state() {
    let mut game = game_with(Progress::new());
    let mut state = StateManager::new();
    assert_eq!(state.current_state(), AppState::Menu);

    game.start_session("Science").unwrap();
    state.sync(game.state());
    assert_eq!(state.current_state(), AppState::Quiz);

    game.submit_answer(Some(0));
    state.sync(game.state());
    assert_eq!(state.current_state(), AppState::Quiz);

    game.abandon();
    state.sync(game.state());
    assert_eq!(state.current_state(), AppState::Menu);
    assert_eq!(state.previous_state(), Some(AppState::Quiz));
}

#[test]
fn test_quiz_keys() {
    assert_eq!(key(KeyCode::Char('1')), NavigationAction::Answer(0));
    assert_eq!(key(KeyCode::Char('4')), NavigationAction::Answer(3));
    assert_eq!(key(KeyCode::Char('5')), NavigationAction::None);
    assert_eq!(key(KeyCode::Char('s')), NavigationAction::Skip);
    assert_eq!(key(KeyCode::Char('b')), NavigationAction::Boss);
    assert_eq!(key(KeyCode::Esc), NavigationAction::Back);
    assert_eq!(
        StateManager::key_to_navigation(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )),
        NavigationAction::Quit
    );
}
