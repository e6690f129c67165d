use quizboss::bank::QuestionBank;
use quizboss::config::persistence::MemoryProgressStore;
use quizboss::config::GameConfig;
use quizboss::models::Progress;
use quizboss::quiz::{Game, GameState, QuestionTimer, Step, TimerEvent};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};

fn new_game() -> Game<QuestionBank, MemoryProgressStore> {
    Game::with_rng(
        GameConfig::default(),
        QuestionBank::embedded().unwrap(),
        MemoryProgressStore::with_progress(Progress::new()),
        SmallRng::seed_from_u64(11),
    )
}

fn dispatch(game: &mut Game<QuestionBank, MemoryProgressStore>, event: TimerEvent) -> Step {
    match event {
        TimerEvent::Tick(ticket) => game.tick(ticket),
        TimerEvent::Advance(ticket) => game.advance(ticket),
    }
}

#[tokio::test(start_paused = true)]
async fn test_unanswered_question_times_out_and_advances() {
    let mut game = new_game();
    let (mut timer, mut rx) = QuestionTimer::channel(game.config());
    let start = Instant::now();

    let ticket = game.start_session("Science").unwrap();
    timer.start_countdown(ticket);

    let step = loop {
        let event = rx.recv().await.unwrap();
        let step = dispatch(&mut game, event);
        timer.follow(&step);
        if !matches!(step, Step::Ticked { .. }) {
            break step;
        }
    };
    assert!(matches!(step, Step::Answered { verdict, .. } if verdict.selected.is_none()));
    assert_eq!(start.elapsed(), Duration::from_secs(10));
    assert_eq!(game.state(), GameState::Answered);
    assert!(!timer.is_counting_down());

    let event = rx.recv().await.unwrap();
    assert_eq!(event, TimerEvent::Advance(ticket));
    let step = dispatch(&mut game, event);
    timer.follow(&step);
    assert!(matches!(step, Step::Question(next) if next.question == 1));
    assert_eq!(start.elapsed(), Duration::from_millis(11_500));
    assert_eq!(game.session().unwrap().seconds_remaining(), 10);
    assert!(timer.is_counting_down());
}

#[tokio::test(start_paused = true)]
async fn test_answer_then_dwell_then_next_countdown() {
    let mut game = new_game();
    let (mut timer, mut rx) = QuestionTimer::channel(game.config());

    let ticket = game.start_session("History").unwrap();
    timer.start_countdown(ticket);
    time::sleep(Duration::from_millis(3500)).await;
    for _ in 0..3 {
        let step = dispatch(&mut game, rx.recv().await.unwrap());
        timer.follow(&step);
    }
    assert_eq!(game.session().unwrap().seconds_remaining(), 7);

    let step = game.submit_answer(Some(0));
    timer.follow(&step);
    assert!(timer.has_pending_advance());

    // Only the advance arrives; the countdown is gone
    let event = rx.recv().await.unwrap();
    assert!(matches!(event, TimerEvent::Advance(_)));
    let step = dispatch(&mut game, event);
    timer.follow(&step);
    assert_eq!(game.state(), GameState::InProgress);
    assert_eq!(game.session().unwrap().current_index(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stale_timer_from_superseded_session_is_inert() {
    let mut game = new_game();
    let config = game.config().clone();
    let (tx, mut rx) = mpsc::channel(16);
    let mut stale_timer = QuestionTimer::new(tx.clone(), config.tick_interval, config.answer_dwell);
    let mut timer = QuestionTimer::new(tx, config.tick_interval, config.answer_dwell);

    let old = game.start_session("Math").unwrap();
    stale_timer.start_countdown(old);
    let current = game.start_session("Geography").unwrap();
    timer.start_countdown(current);

    let mut ignored = 0;
    let mut ticked = 0;
    while ticked < 3 {
        let event = rx.recv().await.unwrap();
        match dispatch(&mut game, event) {
            Step::Ignored => {
                assert_eq!(event.ticket(), old);
                ignored += 1;
            }
            Step::Ticked { .. } => {
                assert_eq!(event.ticket(), current);
                ticked += 1;
            }
            other => panic!("unexpected step {:?}", other),
        }
    }
    assert!(ignored >= 2);
    assert_eq!(game.session().unwrap().seconds_remaining(), 7);
}

#[tokio::test(start_paused = true)]
async fn test_abandon_mid_dwell_leaves_menu_untouched() {
    let mut game = new_game();
    let (mut timer, mut rx) = QuestionTimer::channel(game.config());

    let ticket = game.start_session("Literature").unwrap();
    timer.start_countdown(ticket);
    let step = game.submit_answer(Some(2));
    timer.follow(&step);

    game.abandon();
    let points = game.progress().total_points();

    // Even if the dwell fired, the game would drop it
    let event = rx.recv().await.unwrap();
    assert_eq!(dispatch(&mut game, event), Step::Ignored);
    assert_eq!(game.state(), GameState::Idle);
    assert_eq!(game.progress().total_points(), points);
}
