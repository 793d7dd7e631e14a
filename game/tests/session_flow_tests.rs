use std::time::Duration;

use engine::geometry::Point;
use game::config::{CaptureGranularity, Difficulty, DrawingMode, GameConfig, TimeDifficulty};
use game::grid::WORD_COUNT;
use game::playtest::{Clock, ScriptedPlayer};
use game::report::SessionReport;
use game::scorer::Grade;
use game::session::GameSession;
use game::speech::{LogSpeech, SilentSpeech, SpeechSettings};
use game::state::Phase;
use game::words::{PoolWordProvider, parse_custom_words};

fn digital(time: TimeDifficulty) -> GameConfig {
    GameConfig::builtin(Difficulty::Medium, DrawingMode::Digital, time).expect("config")
}

fn custom_words() -> String {
    (0..WORD_COUNT)
        .map(|i| format!("item{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[tokio::test]
async fn per_cell_capture_saves_every_drawing_and_a_composite() {
    let mut session = GameSession::new(PoolWordProvider::seeded(11), LogSpeech::new())
        .with_granularity(CaptureGranularity::PerCell);
    session.start_game(digital(TimeDifficulty::Hell)).expect("start");

    ScriptedPlayer::new(0).play(&mut session, Clock::Simulated).await;

    let state = session.state();
    assert_eq!(state.phase(), Phase::Recall);
    assert!(state.drawings().iter().all(Option::is_some));
    let canvas = state.canvas_image().expect("composite stored before recall");
    let decoded = canvas.decode().expect("composite decodes");
    assert_eq!(decoded.size().width, 1500);
    assert_eq!(decoded.size().height, 1200);
    assert!(session.surface().is_none());
}

#[tokio::test]
async fn per_cell_surface_is_cleared_between_words() {
    let mut session = GameSession::new(PoolWordProvider::seeded(12), SilentSpeech)
        .with_granularity(CaptureGranularity::PerCell);
    session.start_game(digital(TimeDifficulty::Hell)).expect("start");

    let surface = session.surface_mut().expect("digital surface");
    surface.begin(Point::new(10.0, 10.0));
    surface.extend(Point::new(200.0, 200.0));
    let blank = game::drawing::DrawingSurface::single_cell();
    assert_ne!(session.surface().expect("surface").surface(), blank.surface());

    session.tick(Duration::from_secs(1)).await;
    assert_eq!(session.state().current_word_index(), 1);
    let surface = session.surface().expect("surface");
    assert_eq!(surface.surface(), blank.surface());
    assert!(!surface.is_stroking());
    assert!(session.state().drawings()[0].is_some());
}

#[tokio::test]
async fn whole_canvas_capture_keeps_ink_and_saves_once() {
    let mut session = GameSession::new(PoolWordProvider::seeded(13), SilentSpeech)
        .with_granularity(CaptureGranularity::WholeCanvas);
    session.start_game(digital(TimeDifficulty::Normal)).expect("start");
    assert_eq!(session.remaining_secs(), Some(3));

    let player = ScriptedPlayer::new(0);
    let surface = session.surface_mut().expect("surface");
    player.scribble(surface, 0, CaptureGranularity::WholeCanvas);
    let after_first = session.surface().expect("surface").surface().clone();

    for _ in 0..3 {
        session.tick(Duration::from_secs(1)).await;
    }
    assert_eq!(session.state().current_word_index(), 1);
    assert_eq!(session.surface().expect("surface").surface(), &after_first);
    assert!(session.state().canvas_image().is_none());

    player.play(&mut session, Clock::Simulated).await;
    let state = session.state();
    assert_eq!(state.phase(), Phase::Recall);
    assert!(state.drawings().iter().all(Option::is_none));
    let canvas = state.canvas_image().expect("canvas").decode().expect("decode");
    assert_eq!(canvas.size().width, 600);
    assert_eq!(canvas.size().height, 480);
}

#[tokio::test]
async fn physical_mode_never_captures() {
    let config =
        GameConfig::builtin(Difficulty::Easy, DrawingMode::Physical, TimeDifficulty::Dumb)
            .expect("config");
    let mut session = GameSession::new(PoolWordProvider::seeded(14), SilentSpeech)
        .with_granularity(CaptureGranularity::PerCell);
    session.start_game(config).expect("start");
    assert!(session.surface_mut().is_none());

    for _ in 0..4 {
        session.tick(Duration::from_secs(1)).await;
    }
    assert_eq!(session.state().current_word_index(), 0);
    session.tick(Duration::from_secs(1)).await;
    assert_eq!(session.state().current_word_index(), 1);

    ScriptedPlayer::new(0).play(&mut session, Clock::Simulated).await;
    assert_eq!(session.state().phase(), Phase::Recall);
    assert!(session.state().canvas_image().is_none());
    assert!(session.state().drawings().iter().all(Option::is_none));
}

#[tokio::test]
async fn a_long_tick_advances_only_one_word() {
    let mut session = GameSession::new(PoolWordProvider::seeded(15), SilentSpeech);
    session.start_game(digital(TimeDifficulty::Hell)).expect("start");

    session.tick(Duration::from_secs(60)).await;
    assert_eq!(session.state().current_word_index(), 1);
    assert_eq!(session.remaining_secs(), Some(1));
}

#[tokio::test]
async fn each_word_is_read_aloud_once() {
    let mut session = GameSession::new(PoolWordProvider::seeded(16), LogSpeech::new());
    session.start_game(digital(TimeDifficulty::Hell)).expect("start");
    ScriptedPlayer::new(0).play(&mut session, Clock::Simulated).await;

    let spoken = session.speech().transcript().to_vec();
    let shown: Vec<String> = session
        .state()
        .words()
        .iter()
        .map(|w| w.text.clone())
        .collect();
    assert_eq!(spoken, shown);
}

#[tokio::test]
async fn disabled_speech_stays_quiet() {
    let settings = SpeechSettings {
        enabled: false,
        ..SpeechSettings::default()
    };
    let mut session = GameSession::new(PoolWordProvider::seeded(17), LogSpeech::new())
        .with_speech_settings(settings);
    session.start_game(digital(TimeDifficulty::Hell)).expect("start");
    ScriptedPlayer::new(0).play(&mut session, Clock::Simulated).await;
    assert!(session.speech().transcript().is_empty());
}

#[tokio::test]
async fn custom_words_play_through_to_a_graded_report() {
    let words = parse_custom_words(&custom_words()).expect("20 words");
    let config = GameConfig::custom(words, DrawingMode::Digital, TimeDifficulty::Hell);
    let mut session = GameSession::new(PoolWordProvider::seeded(18), SilentSpeech)
        .with_granularity(CaptureGranularity::PerCell);
    session.start_game(config).expect("start");
    assert_eq!(session.state().words()[5].text, "item5");

    ScriptedPlayer::new(4).play(&mut session, Clock::Simulated).await;
    let summary = session.submit_answers().expect("submit");
    assert_eq!(summary.score, 16);
    assert_eq!(summary.percentage, 80);
    assert_eq!(summary.grade, Grade::Excellent);

    let report = SessionReport::from_state(session.state()).expect("report");
    assert_eq!(report.items[0].word, "item0");
    assert_eq!(report.drawings_captured, WORD_COUNT);
    assert!(report.has_canvas_image);

    session.restart();
    assert_eq!(session.state().phase(), Phase::Landing);
    assert!(session.state().words().is_empty());
}

#[tokio::test]
async fn same_seed_same_words() {
    let mut a = GameSession::new(PoolWordProvider::seeded(99), SilentSpeech);
    let mut b = GameSession::new(PoolWordProvider::seeded(99), SilentSpeech);
    a.start_game(digital(TimeDifficulty::Hell)).expect("start a");
    b.start_game(digital(TimeDifficulty::Hell)).expect("start b");
    assert_eq!(a.state().words(), b.state().words());
}

#[tokio::test(start_paused = true)]
async fn realtime_clock_finishes_under_paused_time() {
    let mut session = GameSession::new(PoolWordProvider::seeded(20), SilentSpeech)
        .with_granularity(CaptureGranularity::PerCell);
    session.start_game(digital(TimeDifficulty::Hell)).expect("start");
    ScriptedPlayer::new(0).play(&mut session, Clock::Realtime).await;
    assert_eq!(session.state().phase(), Phase::Recall);
    assert!(session.state().canvas_image().is_some());
}
