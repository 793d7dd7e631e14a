use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use game::config::{CaptureGranularity, Difficulty, DrawingMode, GameConfig, TimeDifficulty};
use game::playtest::{Clock, ScriptedPlayer};
use game::report::SessionReport;
use game::session::GameSession;
use game::speech::{LogSpeech, SpeechSettings};
use game::words::{PoolWordProvider, parse_custom_words};

/// Plays one headless session with a scripted player and prints the JSON report.
#[derive(Debug, Parser)]
#[command(name = "draw-recall")]
#[command(about = "Headless playtest for the draw-and-recall memory game")]
struct Cli {
    /// easy, medium, hard or custom. Defaults to easy, or custom with --custom-words.
    #[arg(long)]
    difficulty: Option<Difficulty>,
    /// digital or physical.
    #[arg(long, default_value = "digital")]
    mode: DrawingMode,
    /// dumb (5s), normal (3s) or hell (1s) per word.
    #[arg(long, default_value = "normal")]
    time: TimeDifficulty,
    /// per-cell or whole-canvas.
    #[arg(long, default_value = "whole-canvas")]
    capture: CaptureGranularity,
    /// Exactly 20 comma-separated words; implies --difficulty custom.
    #[arg(long)]
    custom_words: Option<String>,
    #[arg(long)]
    seed: Option<u64>,
    /// Leave this many answers blank, counted from the last word.
    #[arg(long, default_value_t = 0)]
    forget: usize,
    /// Tick with the real clock instead of simulated seconds.
    #[arg(long, default_value_t = false)]
    realtime: bool,
    /// Don't read words aloud.
    #[arg(long, default_value_t = false)]
    no_speech: bool,
    #[arg(long, default_value_t = 0.9)]
    speech_rate: f32,
    #[arg(long, default_value_t = 1.0)]
    speech_pitch: f32,
    #[arg(long, default_value_t = 1.0)]
    speech_volume: f32,
    #[arg(long, default_value = "en-US")]
    speech_lang: String,
    #[arg(long)]
    composite_out: Option<PathBuf>,
    #[arg(long)]
    report_out: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        match (self.custom_words.as_deref(), self.difficulty) {
            (Some(raw), None | Some(Difficulty::Custom)) => {
                let words = parse_custom_words(raw).context("invalid --custom-words")?;
                Ok(GameConfig::custom(words, self.mode, self.time))
            }
            (Some(_), Some(other)) => bail!("--custom-words cannot be combined with {other:?}"),
            (None, difficulty) => {
                let difficulty = difficulty.unwrap_or_default();
                GameConfig::builtin(difficulty, self.mode, self.time)
                    .context("invalid game config")
            }
        }
    }

    fn speech_settings(&self) -> SpeechSettings {
        SpeechSettings {
            enabled: !self.no_speech,
            rate: self.speech_rate,
            pitch: self.speech_pitch,
            volume: self.speech_volume,
            lang: self.speech_lang.clone(),
        }
        .clamp()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let config = cli.game_config()?;

    let provider = match cli.seed {
        Some(seed) => PoolWordProvider::seeded(seed),
        None => PoolWordProvider::from_entropy(),
    };
    let mut session = GameSession::new(provider, LogSpeech::new())
        .with_granularity(cli.capture)
        .with_speech_settings(cli.speech_settings());

    session.start_game(config)?;
    let clock = if cli.realtime {
        Clock::Realtime
    } else {
        Clock::Simulated
    };
    ScriptedPlayer::new(cli.forget).play(&mut session, clock).await;
    session.submit_answers()?;

    if let Some(path) = cli.composite_out.as_ref() {
        match session.state().canvas_image() {
            Some(image) => fs::write(path, image.as_bytes())
                .with_context(|| format!("writing {}", path.display()))?,
            None => log::warn!("no canvas image captured; {} not written", path.display()),
        }
    }

    let report = SessionReport::from_state(session.state()).context("session did not finish")?;
    let json = report.to_json_pretty()?;
    if let Some(path) = cli.report_out.as_ref() {
        fs::write(path, &json).with_context(|| format!("writing {}", path.display()))?;
    }
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("draw-recall").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn bare_invocation_uses_built_in_defaults() {
        let cli = parse(&[]);
        let config = cli.game_config().expect("config");
        assert_eq!(config.difficulty(), Difficulty::Easy);
        assert_eq!(config.drawing_mode(), DrawingMode::Digital);
        assert_eq!(config.time_difficulty(), TimeDifficulty::Normal);
        assert_eq!(cli.capture, CaptureGranularity::WholeCanvas);
        assert_eq!(cli.speech_settings(), SpeechSettings::default());
    }

    #[test]
    fn flags_choose_every_game_option() {
        let cli = parse(&[
            "--difficulty",
            "hard",
            "--mode",
            "physical",
            "--time",
            "hell",
            "--capture",
            "per-cell",
        ]);
        let config = cli.game_config().expect("config");
        assert_eq!(config.difficulty(), Difficulty::Hard);
        assert_eq!(config.drawing_mode(), DrawingMode::Physical);
        assert_eq!(config.seconds_per_word(), 1);
        assert_eq!(cli.capture, CaptureGranularity::PerCell);
    }

    #[test]
    fn speech_flags_are_clamped() {
        let cli = parse(&[
            "--no-speech",
            "--speech-volume",
            "3",
            "--speech-pitch=-1",
            "--speech-lang",
            " ",
        ]);
        let speech = cli.speech_settings();
        assert!(!speech.enabled);
        assert_eq!(speech.volume, 1.0);
        assert_eq!(speech.pitch, 0.0);
        assert_eq!(speech.lang, "en-US");
    }

    #[test]
    fn custom_words_conflict_with_a_builtin_difficulty() {
        let words = (0..20).map(|i| format!("w{i}")).collect::<Vec<_>>().join(",");
        let custom = parse(&["--custom-words", &words]).game_config().expect("custom");
        assert_eq!(custom.difficulty(), Difficulty::Custom);

        let err = parse(&["--custom-words", &words, "--difficulty", "easy"])
            .game_config()
            .expect_err("conflict");
        assert!(err.to_string().contains("cannot be combined"));
    }
}
