//! Wires the audio device, the engine and the key-driven voice manager
//! together, then hands the terminal to the UI loop.

use std::{sync::Arc, time::Duration};

use color_eyre::eyre::Result as EyreResult;
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent as TermKey, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};
use keyloop::{
    engine::{Engine, EngineHandle, EngineStatus, VoiceSink},
    sequencing::{ClockNetwork, RhythmSpec},
    synth::{KeyEvent, Keymap, VoiceManager},
    KeyMode, SessionConfig,
};
use ratatui::DefaultTerminal;
use tracing::{info, warn};

use super::{audio::Output, ui};

pub fn run(config: SessionConfig) -> EyreResult<()> {
    let output = Output::default_device(config.sample_rate_hint)?;
    let sample_rate = output.sample_rate();

    let clocks = Arc::new(ClockNetwork::new(config.bpm, sample_rate)?);
    let (engine, handle) = Engine::with_handle(clocks.clone(), RhythmSpec::default(), config.seed)?;
    let stream = output.start(engine)?;
    info!(
        bpm = config.bpm,
        sample_rate,
        channels = output.channels(),
        mode = ?config.mode,
        "audio running"
    );

    let keymap = match config.mode {
        KeyMode::Toggle => Keymap::techno_loop(),
        KeyMode::Hold => Keymap::drone_keys(),
    };
    let voices = VoiceManager::new(keymap, clocks, handle, config.seed);

    let mut terminal = ratatui::init();
    // Key releases only arrive with the kitty protocol enabled.
    let releases = config.mode == KeyMode::Hold && supports_keyboard_enhancement().unwrap_or(false);
    if releases {
        execute!(
            std::io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    } else if config.mode == KeyMode::Hold {
        warn!("terminal does not report key releases; held notes stop on quit");
    }

    let mut app = App::new(voices, config, sample_rate, releases);
    let result = app.run(&mut terminal);

    if releases {
        execute!(std::io::stdout(), PopKeyboardEnhancementFlags)?;
    }
    ratatui::restore();

    shut_down(&mut app.voices, || super::audio::stop(stream), result)
}

/// Release every voice, then stop the stream. A failed release is logged and
/// never skips the stop; the UI loop's error wins over a failed stop.
fn shut_down<S: VoiceSink>(
    voices: &mut VoiceManager<S>,
    stop: impl FnOnce() -> EyreResult<()>,
    result: EyreResult<()>,
) -> EyreResult<()> {
    match voices.all_off() {
        Ok(silenced) => info!(silenced, "voices released"),
        Err(err) => warn!(%err, still_live = voices.active_count(), "could not release every voice"),
    }
    let stopped = stop();
    info!("audio stopped");
    result.and(stopped)
}

pub struct App {
    pub voices: VoiceManager<EngineHandle>,
    pub config: SessionConfig,
    pub sample_rate: f64,
    pub releases: bool,
    pub status: EngineStatus,
    pub message: Option<String>,
    should_quit: bool,
}

impl App {
    fn new(
        voices: VoiceManager<EngineHandle>,
        config: SessionConfig,
        sample_rate: f64,
        releases: bool,
    ) -> Self {
        Self {
            voices,
            config,
            sample_rate,
            releases,
            status: EngineStatus::default(),
            message: None,
            should_quit: false,
        }
    }

    fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.status = self.voices.sink_mut().latest_status();
            self.voices.sink_mut().collect_retired();

            terminal.draw(|frame| ui::render(frame, self))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: TermKey) {
        let event = match (key.code, key.kind) {
            (KeyCode::Esc, KeyEventKind::Press) => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Char('q'), KeyEventKind::Press) if self.voices.keymap().instrument('q').is_none() => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Char(c), KeyEventKind::Press) => KeyEvent::Press(c),
            (KeyCode::Char(c), KeyEventKind::Release) => KeyEvent::Release(c),
            _ => return,
        };

        match self.voices.handle(event) {
            Ok(outcome) => self.message = Some(format!("{} {:?}", event.key(), outcome)),
            Err(err) => {
                warn!(key = %event.key(), %err, "key not applied");
                self.message = Some(format!("{}: {err}", event.key()));
            }
        }
    }
}
