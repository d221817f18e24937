//! Application entry point and thread bootstrapper.

use anyhow::Context;
use env_logger::Env;
use lanebeat::input::{self, bindings::KeyBindings, state::InputState, terminal::TerminalGuard};
use lanebeat::logic::audio::SoundManager;
use lanebeat::logic::scheduler::{FrameScheduler, SystemClock};
use lanebeat::models::settings::{SETTINGS_PATH, Settings};
use lanebeat::state::{Collaborators, GameManager, GameStep};
use lanebeat::storage::{TomlHighScoreStore, TomlLevelLibrary};
use lanebeat::system::bus::SystemBus;
use lanebeat::views::LogPresenter;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    // Raw mode does not translate "\n", so every line ends with "\r\n".
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            write!(buf, "[{} {}] {}\r\n", record.level(), record.target(), record.args())
        })
        .init();

    log::info!("MAIN: Booting lanebeat...");

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SETTINGS_PATH));
    let settings = Settings::load(&settings_path);

    let bindings = KeyBindings::from_settings(&settings.keys);
    let bus = SystemBus::new();

    let terminal = TerminalGuard::enter().context("Failed to set up the terminal")?;
    let _input_thread = input::start_thread(bus.clone(), bindings, terminal.reports_releases())
        .context("Failed to spawn input thread")?;

    let ports = Collaborators {
        levels: Box::new(TomlLevelLibrary::new(
            &settings.paths.level_list,
            &settings.paths.levels_dir,
        )),
        input: Box::new(InputState::new(bus.input_rx.clone())),
        sound: Box::new(SoundManager::new()),
        view: Box::new(LogPresenter::new()),
        high_scores: Box::new(TomlHighScoreStore::new(&settings.paths.high_scores)),
    };

    let scheduler = FrameScheduler::new(SystemClock::new(), settings.frame_rate);
    let mut manager = GameManager::new(settings, ports);
    let step = manager.run(&scheduler);

    drop(terminal);
    log::info!("MAIN: Exiting with {:?}", step);

    Ok(match step {
        GameStep::QuitSuccess => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
