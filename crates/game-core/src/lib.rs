//! Game engine entry point.

mod app;
mod combat;
mod input;
mod overworld;
mod rng;
mod scheduler;
mod snapshot;

use bracket_lib::prelude::*;
use log::{debug, info, warn};

use actors::{spawn_npcs, Npc, Player};
use battle::BattleSession;
use common::{Dice, Point};
use data::{LOST_SUMMARY, MOVES, NOBODY_NEARBY_TEXT, WELCOME_TEXT, WON_SUMMARY};
use mapgen::{generate, Map, TileKind};

pub use app::PocketQuestApp;
pub use input::{Control, InputConfig, InputState};
pub use overworld::{Dialogue, Interaction, Step};
pub use rng::GameRng;
pub use scheduler::Scheduler;
pub use snapshot::{ModeView, Snapshot};

use combat::Scheduled;

/// Length of one simulation tick in milliseconds (about 60 per second).
pub const TICK_MS: u32 = 16;
const CONFIG_PATH: &str = "pocket_quest.toml";

/// Current game mode. A battle session exists exactly while in battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameMode {
    Overworld,
    Battle(BattleSession),
}

/// The whole simulation, advanced one tick at a time.
pub struct PocketQuestGame {
    map: Map,
    player: Player,
    npcs: Vec<Npc>,
    mode: GameMode,
    dialogue: Dialogue,
    timers: Scheduler<Scheduled>,
    rng: GameRng,
    ticks: u64,
}

impl PocketQuestGame {
    /// Creates a new game in the starting town.
    pub fn new(rng: GameRng) -> Self {
        let map = generate();
        info!("map {}x{} generated", map.width, map.height);
        let mut dialogue = Dialogue::default();
        dialogue.show(WELCOME_TEXT);
        Self {
            map,
            player: Player::default(),
            npcs: spawn_npcs(),
            mode: GameMode::Overworld,
            dialogue,
            timers: Scheduler::new(),
            rng,
            ticks: 0,
        }
    }

    /// Creates a game with deterministic dice.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameRng::seeded(seed))
    }

    pub fn mode(&self) -> &GameMode {
        &self.mode
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    /// The active battle, if any.
    pub fn session(&self) -> Option<&BattleSession> {
        match &self.mode {
            GameMode::Battle(session) => Some(session),
            GameMode::Overworld => None,
        }
    }

    /// Dialogue text while the box is open.
    pub fn dialogue(&self) -> Option<&str> {
        self.dialogue.visible()
    }

    /// Number of ticks simulated so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances the simulation by one tick.
    ///
    /// The active mode updates first; then the scheduler clock moves forward by
    /// [`TICK_MS`] and any due one-shot events run.
    pub fn tick(&mut self, input: &InputState) {
        match self.mode {
            GameMode::Overworld => self.update_overworld(input),
            GameMode::Battle(_) => self.update_battle(input),
        }
        for event in self.timers.advance(TICK_MS) {
            self.handle_scheduled(event);
        }
        self.ticks += 1;
    }
}

impl Default for PocketQuestGame {
    fn default() -> Self {
        Self::new(GameRng::new())
    }
}

/// Runs the game loop using [`bracket-lib`].
pub fn run() -> BError {
    let config = InputConfig::load(CONFIG_PATH).unwrap_or_else(|e| {
        warn!("ignoring {}: {}", CONFIG_PATH, e);
        InputConfig::default()
    });
    let context = BTermBuilder::simple(80, 25)?
        .with_title("Pocket Quest")
        .with_advanced_input(true)
        .with_fps_cap(60.0)
        .build()?;
    let app = PocketQuestApp::new(PocketQuestGame::default(), config);
    info!("starting main loop");
    main_loop(context, app)
}
