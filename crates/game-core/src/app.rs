use super::{InputConfig, InputState, ModeView, PocketQuestGame, TICK_MS};
use bracket_lib::prelude::*;
use log::info;
use ui::{ColorPalette, Renderer};

/// Frames slower than this many ticks drop the remainder instead of catching up.
const MAX_TICKS_PER_FRAME: u32 = 5;

/// Bridges `bracket-lib` frames to fixed simulation ticks.
pub struct PocketQuestApp {
    game: PocketQuestGame,
    config: InputConfig,
    input: InputState,
    renderer: Renderer,
    accumulator_ms: f32,
}

impl PocketQuestApp {
    pub fn new(game: PocketQuestGame, config: InputConfig) -> Self {
        let palette = if config.colorblind {
            ColorPalette::colorblind()
        } else {
            ColorPalette::default()
        };
        Self {
            game,
            config,
            input: InputState::default(),
            renderer: Renderer::new(palette),
            accumulator_ms: 0.0,
        }
    }

    pub fn game(&self) -> &PocketQuestGame {
        &self.game
    }

    /// Applies one input event. Returns `true` when the player asked to quit.
    fn handle_event(&mut self, event: &BEvent) -> bool {
        match event {
            BEvent::KeyboardInput { key, pressed, .. } => {
                if *pressed && *key == self.config.quit {
                    return true;
                }
                if let Some(control) = self.config.control_for(*key) {
                    if *pressed {
                        self.input.press(control);
                    } else {
                        self.input.release(control);
                    }
                }
                false
            }
            BEvent::CloseRequested => true,
            _ => false,
        }
    }

    /// Runs as many whole ticks as `frame_ms` pays for.
    fn advance(&mut self, frame_ms: f32) -> u32 {
        self.accumulator_ms += frame_ms.max(0.0);
        let step = TICK_MS as f32;
        let mut ran = 0;
        while self.accumulator_ms >= step && ran < MAX_TICKS_PER_FRAME {
            self.game.tick(&self.input);
            self.input.end_tick();
            self.accumulator_ms -= step;
            ran += 1;
        }
        if ran == MAX_TICKS_PER_FRAME {
            self.accumulator_ms = self.accumulator_ms.min(step);
        }
        ran
    }

    fn render(&self, ctx: &mut BTerm) {
        let snapshot = self.game.snapshot();
        match snapshot.mode {
            ModeView::Overworld => self.renderer.draw_overworld(ctx, &snapshot.overworld_view()),
            ModeView::Battle => {
                if let Some(session) = snapshot.battle {
                    self.renderer.draw_battle(ctx, session);
                }
            }
        }
    }
}

impl GameState for PocketQuestApp {
    fn tick(&mut self, ctx: &mut BTerm) {
        let events: Vec<BEvent> = {
            let mut input = INPUT.lock();
            std::iter::from_fn(|| input.pop()).collect()
        };
        for event in &events {
            if self.handle_event(event) {
                info!("quit requested after {} ticks", self.game.ticks());
                ctx.quit();
                return;
            }
        }
        self.advance(ctx.frame_time_ms);
        self.render(ctx);
    }
}

impl Default for PocketQuestApp {
    fn default() -> Self {
        Self::new(PocketQuestGame::default(), InputConfig::default())
    }
}
