//! Battle-mode dispatch and the delayed return to the overworld.

use super::*;
use battle::{Action, Outcome, Turn, SETTLE_DELAY_MS};

/// Events the loop schedules for later ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Scheduled {
    ReturnToOverworld(Outcome),
}

/// First battle command pressed this tick, in menu order.
fn battle_action(input: &InputState) -> Option<Action> {
    if input.just_pressed(Control::Attack1) {
        Some(Action::Attack(MOVES[0]))
    } else if input.just_pressed(Control::Attack2) {
        Some(Action::Attack(MOVES[1]))
    } else if input.just_pressed(Control::Heal) {
        Some(Action::Potion)
    } else if input.just_pressed(Control::Run) {
        Some(Action::Run)
    } else {
        None
    }
}

fn summary(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Won => WON_SUMMARY,
        Outcome::Lost | Outcome::Fled => LOST_SUMMARY,
    }
}

impl PocketQuestGame {
    pub(crate) fn update_battle(&mut self, input: &InputState) {
        let GameMode::Battle(session) = &mut self.mode else {
            return;
        };
        let mut turn = session.update(&mut self.player, &mut self.rng);
        if turn == Turn::Continue {
            if let Some(action) = battle_action(input) {
                if let Some(result) = session.act(action, &mut self.player, &mut self.rng) {
                    turn = result;
                }
            }
        }
        if let Turn::Resolved(outcome) = turn {
            self.timers
                .schedule(SETTLE_DELAY_MS, Scheduled::ReturnToOverworld(outcome));
        }
    }

    pub(crate) fn handle_scheduled(&mut self, event: Scheduled) {
        match event {
            Scheduled::ReturnToOverworld(outcome) => self.finish_battle(outcome),
        }
    }

    fn finish_battle(&mut self, outcome: Outcome) {
        if !matches!(self.mode, GameMode::Battle(_)) {
            return;
        }
        info!("battle over ({:?}), back to the overworld", outcome);
        self.mode = GameMode::Overworld;
        self.dialogue.show(summary(outcome));
    }
}
