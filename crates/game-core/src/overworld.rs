//! Overworld movement, encounters and NPC interaction.

use super::*;

/// Ticks between two steps.
pub const MOVE_COOLDOWN: u32 = 6;
/// How long a dialogue box stays up.
pub const DIALOGUE_TICKS: u32 = 220;
/// Chance per tall-grass step of a wild encounter.
pub const ENCOUNTER_CHANCE: f64 = 0.08;

/// Text box shown over the overworld for a fixed number of ticks.
#[derive(Clone, Debug, Default)]
pub struct Dialogue {
    text: String,
    ticks: u32,
}

impl Dialogue {
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.ticks = DIALOGUE_TICKS;
    }

    pub fn tick(&mut self) {
        self.ticks = self.ticks.saturating_sub(1);
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// The text while the box is open.
    pub fn visible(&self) -> Option<&str> {
        (self.ticks > 0).then_some(self.text.as_str())
    }
}

/// Result of a movement attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Blocked,
    Moved,
    /// Moved into tall grass and a wild monster jumped out.
    Encounter,
}

/// What pressing interact next to NPCs leads to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    Nobody,
    Talk { text: &'static str },
    Challenge { name: &'static str, text: &'static str },
}

/// Moves the player one tile unless a wall or an NPC is in the way.
pub fn try_move(
    map: &Map,
    npcs: &[Npc],
    player: &mut Player,
    delta: Point,
    dice: &mut impl Dice,
) -> Step {
    let target = player.pos.offset(delta);
    if map.is_blocking(target) || actors::occupied(npcs, target) {
        debug!("blocked at {:?}", target);
        return Step::Blocked;
    }
    player.move_to(target);
    if map.is_encounter_tile(target) && dice.chance() < ENCOUNTER_CHANCE {
        return Step::Encounter;
    }
    Step::Moved
}

/// Held direction with priority left, right, up, down.
pub fn direction(input: &InputState) -> Option<Point> {
    [
        (Control::Left, Point::new(-1, 0)),
        (Control::Right, Point::new(1, 0)),
        (Control::Up, Point::new(0, -1)),
        (Control::Down, Point::new(0, 1)),
    ]
    .into_iter()
    .find(|(control, _)| input.is_held(*control))
    .map(|(_, delta)| delta)
}

/// Finds the first NPC (in list order) standing next to the player.
pub fn interact(player: &Player, npcs: &[Npc]) -> Interaction {
    match npcs.iter().find(|npc| npc.pos.manhattan(player.pos) == 1) {
        None => Interaction::Nobody,
        Some(npc) if npc.trainer && player.badges == 0 => Interaction::Challenge {
            name: npc.name,
            text: npc.text,
        },
        Some(npc) => Interaction::Talk { text: npc.text },
    }
}

impl PocketQuestGame {
    pub(crate) fn update_overworld(&mut self, input: &InputState) {
        self.dialogue.tick();
        self.player.move_cooldown = self.player.move_cooldown.saturating_sub(1);
        if self.player.move_cooldown == 0 {
            if let Some(delta) = direction(input) {
                self.player.move_cooldown = MOVE_COOLDOWN;
                let step = try_move(&self.map, &self.npcs, &mut self.player, delta, &mut self.rng);
                if step == Step::Encounter {
                    self.begin_wild_battle();
                    return;
                }
            }
        }
        if input.just_pressed(Control::Interact) {
            self.interact();
        }
    }

    /// Talks to an adjacent NPC, or starts the rival battle.
    pub fn interact(&mut self) {
        if !matches!(self.mode, GameMode::Overworld) {
            return;
        }
        match interact(&self.player, &self.npcs) {
            Interaction::Nobody => self.dialogue.show(NOBODY_NEARBY_TEXT),
            Interaction::Talk { text } => self.dialogue.show(text),
            Interaction::Challenge { name, text } => {
                self.dialogue.show(text);
                self.begin_trainer_battle(name);
            }
        }
    }

    fn begin_wild_battle(&mut self) {
        let session = battle::start_wild_battle(&self.player, &mut self.rng);
        info!("entering battle at {:?}", self.player.pos);
        self.mode = GameMode::Battle(session);
    }

    fn begin_trainer_battle(&mut self, trainer_name: &str) {
        let session = battle::start_trainer_battle(&self.player, trainer_name);
        self.dialogue.show(session.message.clone());
        info!("{} challenged the player", trainer_name);
        self.mode = GameMode::Battle(session);
    }
}
