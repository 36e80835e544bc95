//! Player and NPC entities.
use common::Point;
use data::{NpcSeed, NPCS, START_POSITION};

pub const START_LEVEL: i32 = 5;
pub const START_MAX_HP: i32 = 34;
/// Experience needed per level to reach the next one.
pub const EXP_PER_LEVEL: i32 = 18;
/// Max HP gained on each level-up.
pub const HP_PER_LEVEL: i32 = 4;

/// Player entity with position and battle stats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub pos: Point,
    pub level: i32,
    pub exp: i32,
    pub badges: i32,
    pub hp: i32,
    pub max_hp: i32,
    /// Ticks until the next step is allowed.
    pub move_cooldown: u32,
}

impl Player {
    /// Creates a fresh level 5 player at `pos`.
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            level: START_LEVEL,
            exp: 0,
            badges: 0,
            hp: START_MAX_HP,
            max_hp: START_MAX_HP,
            move_cooldown: 0,
        }
    }

    /// Moves without validation; callers check the map first.
    pub fn move_to(&mut self, pos: Point) {
        self.pos = pos;
    }

    /// Subtracts `amount` HP, never dropping below zero.
    pub fn apply_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount.max(0)).max(0);
    }

    /// Restores up to `amount` HP and returns how much was actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    pub fn restore_full(&mut self) {
        self.hp = self.max_hp;
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn gain_exp(&mut self, amount: i32) {
        self.exp += amount.max(0);
    }

    /// Experience required to leave the current level.
    pub fn exp_to_next(&self) -> i32 {
        self.level * EXP_PER_LEVEL
    }

    /// Applies every level-up the current experience pays for.
    ///
    /// Each level costs `level * 18` experience, raises max HP by 4 and fully
    /// heals. Returns the number of levels gained.
    pub fn level_up_if_needed(&mut self) -> i32 {
        let mut gained = 0;
        let mut needed = self.exp_to_next();
        while self.exp >= needed {
            self.exp -= needed;
            self.level += 1;
            self.max_hp += HP_PER_LEVEL;
            self.hp = self.max_hp;
            gained += 1;
            needed = self.exp_to_next();
        }
        gained
    }

    /// Only one badge exists, so winning never takes the count past one.
    pub fn award_badge(&mut self) {
        self.badges = self.badges.max(1);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(START_POSITION)
    }
}

/// Stationary townsperson.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Npc {
    pub pos: Point,
    pub name: &'static str,
    pub text: &'static str,
    pub trainer: bool,
}

impl From<&NpcSeed> for Npc {
    fn from(seed: &NpcSeed) -> Self {
        Self {
            pos: seed.pos,
            name: seed.name,
            text: seed.text,
            trainer: seed.trainer,
        }
    }
}

/// Places the fixed NPC roster.
pub fn spawn_npcs() -> Vec<Npc> {
    NPCS.iter().map(Npc::from).collect()
}

/// Returns `true` if any NPC stands on `pt`.
pub fn occupied(npcs: &[Npc], pt: Point) -> bool {
    npcs.iter().any(|n| n.pos == pt)
}
