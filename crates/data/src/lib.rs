//! Fixed game content for Pocket Quest.

use common::Point;

/// Name of the player's monster.
pub const PLAYER_MONSTER: &str = "Leaflit";

/// Monster fielded by trainers.
pub const TRAINER_MONSTER: &str = "Rivalmon";

/// Species that can appear in tall grass.
pub const WILD_SPECIES: [&str; 4] = ["Pyromite", "Aquafi", "Thorncub", "Voltlet"];

/// Where the player starts a new game.
pub const START_POSITION: Point = Point { x: 6, y: 7 };

/// Where the player wakes up after fainting.
pub const RESPAWN_POSITION: Point = Point { x: 6, y: 10 };

pub const WELCOME_TEXT: &str = "Welcome to Pocket Quest! Move with arrows/WASD. Press E near NPCs.";
pub const NOBODY_NEARBY_TEXT: &str = "Nobody is close enough to talk.";
pub const GOAL_TEXT: &str = "Goal: Beat Rival Ken";
pub const WON_SUMMARY: &str = "Battle won! Keep training your Leaflit.";
/// Shown after a defeat and after running away.
pub const LOST_SUMMARY: &str = "You recovered at town. Stay sharp in tall grass!";

/// An attack the player's monster knows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub name: &'static str,
    /// Lowest base damage.
    pub min: i32,
    /// Highest base damage, inclusive.
    pub max: i32,
}

/// The two attacks on the battle menu, in menu order.
pub const MOVES: [Move; 2] = [
    Move {
        name: "Leaf Slash",
        min: 5,
        max: 9,
    },
    Move {
        name: "Vine Whip",
        min: 7,
        max: 11,
    },
];

/// Placement of an NPC in the starting town.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NpcSeed {
    pub pos: Point,
    pub name: &'static str,
    pub text: &'static str,
    /// Trainers challenge the player to a battle.
    pub trainer: bool,
}

/// Every NPC in the world, in interaction priority order.
pub const NPCS: [NpcSeed; 4] = [
    NpcSeed {
        pos: Point { x: 9, y: 10 },
        name: "Trainer Mia",
        text: "Trainer Mia: Wild Pyromite appear in tall grass!",
        trainer: false,
    },
    NpcSeed {
        pos: Point { x: 22, y: 19 },
        name: "Rival Ken",
        text: "Rival Ken: Beat 2 monsters and I'll duel you!",
        trainer: true,
    },
    NpcSeed {
        pos: Point { x: 7, y: 17 },
        name: "Healer",
        text: "Healer: Rest at town often. Potions are expensive!",
        trainer: false,
    },
    NpcSeed {
        pos: Point { x: 25, y: 26 },
        name: "Professor Pine",
        text: "Professor Pine: Your starter is Leaflit. Raise it well!",
        trainer: false,
    },
];
