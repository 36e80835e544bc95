//! Turn-based battle engine.
//!
//! A [`BattleSession`] walks through its [`Phase`]s one tick at a time. Player
//! commands are only honored in [`Phase::AwaitingAction`]; every command sets a
//! message hold, and a pending enemy turn fires on the tick after the hold runs
//! out. Operations that end the battle return [`Turn::Resolved`] so the caller
//! can schedule the return to the overworld.

use actors::Player;
use common::Dice;
use data::{Move, PLAYER_MONSTER, RESPAWN_POSITION, TRAINER_MONSTER, WILD_SPECIES};
use log::{debug, info};

/// Hold for the opening message of a battle.
pub const INTRO_TICKS: u32 = 220;
/// Hold after a player command.
pub const ACTION_TICKS: u32 = 45;
/// Hold after the enemy strikes.
pub const ENEMY_TICKS: u32 = 55;
/// Hold after the enemy faints.
pub const VICTORY_TICKS: u32 = 70;
/// Hold after the player faints.
pub const DEFEAT_TICKS: u32 = 80;
/// Milliseconds between resolution and the return to the overworld.
pub const SETTLE_DELAY_MS: u32 = 700;
/// Probability of escaping a wild battle.
pub const ESCAPE_CHANCE: f64 = 0.55;

const POTION_MIN: i32 = 8;
const POTION_MAX: i32 = 14;
const ENEMY_MIN: i32 = 3;
const ENEMY_MAX: i32 = 8;

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Fled,
    Lost,
}

/// What follows a message hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AfterMessage {
    PlayerAction,
    EnemyTurn,
}

/// Battle sub-state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a command from the player.
    AwaitingAction,
    /// A message is on screen; input is ignored until `ticks` reaches zero.
    Message { ticks: u32, next: AfterMessage },
    /// The enemy moves on the next update.
    EnemyTurn,
    /// The battle is over and waiting for the settle delay.
    Resolved { outcome: Outcome, ticks: u32 },
}

/// Result of a battle operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Continue,
    Resolved(Outcome),
}

/// Player commands from the battle menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Attack(Move),
    Potion,
    Run,
}

/// Name, level and HP of one side of the battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combatant {
    pub name: String,
    pub level: i32,
    pub hp: i32,
    pub max_hp: i32,
}

/// One active battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleSession {
    pub player: Combatant,
    pub enemy: Combatant,
    /// Trainer battles cannot be fled and award a badge.
    pub trainer: bool,
    pub message: String,
    pub phase: Phase,
}

/// Starts a battle against a random wild monster.
pub fn start_wild_battle(player: &Player, dice: &mut impl Dice) -> BattleSession {
    let hp = dice.roll(18, 31);
    let level = dice.roll(2, 5);
    let idx = dice.roll(0, WILD_SPECIES.len() as i32 - 1).clamp(0, WILD_SPECIES.len() as i32 - 1);
    let species = WILD_SPECIES[idx as usize];
    info!("wild battle: {} lv{} hp{}", species, level, hp);
    BattleSession::new(
        player,
        Combatant {
            name: species.to_string(),
            level,
            hp,
            max_hp: hp,
        },
        false,
        format!("A wild {} appeared!", species),
        Phase::Message {
            ticks: INTRO_TICKS,
            next: AfterMessage::PlayerAction,
        },
    )
}

/// Starts the rival battle; it scales with the player's level and badges and
/// takes commands right away.
pub fn start_trainer_battle(player: &Player, trainer_name: &str) -> BattleSession {
    let hp = 24 + player.badges * 5;
    info!("trainer battle: {} lv{} hp{}", trainer_name, player.level + 1, hp);
    BattleSession::new(
        player,
        Combatant {
            name: TRAINER_MONSTER.to_string(),
            level: player.level + 1,
            hp,
            max_hp: hp,
        },
        true,
        format!("{} challenges you!", trainer_name),
        Phase::AwaitingAction,
    )
}

impl BattleSession {
    fn new(player: &Player, enemy: Combatant, trainer: bool, message: String, phase: Phase) -> Self {
        Self {
            player: Combatant {
                name: PLAYER_MONSTER.to_string(),
                level: player.level,
                hp: player.hp,
                max_hp: player.max_hp,
            },
            enemy,
            trainer,
            message,
            phase,
        }
    }

    /// Whether a menu command would be honored right now.
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::AwaitingAction
    }

    /// Remaining message hold.
    pub fn message_ticks(&self) -> u32 {
        match self.phase {
            Phase::Message { ticks, .. } | Phase::Resolved { ticks, .. } => ticks,
            Phase::AwaitingAction | Phase::EnemyTurn => 0,
        }
    }

    /// Whether the enemy will move once the current hold ends.
    pub fn awaiting_enemy_turn(&self) -> bool {
        matches!(
            self.phase,
            Phase::EnemyTurn
                | Phase::Message {
                    next: AfterMessage::EnemyTurn,
                    ..
                }
        )
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Resolved { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    fn say(&mut self, message: String, ticks: u32, next: AfterMessage) {
        self.message = message;
        self.phase = Phase::Message { ticks, next };
    }

    fn resolve(&mut self, message: String, ticks: u32, outcome: Outcome) -> Turn {
        info!("battle resolved: {:?}", outcome);
        self.message = message;
        self.phase = Phase::Resolved { outcome, ticks };
        Turn::Resolved(outcome)
    }

    fn sync_player(&mut self, player: &Player) {
        self.player.level = player.level;
        self.player.hp = player.hp;
        self.player.max_hp = player.max_hp;
    }

    /// Advances one tick: counts the hold down, then fires a pending enemy turn.
    pub fn update(&mut self, player: &mut Player, dice: &mut impl Dice) -> Turn {
        match self.phase {
            Phase::Message { ticks, next } => {
                let ticks = ticks.saturating_sub(1);
                self.phase = match (ticks, next) {
                    (0, AfterMessage::PlayerAction) => Phase::AwaitingAction,
                    (0, AfterMessage::EnemyTurn) => Phase::EnemyTurn,
                    _ => Phase::Message { ticks, next },
                };
                Turn::Continue
            }
            Phase::EnemyTurn => self.enemy_turn(player, dice),
            Phase::Resolved { outcome, ticks } => {
                self.phase = Phase::Resolved {
                    outcome,
                    ticks: ticks.saturating_sub(1),
                };
                Turn::Continue
            }
            Phase::AwaitingAction => Turn::Continue,
        }
    }

    /// Runs a menu command. Returns `None` while input is gated.
    pub fn act(&mut self, action: Action, player: &mut Player, dice: &mut impl Dice) -> Option<Turn> {
        if !self.accepts_input() {
            return None;
        }
        Some(match action {
            Action::Attack(mv) => self.player_attack(player, &mv, dice),
            Action::Potion => self.use_potion(player, dice),
            Action::Run => self.attempt_run(player, dice),
        })
    }

    /// Hits the enemy with `mv`; damage is the move's roll plus half the level.
    pub fn player_attack(&mut self, player: &mut Player, mv: &Move, dice: &mut impl Dice) -> Turn {
        let dmg = dice.roll(mv.min, mv.max) + player.level / 2;
        self.enemy.hp = (self.enemy.hp - dmg).max(0);
        debug!("{} used {} for {}", self.player.name, mv.name, dmg);

        if self.enemy.hp == 0 {
            let exp = 8 + self.enemy.level * 3;
            player.gain_exp(exp);
            let levels = player.level_up_if_needed();
            if levels > 0 {
                info!("level up x{} -> lv{}", levels, player.level);
            }
            if self.trainer {
                player.award_badge();
            }
            self.sync_player(player);
            let message = format!("{} fainted! +{} XP", self.enemy.name, exp);
            return self.resolve(message, VICTORY_TICKS, Outcome::Won);
        }

        let message = format!("{} used {}! (-{})", self.player.name, mv.name, dmg);
        self.say(message, ACTION_TICKS, AfterMessage::EnemyTurn);
        Turn::Continue
    }

    /// The enemy strikes back. A fainted player is healed and sent to town.
    pub fn enemy_turn(&mut self, player: &mut Player, dice: &mut impl Dice) -> Turn {
        let dmg = dice.roll(ENEMY_MIN, ENEMY_MAX) + self.enemy.level / 2;
        player.apply_damage(dmg);
        debug!("{} hit for {}", self.enemy.name, dmg);

        if player.is_fainted() {
            player.restore_full();
            player.move_to(RESPAWN_POSITION);
            self.sync_player(player);
            let message = format!("{} fainted! You rushed to the nearest town.", self.player.name);
            return self.resolve(message, DEFEAT_TICKS, Outcome::Lost);
        }

        self.sync_player(player);
        let message = format!("{} struck back! (-{})", self.enemy.name, dmg);
        self.say(message, ENEMY_TICKS, AfterMessage::PlayerAction);
        Turn::Continue
    }

    /// Drinks a potion; costs the turn.
    pub fn use_potion(&mut self, player: &mut Player, dice: &mut impl Dice) -> Turn {
        let heal = dice.roll(POTION_MIN, POTION_MAX);
        player.heal(heal);
        self.sync_player(player);
        self.say(
            format!("You used a potion! ( +{} HP )", heal),
            ACTION_TICKS,
            AfterMessage::EnemyTurn,
        );
        Turn::Continue
    }

    /// Tries to flee. Trainer battles refuse without costing a turn.
    pub fn attempt_run(&mut self, _player: &mut Player, dice: &mut impl Dice) -> Turn {
        if self.trainer {
            self.say(
                "Can't run from a trainer battle!".to_string(),
                ACTION_TICKS,
                AfterMessage::PlayerAction,
            );
            return Turn::Continue;
        }

        let roll = dice.chance();
        debug!("escape roll {:.3}", roll);
        if roll < ESCAPE_CHANCE {
            return self.resolve("You escaped safely.".to_string(), ACTION_TICKS, Outcome::Fled);
        }
        self.say("Couldn't escape!".to_string(), ACTION_TICKS, AfterMessage::EnemyTurn);
        Turn::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Point;
    use data::MOVES;
    use std::collections::VecDeque;

    /// Replays fixed values; falls back to the range minimum when empty.
    #[derive(Default)]
    struct ScriptedDice {
        rolls: VecDeque<i32>,
        chances: VecDeque<f64>,
    }

    impl ScriptedDice {
        fn rolls(values: &[i32]) -> Self {
            Self {
                rolls: values.iter().copied().collect(),
                ..Default::default()
            }
        }

        fn chances(values: &[f64]) -> Self {
            Self {
                chances: values.iter().copied().collect(),
                ..Default::default()
            }
        }
    }

    impl Dice for ScriptedDice {
        fn roll(&mut self, min: i32, _max: i32) -> i32 {
            self.rolls.pop_front().unwrap_or(min)
        }

        fn chance(&mut self) -> f64 {
            self.chances.pop_front().unwrap_or(0.0)
        }
    }

    /// Small LCG for statistical checks.
    struct Lcg(u64);

    impl Lcg {
        fn next_u32(&mut self) -> u32 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (self.0 >> 32) as u32
        }
    }

    impl Dice for Lcg {
        fn roll(&mut self, min: i32, max: i32) -> i32 {
            let span = (max - min + 1) as u32;
            min + (self.next_u32() % span) as i32
        }

        fn chance(&mut self) -> f64 {
            self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
        }
    }

    fn ready(mut session: BattleSession) -> BattleSession {
        session.phase = Phase::AwaitingAction;
        session
    }

    fn wild(player: &Player, enemy_hp: i32, enemy_level: i32) -> BattleSession {
        let mut dice = ScriptedDice::rolls(&[enemy_hp, enemy_level, 0]);
        ready(start_wild_battle(player, &mut dice))
    }

    fn run_until_input(session: &mut BattleSession, player: &mut Player, dice: &mut impl Dice) -> u32 {
        let mut ticks = 0;
        while !session.accepts_input() {
            session.update(player, dice);
            ticks += 1;
            assert!(ticks < 1000, "battle never returned control");
        }
        ticks
    }

    #[test]
    fn wild_battle_stats_within_ranges() {
        let player = Player::default();
        let mut dice = Lcg(7);
        for _ in 0..500 {
            let s = start_wild_battle(&player, &mut dice);
            assert!((2..=5).contains(&s.enemy.level));
            assert!((18..=31).contains(&s.enemy.hp));
            assert_eq!(s.enemy.hp, s.enemy.max_hp);
            assert!(WILD_SPECIES.contains(&s.enemy.name.as_str()));
            assert!(!s.trainer);
        }
    }

    #[test]
    fn wild_battle_opens_with_intro_message() {
        let player = Player::default();
        let mut dice = ScriptedDice::rolls(&[20, 3, 1]);
        let s = start_wild_battle(&player, &mut dice);
        assert_eq!(s.enemy.name, "Aquafi");
        assert_eq!(s.message, "A wild Aquafi appeared!");
        assert_eq!(s.message_ticks(), INTRO_TICKS);
        assert!(!s.accepts_input());
        assert_eq!(s.player.name, "Leaflit");
        assert_eq!(s.player.hp, player.hp);
    }

    #[test]
    fn trainer_battle_scales_with_badges() {
        let mut player = Player::default();
        let s = start_trainer_battle(&player, "Rival Ken");
        assert_eq!(s.enemy.name, "Rivalmon");
        assert_eq!(s.enemy.level, 6);
        assert_eq!(s.enemy.hp, 24);
        assert!(s.trainer);
        assert_eq!(s.message, "Rival Ken challenges you!");
        assert!(s.accepts_input());

        player.badges = 2;
        let s = start_trainer_battle(&player, "Rival Ken");
        assert_eq!(s.enemy.hp, 34);
    }

    #[test]
    fn attack_damages_and_queues_enemy_turn() {
        let mut player = Player::default();
        let mut s = wild(&player, 30, 2);
        let mut dice = ScriptedDice::rolls(&[6]);
        let turn = s.player_attack(&mut player, &MOVES[0], &mut dice);
        assert_eq!(turn, Turn::Continue);
        // 6 + 5 / 2
        assert_eq!(s.enemy.hp, 22);
        assert_eq!(s.message, "Leaflit used Leaf Slash! (-8)");
        assert_eq!(s.message_ticks(), ACTION_TICKS);
        assert!(s.awaiting_enemy_turn());
    }

    #[test]
    fn enemy_turn_fires_after_hold_without_input() {
        let mut player = Player::default();
        let mut s = wild(&player, 30, 4);
        let mut dice = ScriptedDice::rolls(&[5, 3]);
        s.player_attack(&mut player, &MOVES[0], &mut dice);
        for _ in 0..ACTION_TICKS {
            assert!(s.act(Action::Potion, &mut player, &mut dice).is_none());
            s.update(&mut player, &mut dice);
        }
        assert_eq!(s.phase, Phase::EnemyTurn);
        assert_eq!(player.hp, 34);
        assert!(s.act(Action::Potion, &mut player, &mut dice).is_none());

        s.update(&mut player, &mut dice);
        // 3 + 4 / 2
        assert_eq!(player.hp, 29);
        assert_eq!(s.player.hp, 29);
        assert_eq!(s.message, format!("{} struck back! (-5)", s.enemy.name));
        assert_eq!(s.message_ticks(), ENEMY_TICKS);
        assert!(!s.awaiting_enemy_turn());

        let waited = run_until_input(&mut s, &mut player, &mut dice);
        assert_eq!(waited, ENEMY_TICKS);
    }

    #[test]
    fn knockout_awards_exp_and_resolves() {
        let mut player = Player::default();
        let mut s = wild(&player, 5, 3);
        let mut dice = ScriptedDice::rolls(&[9]);
        let turn = s.player_attack(&mut player, &MOVES[0], &mut dice);
        assert_eq!(turn, Turn::Resolved(Outcome::Won));
        assert_eq!(s.enemy.hp, 0);
        assert_eq!(player.exp, 8 + 3 * 3);
        assert_eq!(s.message, format!("{} fainted! +17 XP", s.enemy.name));
        assert_eq!(s.message_ticks(), VICTORY_TICKS);
        assert_eq!(s.outcome(), Some(Outcome::Won));
        assert_eq!(player.badges, 0);
        assert!(!s.accepts_input());
    }

    #[test]
    fn knockout_can_level_up() {
        let mut player = Player::default();
        player.exp = 83;
        player.hp = 10;
        let mut s = wild(&player, 1, 2);
        let mut dice = ScriptedDice::rolls(&[5]);
        s.player_attack(&mut player, &MOVES[1], &mut dice);
        // 83 + 14 = 97, threshold 90
        assert_eq!(player.level, 6);
        assert_eq!(player.exp, 7);
        assert_eq!(player.hp, 38);
        assert_eq!(s.player.level, 6);
        assert_eq!(s.player.max_hp, 38);
    }

    #[test]
    fn trainer_win_grants_badge() {
        let mut player = Player::default();
        let mut s = ready(start_trainer_battle(&player, "Rival Ken"));
        s.enemy.hp = 1;
        let mut dice = ScriptedDice::rolls(&[5]);
        assert_eq!(
            s.player_attack(&mut player, &MOVES[0], &mut dice),
            Turn::Resolved(Outcome::Won)
        );
        assert_eq!(player.badges, 1);
        assert_eq!(player.exp, 8 + 3 * 6);
    }

    #[test]
    fn fainting_sends_player_to_town() {
        let mut player = Player::default();
        player.pos = Point::new(15, 8);
        player.hp = 5;
        player.exp = 12;
        let mut s = wild(&player, 30, 4);
        // 3 + 4 / 2 = 5, exactly the remaining HP
        let mut dice = ScriptedDice::rolls(&[3]);
        let turn = s.enemy_turn(&mut player, &mut dice);
        assert_eq!(turn, Turn::Resolved(Outcome::Lost));
        assert_eq!(player.hp, player.max_hp);
        assert_eq!(player.pos, RESPAWN_POSITION);
        assert_eq!(player.exp, 12);
        assert_eq!(player.badges, 0);
        assert_eq!(s.message, "Leaflit fainted! You rushed to the nearest town.");
        assert_eq!(s.message_ticks(), DEFEAT_TICKS);
        assert_eq!(s.outcome(), Some(Outcome::Lost));
    }

    #[test]
    fn potion_heals_and_costs_turn() {
        let mut player = Player::default();
        player.hp = 30;
        let mut s = wild(&player, 30, 2);
        let mut dice = ScriptedDice::rolls(&[14]);
        s.use_potion(&mut player, &mut dice);
        assert_eq!(player.hp, 34);
        assert_eq!(s.player.hp, 34);
        assert_eq!(s.message, "You used a potion! ( +14 HP )");
        assert!(s.awaiting_enemy_turn());
        assert_eq!(s.message_ticks(), ACTION_TICKS);
    }

    #[test]
    fn trainer_run_only_changes_message() {
        let mut player = Player::default();
        player.hp = 20;
        let mut s = ready(start_trainer_battle(&player, "Rival Ken"));
        let before = s.clone();
        let mut dice = ScriptedDice::chances(&[0.0]);
        for _ in 0..5 {
            assert_eq!(s.attempt_run(&mut player, &mut dice), Turn::Continue);
            assert_eq!(s.message, "Can't run from a trainer battle!");
            assert_eq!(s.player, before.player);
            assert_eq!(s.enemy, before.enemy);
            assert!(!s.awaiting_enemy_turn());
            run_until_input(&mut s, &mut player, &mut dice);
        }
        assert_eq!(player.hp, 20);
    }

    #[test]
    fn run_respects_escape_threshold() {
        let mut player = Player::default();
        let mut s = wild(&player, 30, 2);
        let mut dice = ScriptedDice::chances(&[0.55]);
        assert_eq!(s.attempt_run(&mut player, &mut dice), Turn::Continue);
        assert_eq!(s.message, "Couldn't escape!");
        assert!(s.awaiting_enemy_turn());

        let mut s = wild(&player, 30, 2);
        let mut dice = ScriptedDice::chances(&[0.549]);
        assert_eq!(
            s.attempt_run(&mut player, &mut dice),
            Turn::Resolved(Outcome::Fled)
        );
        assert_eq!(s.message, "You escaped safely.");
        assert_eq!(player, Player::default());
    }

    #[test]
    fn escape_rate_converges() {
        let player = Player::default();
        let mut dice = Lcg(0x5eed);
        let trials = 20_000;
        let mut escaped = 0;
        for _ in 0..trials {
            let mut p = player.clone();
            let mut s = wild(&p, 30, 2);
            if s.attempt_run(&mut p, &mut dice) == Turn::Resolved(Outcome::Fled) {
                escaped += 1;
            }
        }
        let rate = escaped as f64 / trials as f64;
        assert!((rate - ESCAPE_CHANCE).abs() < 0.02, "rate {}", rate);
    }

    #[test]
    fn act_is_gated_by_phase() {
        let mut player = Player::default();
        let mut dice = ScriptedDice::rolls(&[20, 3, 0, 7]);
        let mut s = start_wild_battle(&player, &mut dice);
        assert!(s.act(Action::Attack(MOVES[0]), &mut player, &mut dice).is_none());
        let waited = run_until_input(&mut s, &mut player, &mut dice);
        assert_eq!(waited, INTRO_TICKS);
        let turn = s.act(Action::Attack(MOVES[0]), &mut player, &mut dice);
        assert_eq!(turn, Some(Turn::Continue));
        assert_eq!(s.enemy.hp, 20 - (7 + 2));
    }

    #[test]
    fn trainer_battle_takes_a_command_immediately() {
        let mut player = Player::default();
        let mut s = start_trainer_battle(&player, "Rival Ken");
        let mut dice = ScriptedDice::rolls(&[5]);
        let turn = s.act(Action::Attack(MOVES[0]), &mut player, &mut dice);
        assert_eq!(turn, Some(Turn::Continue));
        // 5 + 5 / 2
        assert_eq!(s.enemy.hp, 24 - 7);
        assert!(s.awaiting_enemy_turn());
    }

    #[test]
    fn resolved_phase_ignores_input() {
        let mut player = Player::default();
        let mut s = wild(&player, 30, 2);
        let mut dice = ScriptedDice::chances(&[0.1]);
        s.attempt_run(&mut player, &mut dice);
        for _ in 0..200 {
            assert_eq!(s.update(&mut player, &mut dice), Turn::Continue);
            assert!(s.act(Action::Run, &mut player, &mut dice).is_none());
        }
        assert_eq!(s.outcome(), Some(Outcome::Fled));
        assert_eq!(s.message_ticks(), 0);
    }
}
