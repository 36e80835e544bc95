use bracket_lib::prelude::VirtualKeyCode;
use common::{GameError, GameResult};
use log::warn;
use serde::Deserialize;

/// Logical controls understood by the game core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Up,
    Down,
    Interact,
    Attack1,
    Attack2,
    Heal,
    Run,
}

impl Control {
    pub const COUNT: usize = 9;

    fn index(self) -> usize {
        self as usize
    }
}

/// Held keys plus presses that arrived since the last tick.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    held: [bool; Control::COUNT],
    pressed: [bool; Control::COUNT],
}

impl InputState {
    /// Records a key-down; auto-repeat does not count as a new press.
    pub fn press(&mut self, control: Control) {
        let i = control.index();
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
    }

    pub fn release(&mut self, control: Control) {
        self.held[control.index()] = false;
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held[control.index()]
    }

    pub fn just_pressed(&self, control: Control) -> bool {
        self.pressed[control.index()]
    }

    /// Forgets press edges once a tick has consumed them.
    pub fn end_tick(&mut self) {
        self.pressed = [false; Control::COUNT];
    }
}

/// Configuration for keyboard controls.
#[derive(Clone, Debug)]
pub struct InputConfig {
    pub left: VirtualKeyCode,
    pub right: VirtualKeyCode,
    pub up: VirtualKeyCode,
    pub down: VirtualKeyCode,
    pub interact: VirtualKeyCode,
    pub attack1: VirtualKeyCode,
    pub attack2: VirtualKeyCode,
    pub heal: VirtualKeyCode,
    pub run: VirtualKeyCode,
    pub quit: VirtualKeyCode,
    pub colorblind: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        use VirtualKeyCode::*;
        Self {
            left: A,
            right: D,
            up: W,
            down: S,
            interact: E,
            attack1: Key1,
            attack2: Key2,
            heal: Key3,
            run: Key4,
            quit: Escape,
            colorblind: false,
        }
    }
}

/// On-disk shape of `pocket_quest.toml`; every field is optional.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    left: Option<String>,
    right: Option<String>,
    up: Option<String>,
    down: Option<String>,
    interact: Option<String>,
    attack1: Option<String>,
    attack2: Option<String>,
    heal: Option<String>,
    run: Option<String>,
    quit: Option<String>,
    colorblind: Option<bool>,
}

impl InputConfig {
    /// Loads configuration from a file if it exists.
    pub fn load(path: &str) -> GameResult<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Self::parse(&data)
    }

    /// Parses TOML text, keeping defaults for anything missing or unknown.
    pub fn parse(data: &str) -> GameResult<Self> {
        let raw: RawConfig = toml::from_str(data).map_err(|e| GameError::Config(e.to_string()))?;
        let mut cfg = Self::default();
        let bindings = [
            ("left", raw.left, &mut cfg.left),
            ("right", raw.right, &mut cfg.right),
            ("up", raw.up, &mut cfg.up),
            ("down", raw.down, &mut cfg.down),
            ("interact", raw.interact, &mut cfg.interact),
            ("attack1", raw.attack1, &mut cfg.attack1),
            ("attack2", raw.attack2, &mut cfg.attack2),
            ("heal", raw.heal, &mut cfg.heal),
            ("run", raw.run, &mut cfg.run),
            ("quit", raw.quit, &mut cfg.quit),
        ];
        for (field, value, slot) in bindings {
            let Some(name) = value else { continue };
            match parse_key(&name) {
                Some(kc) => *slot = kc,
                None => warn!("unknown key {:?} for {}, keeping default", name, field),
            }
        }
        if let Some(colorblind) = raw.colorblind {
            cfg.colorblind = colorblind;
        }
        Ok(cfg)
    }

    /// Maps a physical key to a control. Arrow keys always move.
    pub fn control_for(&self, key: VirtualKeyCode) -> Option<Control> {
        use VirtualKeyCode::*;
        match key {
            k if k == Left || k == self.left => Some(Control::Left),
            k if k == Right || k == self.right => Some(Control::Right),
            k if k == Up || k == self.up => Some(Control::Up),
            k if k == Down || k == self.down => Some(Control::Down),
            k if k == self.interact => Some(Control::Interact),
            k if k == self.attack1 => Some(Control::Attack1),
            k if k == self.attack2 => Some(Control::Attack2),
            k if k == self.heal => Some(Control::Heal),
            k if k == self.run => Some(Control::Run),
            _ => None,
        }
    }
}

fn parse_key(name: &str) -> Option<VirtualKeyCode> {
    use VirtualKeyCode::*;
    let key = match name.to_ascii_lowercase().as_str() {
        "left" => Left,
        "right" => Right,
        "up" => Up,
        "down" => Down,
        "a" => A,
        "b" => B,
        "c" => C,
        "d" => D,
        "e" => E,
        "f" => F,
        "h" => H,
        "i" => I,
        "j" => J,
        "k" => K,
        "l" => L,
        "q" => Q,
        "r" => R,
        "s" => S,
        "w" => W,
        "x" => X,
        "z" => Z,
        "1" => Key1,
        "2" => Key2,
        "3" => Key3,
        "4" => Key4,
        "space" => Space,
        "return" | "enter" => Return,
        "escape" | "esc" => Escape,
        _ => return None,
    };
    Some(key)
}
