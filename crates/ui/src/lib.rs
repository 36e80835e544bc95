//! Terminal drawing for the overworld and battle screens.
use actors::{Npc, Player};
use battle::{BattleSession, Combatant};
use bracket_lib::prelude::{to_cp437, BTerm, RGB};
use common::Point;
use data::{GOAL_TEXT, MOVES, PLAYER_MONSTER};
use mapgen::TileKind;

/// Viewport width in tiles.
pub const VIEW_COLS: i32 = 22;
/// Viewport height in tiles.
pub const VIEW_ROWS: i32 = 16;

const HUD_X: i32 = VIEW_COLS + 2;
const DIALOGUE_Y: i32 = VIEW_ROWS + 1;
const SCREEN_W: i32 = 80;
const BAR_WIDTH: usize = 20;

/// Color palette for map and entity rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPalette {
    pub grass: RGB,
    pub path: RGB,
    pub tree: RGB,
    pub tall_grass: RGB,
    pub water: RGB,
    pub house: RGB,
    pub player: RGB,
    pub npc: RGB,
    pub trainer: RGB,
    pub text: RGB,
    pub background: RGB,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            grass: RGB::from_u8(96, 202, 96),
            path: RGB::from_u8(206, 182, 124),
            tree: RGB::from_u8(27, 92, 46),
            tall_grass: RGB::from_u8(75, 192, 88),
            water: RGB::from_u8(60, 132, 224),
            house: RGB::from_u8(158, 96, 72),
            player: RGB::from_u8(255, 60, 60),
            npc: RGB::from_u8(120, 82, 188),
            trainer: RGB::from_u8(197, 66, 72),
            text: RGB::from_u8(255, 255, 255),
            background: RGB::from_u8(0, 0, 0),
        }
    }
}

impl ColorPalette {
    /// Returns a high contrast palette suitable for colorblind players.
    pub fn colorblind() -> Self {
        Self {
            grass: RGB::from_u8(200, 200, 200),
            path: RGB::from_u8(255, 255, 140),
            tree: RGB::from_u8(90, 90, 90),
            tall_grass: RGB::from_u8(255, 200, 0),
            water: RGB::from_u8(0, 114, 178),
            house: RGB::from_u8(213, 94, 0),
            player: RGB::from_u8(255, 255, 255),
            npc: RGB::from_u8(204, 121, 167),
            trainer: RGB::from_u8(240, 228, 66),
            text: RGB::from_u8(255, 255, 255),
            background: RGB::from_u8(0, 0, 0),
        }
    }
}

/// Everything the overworld screen needs for one frame.
pub struct OverworldView<'a> {
    pub camera: Point,
    /// Row-major tiles of the viewport.
    pub tiles: &'a [TileKind],
    pub npcs: &'a [Npc],
    pub player: &'a Player,
    pub dialogue: Option<&'a str>,
}

/// Stateless renderer holding the active palette.
#[derive(Clone, Copy, Debug, Default)]
pub struct Renderer {
    palette: ColorPalette,
}

impl Renderer {
    pub fn new(palette: ColorPalette) -> Self {
        Self { palette }
    }

    pub fn tile_style(&self, tile: TileKind) -> (char, RGB) {
        match tile {
            TileKind::Grass => ('.', self.palette.grass),
            TileKind::Path => (':', self.palette.path),
            TileKind::Tree => ('♣', self.palette.tree),
            TileKind::TallGrass => ('"', self.palette.tall_grass),
            TileKind::Water => ('~', self.palette.water),
            TileKind::House => ('#', self.palette.house),
        }
    }

    /// Draws map, actors, HUD and any open dialogue.
    pub fn draw_overworld(&self, ctx: &mut BTerm, view: &OverworldView) {
        ctx.cls();
        let bg = self.palette.background;
        for (i, tile) in view.tiles.iter().enumerate() {
            let x = i as i32 % VIEW_COLS;
            let y = i as i32 / VIEW_COLS;
            let (glyph, color) = self.tile_style(*tile);
            ctx.set(x, y, color, bg, to_cp437(glyph));
        }
        for npc in view.npcs {
            if let Some((x, y)) = to_screen(view.camera, npc.pos) {
                let color = if npc.trainer {
                    self.palette.trainer
                } else {
                    self.palette.npc
                };
                ctx.set(x, y, color, bg, to_cp437('&'));
            }
        }
        if let Some((x, y)) = to_screen(view.camera, view.player.pos) {
            ctx.set(x, y, self.palette.player, bg, to_cp437('@'));
        }
        for (i, line) in hud_lines(view.player).iter().enumerate() {
            ctx.print_color(HUD_X, 1 + i as i32, self.palette.text, bg, line);
        }
        if let Some(text) = view.dialogue {
            ctx.draw_box(0, DIALOGUE_Y, SCREEN_W - 1, 6, self.palette.text, bg);
            for (i, line) in wrap(text, (SCREEN_W - 4) as usize).iter().enumerate() {
                ctx.print_color(2, DIALOGUE_Y + 2 + i as i32, self.palette.text, bg, line);
            }
        }
    }

    /// Draws both combatants, the message line and the command menu.
    pub fn draw_battle(&self, ctx: &mut BTerm, session: &BattleSession) {
        ctx.cls();
        let bg = self.palette.background;
        self.draw_combatant(ctx, 44, 2, &session.enemy);
        self.draw_combatant(ctx, 4, 9, &session.player);
        if session.trainer {
            ctx.print_color(44, 1, self.palette.trainer, bg, "Trainer battle");
        }

        ctx.draw_box(0, DIALOGUE_Y, SCREEN_W - 1, 6, self.palette.text, bg);
        ctx.print_color(2, DIALOGUE_Y + 2, self.palette.text, bg, &session.message);
        let menu = if session.accepts_input() {
            menu_line()
        } else {
            String::new()
        };
        ctx.print_color(2, DIALOGUE_Y + 4, self.palette.text, bg, menu);
    }

    fn draw_combatant(&self, ctx: &mut BTerm, x: i32, y: i32, who: &Combatant) {
        let bg = self.palette.background;
        let (r, g, b) = hp_color(who.hp, who.max_hp);
        ctx.print_color(x, y, self.palette.text, bg, format!("{}  Lv.{}", who.name, who.level));
        ctx.print_color(x, y + 1, RGB::from_u8(r, g, b), bg, hp_bar_string(who.hp, who.max_hp));
        ctx.print_color(x, y + 2, self.palette.text, bg, format!("{} / {}", who.hp, who.max_hp));
    }
}

fn to_screen(camera: Point, pos: Point) -> Option<(i32, i32)> {
    let x = pos.x - camera.x;
    let y = pos.y - camera.y;
    if (0..VIEW_COLS).contains(&x) && (0..VIEW_ROWS).contains(&y) {
        Some((x, y))
    } else {
        None
    }
}

fn hp_ratio(hp: i32, max: i32) -> f32 {
    if max <= 0 {
        return 0.0;
    }
    (hp as f32 / max as f32).clamp(0.0, 1.0)
}

/// Green above half, yellow above a fifth, red below.
pub fn hp_color(hp: i32, max: i32) -> (u8, u8, u8) {
    let ratio = hp_ratio(hp, max);
    if ratio > 0.5 {
        (67, 196, 76)
    } else if ratio > 0.2 {
        (240, 190, 70)
    } else {
        (225, 79, 79)
    }
}

pub fn hp_bar_string(hp: i32, max: i32) -> String {
    let filled = (hp_ratio(hp, max) * BAR_WIDTH as f32).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn hud_lines(player: &Player) -> Vec<String> {
    vec![
        format!(
            "{} Lv.{}  HP {}/{}",
            PLAYER_MONSTER, player.level, player.hp, player.max_hp
        ),
        format!("XP: {}    Badges: {}", player.exp, player.badges),
        GOAL_TEXT.to_string(),
    ]
}

pub fn menu_line() -> String {
    format!(
        "[1] {}   [2] {}   [3] Heal   [4] Run",
        MOVES[0].name, MOVES[1].name
    )
}

/// Greedy word wrap for the dialogue box.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hp_bar_format() {
        assert_eq!(hp_bar_string(10, 20), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
        assert_eq!(hp_bar_string(0, 20), format!("[{}]", "-".repeat(20)));
        assert_eq!(hp_bar_string(34, 34), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn hp_bar_handles_zero_max() {
        assert_eq!(hp_bar_string(5, 0), format!("[{}]", "-".repeat(20)));
    }

    #[test]
    fn hp_color_thresholds() {
        assert_eq!(hp_color(30, 34), (67, 196, 76));
        assert_eq!(hp_color(17, 34), (240, 190, 70));
        assert_eq!(hp_color(6, 34), (225, 79, 79));
    }

    #[test]
    fn hud_shows_player_stats() {
        let player = Player::default();
        let lines = hud_lines(&player);
        assert_eq!(lines[0], "Leaflit Lv.5  HP 34/34");
        assert_eq!(lines[1], "XP: 0    Badges: 0");
        assert_eq!(lines[2], "Goal: Beat Rival Ken");
    }

    #[test]
    fn menu_lists_moves() {
        let line = menu_line();
        assert!(line.contains("[1] Leaf Slash"));
        assert!(line.contains("[2] Vine Whip"));
        assert!(line.contains("[4] Run"));
    }

    #[test]
    fn screen_projection_clips_to_viewport() {
        let cam = Point::new(10, 5);
        assert_eq!(to_screen(cam, Point::new(10, 5)), Some((0, 0)));
        assert_eq!(to_screen(cam, Point::new(31, 20)), Some((21, 15)));
        assert_eq!(to_screen(cam, Point::new(32, 20)), None);
        assert_eq!(to_screen(cam, Point::new(9, 6)), None);
    }

    #[test]
    fn wrap_splits_long_text() {
        let lines = wrap("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn colorblind_palette_differs() {
        let normal = ColorPalette::default();
        let cb = ColorPalette::colorblind();
        assert_ne!(normal.tall_grass, cb.tall_grass);
    }

    #[test]
    fn every_tile_has_a_glyph() {
        let r = Renderer::default();
        let (g1, _) = r.tile_style(TileKind::Tree);
        let (g2, _) = r.tile_style(TileKind::Water);
        assert_ne!(g1, g2);
    }
}
