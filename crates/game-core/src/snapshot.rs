use super::*;
use ui::{OverworldView, VIEW_COLS, VIEW_ROWS};

/// Which screen is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeView {
    Overworld,
    Battle,
}

/// Read-only view of one frame handed to the renderer.
pub struct Snapshot<'a> {
    pub mode: ModeView,
    /// Top-left map cell of the viewport.
    pub camera: Point,
    /// Viewport tiles, row-major, `VIEW_COLS * VIEW_ROWS` long.
    pub tiles: Vec<TileKind>,
    pub npcs: &'a [Npc],
    pub player: &'a Player,
    pub dialogue: Option<&'a str>,
    pub battle: Option<&'a BattleSession>,
}

impl Snapshot<'_> {
    pub fn overworld_view(&self) -> OverworldView<'_> {
        OverworldView {
            camera: self.camera,
            tiles: &self.tiles,
            npcs: self.npcs,
            player: self.player,
            dialogue: self.dialogue,
        }
    }
}

impl PocketQuestGame {
    /// Player-centered camera clamped to the map.
    pub fn camera(&self) -> Point {
        let x = (self.player.pos.x - VIEW_COLS / 2).clamp(0, self.map.width as i32 - VIEW_COLS);
        let y = (self.player.pos.y - VIEW_ROWS / 2).clamp(0, self.map.height as i32 - VIEW_ROWS);
        Point::new(x, y)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let camera = self.camera();
        let mut tiles = Vec::with_capacity((VIEW_COLS * VIEW_ROWS) as usize);
        for vy in 0..VIEW_ROWS {
            for vx in 0..VIEW_COLS {
                let pt = camera.offset(Point::new(vx, vy));
                tiles.push(self.map.tile_at(pt).unwrap_or(TileKind::Tree));
            }
        }
        let (mode, battle) = match &self.mode {
            GameMode::Overworld => (ModeView::Overworld, None),
            GameMode::Battle(session) => (ModeView::Battle, Some(session)),
        };
        Snapshot {
            mode,
            camera,
            tiles,
            npcs: &self.npcs,
            player: &self.player,
            dialogue: self.dialogue.visible(),
            battle,
        }
    }
}
