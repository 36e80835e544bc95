//! Map generation utilities.
use common::Point;

/// Width of the overworld in tiles.
pub const MAP_WIDTH: u32 = 48;
/// Height of the overworld in tiles.
pub const MAP_HEIGHT: u32 = 36;

/// Kind of a tile on the game map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    /// Default walkable ground.
    Grass,
    /// Walkable road.
    Path,
    /// Blocking forest tile.
    Tree,
    /// Walkable tile where wild monsters hide.
    TallGrass,
    /// Blocking water.
    Water,
    /// Blocking building wall.
    House,
}

impl TileKind {
    /// Whether actors are stopped by this tile.
    pub fn blocks(self) -> bool {
        matches!(self, TileKind::Tree | TileKind::Water | TileKind::House)
    }
}

/// Simple map representation.
#[derive(Clone, Debug)]
pub struct Map {
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<TileKind>,
}

impl Map {
    /// Creates a new map filled with [`TileKind::Grass`].
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileKind::Grass; (width * height) as usize],
        }
    }

    /// Returns tile index from coordinates.
    pub fn idx(&self, pt: Point) -> usize {
        (pt.y as usize) * self.width as usize + pt.x as usize
    }

    /// Returns `true` when `pt` lies inside the map.
    pub fn in_bounds(&self, pt: Point) -> bool {
        pt.x >= 0 && pt.y >= 0 && pt.x < self.width as i32 && pt.y < self.height as i32
    }

    /// Tile at `pt`, or `None` outside the map.
    pub fn tile_at(&self, pt: Point) -> Option<TileKind> {
        if self.in_bounds(pt) {
            Some(self.tiles[self.idx(pt)])
        } else {
            None
        }
    }

    /// Out-of-bounds coordinates count as blocking.
    pub fn is_blocking(&self, pt: Point) -> bool {
        self.tile_at(pt).map_or(true, TileKind::blocks)
    }

    /// Only tall grass can start an encounter.
    pub fn is_encounter_tile(&self, pt: Point) -> bool {
        self.tile_at(pt) == Some(TileKind::TallGrass)
    }

    fn set(&mut self, x: i32, y: i32, tile: TileKind) {
        let pt = Point::new(x, y);
        if self.in_bounds(pt) {
            let idx = self.idx(pt);
            self.tiles[idx] = tile;
        }
    }

    /// Fills a rectangle, clipped to the interior so the border survives.
    fn fill_rect(&mut self, x0: i32, y0: i32, w: i32, h: i32, tile: TileKind) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                if x > 0 && y > 0 && x < self.width as i32 - 1 && y < self.height as i32 - 1 {
                    self.set(x, y, tile);
                }
            }
        }
    }
}

/// Builds the fixed starting town.
pub fn generate() -> Map {
    let mut map = Map::new(MAP_WIDTH, MAP_HEIGHT);
    let w = MAP_WIDTH as i32;
    let h = MAP_HEIGHT as i32;

    for x in 0..w {
        map.set(x, 0, TileKind::Tree);
        map.set(x, h - 1, TileKind::Tree);
    }
    for y in 0..h {
        map.set(0, y, TileKind::Tree);
        map.set(w - 1, y, TileKind::Tree);
    }

    // forest belt
    for x in (2..w - 2).step_by(2) {
        map.set(x, 4, TileKind::Tree);
        if x % 3 != 0 {
            map.set(x, 5, TileKind::Tree);
        }
        map.set(x, h - 5, TileKind::Tree);
    }

    for x in 2..w - 2 {
        map.set(x, 10, TileKind::Path);
    }
    for y in 8..h - 2 {
        map.set(8, y, TileKind::Path);
    }
    for y in 4..h - 6 {
        map.set(22, y, TileKind::Path);
    }
    for x in 8..23 {
        map.set(x, 20, TileKind::Path);
    }
    for x in 22..w - 6 {
        map.set(x, 14, TileKind::Path);
    }

    map.fill_rect(12, 6, 7, 6, TileKind::TallGrass);
    map.fill_rect(26, 9, 10, 6, TileKind::TallGrass);
    map.fill_rect(14, 22, 11, 7, TileKind::TallGrass);
    map.fill_rect(31, 19, 11, 9, TileKind::TallGrass);

    map.fill_rect(35, 4, 8, 5, TileKind::Water);

    map.fill_rect(4, 14, 4, 3, TileKind::House);
    map.fill_rect(18, 15, 4, 3, TileKind::House);
    map.fill_rect(24, 24, 4, 3, TileKind::House);

    // doors
    for (x, y) in [(5, 16), (5, 17), (19, 17), (25, 26)] {
        map.set(x, y, TileKind::Path);
    }

    map
}
