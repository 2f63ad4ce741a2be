#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    Pending,
    InProgress,
    Finished,
}

/// `tile_num == -1` is the sentinel meaning "no more work; exit".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTile {
    pub begin: (u32, u32),
    pub end: (u32, u32),
    pub tile_num: i64,
    pub state: TileState,
}

impl RenderTile {
    pub const NO_MORE_WORK: i64 = -1;

    pub fn new(begin: (u32, u32), end: (u32, u32), tile_num: i64) -> Self {
        Self {
            begin,
            end,
            tile_num,
            state: TileState::Pending,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.tile_num == Self::NO_MORE_WORK
    }

    pub fn width(&self) -> u32 {
        self.end.0.saturating_sub(self.begin.0)
    }

    pub fn height(&self) -> u32 {
        self.end.1.saturating_sub(self.begin.1)
    }

    /// Splits a full image into a row-major grid of fixed-size tiles,
    /// assigning monotonically increasing `tile_num`s.
    pub fn tile_grid(image_width: u32, image_height: u32, tile_size: u32) -> Vec<RenderTile> {
        let mut tiles = Vec::new();
        let mut num = 0i64;
        let mut y = 0;
        while y < image_height {
            let mut x = 0;
            while x < image_width {
                let end_x = (x + tile_size).min(image_width);
                let end_y = (y + tile_size).min(image_height);
                tiles.push(RenderTile::new((x, y), (end_x, end_y), num));
                num += 1;
                x += tile_size;
            }
            y += tile_size;
        }
        tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_grid_covers_image_exactly_once() {
        let tiles = RenderTile::tile_grid(10, 7, 4);
        let mut covered = vec![false; 10 * 7];
        for tile in &tiles {
            for y in tile.begin.1..tile.end.1 {
                for x in tile.begin.0..tile.end.0 {
                    let idx = (y * 10 + x) as usize;
                    assert!(!covered[idx], "pixel ({x},{y}) covered twice");
                    covered[idx] = true;
                }
            }
        }
        assert!(covered.into_iter().all(|c| c));
    }

    #[test]
    fn sentinel_has_negative_tile_num() {
        let t = RenderTile::new((0, 0), (0, 0), RenderTile::NO_MORE_WORK);
        assert!(t.is_sentinel());
    }
}
