//! Per-round tally

/// What one round amounted to, handed to the record store when the round
/// ends.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameResult {
    pub score: u32,
    /// Tiles placed on the field.
    pub tiles: u32,
    /// Tiles nudged to a neighboring cell.
    pub moved: u32,
    /// Tiles flipped in place.
    pub turned: u32,
    /// The round's time limit, for the per-tile pace.
    pub limit_time: f64,
}

impl GameResult {
    /// Seconds per placed tile. A round with no tiles counts as one so
    /// the pace stays finite.
    pub fn put_time(&self) -> f64 {
        self.limit_time / self.tiles.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_time_pace() {
        let result = GameResult {
            tiles: 12,
            limit_time: 60.0,
            ..Default::default()
        };
        assert_eq!(result.put_time(), 5.0);
    }

    #[test]
    fn test_put_time_with_no_tiles() {
        let result = GameResult {
            limit_time: 60.0,
            ..Default::default()
        };
        assert_eq!(result.put_time(), 60.0);
    }
}
