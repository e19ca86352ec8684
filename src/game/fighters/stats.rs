// Fighter stats - both players share the same numbers

/// Fixed fighter tuning, identical for both players
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FighterStats {
    /// Starting (and maximum) health
    pub max_health: u32,
    /// Pixels moved per advance command
    pub move_speed: f32,
    /// Ticks each animation frame stays on screen
    pub animation_speed: u32,
    /// Health lost per projectile hit
    pub hit_damage: u32,
}

/// The stats every fighter uses
pub const BASE_STATS: FighterStats = FighterStats {
    max_health: 100,
    move_speed: 5.0,
    animation_speed: 15,
    hit_damage: 5,
};

impl Default for FighterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = FighterStats::default();
        assert_eq!(stats.max_health, 100);
        assert_eq!(stats.move_speed, 5.0);
        assert_eq!(stats.animation_speed, 15);
        assert_eq!(stats.hit_damage, 5);
    }

    #[test]
    fn test_twenty_hits_empty_the_health_bar() {
        assert_eq!(BASE_STATS.max_health / BASE_STATS.hit_damage, 20);
    }
}
