use crate::color::Rgb;

/// Fixed side length of the grid container, in buffer pixels.
pub const CONTAINER_DIMENSION: f64 = 300.0;
pub const DEFAULT_GRID_SIZE: u32 = 16;
pub const MIN_GRID_SIZE: u32 = 2;
pub const MAX_GRID_SIZE: u32 = 128;

/// Constants that shape the grid and the paint defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub container_dimension: f64,
    pub default_size: u32,
    pub min_size: u32,
    pub max_size: u32,
    pub default_color: Rgb,
}

impl GridConfig {
    pub fn size_in_range(&self, size: i64) -> bool {
        size >= self.min_size as i64 && size <= self.max_size as i64
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            container_dimension: CONTAINER_DIMENSION,
            default_size: DEFAULT_GRID_SIZE,
            min_size: MIN_GRID_SIZE,
            max_size: MAX_GRID_SIZE,
            default_color: Rgb::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_inclusive() {
        let config = GridConfig::default();
        assert!(!config.size_in_range(1));
        assert!(config.size_in_range(2));
        assert!(config.size_in_range(128));
        assert!(!config.size_in_range(129));
        assert!(!config.size_in_range(-16));
    }
}
