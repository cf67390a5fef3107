//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Screen-space vertex with position (pixels) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex in a packed buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Convert a 0xRRGGBB literal to linear-ish RGBA floats
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const MENU_BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const GROUND: [f32; 4] = rgb(0x3e8f2b);
    pub const POND: [f32; 4] = rgb(0x1976d2);
    pub const POND_CENTER: [f32; 4] = rgb(0x4fc3f7);
    pub const BUILDING: [f32; 4] = rgb(0x8d6e63);
    pub const BUILDING_SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.15];
    pub const WALL_WOOD: [f32; 4] = rgb(0xa1887f);
    pub const WALL_STONE: [f32; 4] = rgb(0x9e9e9e);
    pub const PICKUP_WOOD: [f32; 4] = rgb(0x795548);
    pub const PICKUP_STONE: [f32; 4] = rgb(0xbdbdbd);
    pub const PICKUP_AMMO: [f32; 4] = rgb(0xffd54f);
    pub const PLAYER: [f32; 4] = rgb(0x0d47a1);
    pub const PLAYER_HIGHLIGHT: [f32; 4] = rgb(0x4a90ff);
    pub const PLAYER_SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.3];
    pub const AIM_LINE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const PROJECTILE: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const ENEMY: [f32; 4] = rgb(0x1b5e20);
    pub const ENEMY_HIGHLIGHT: [f32; 4] = rgb(0x66bb6a);
    pub const ENEMY_SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.25];
    pub const HELMET: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
    pub const BLOOD: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgb(0x000000)[3], 1.0);
    }

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(Vertex::STRIDE, 24);
        let v = [Vertex::new(1.0, 2.0, colors::TEXT)];
        let bytes: &[u8] = bytemuck::cast_slice(&v);
        assert_eq!(bytes.len(), Vertex::STRIDE);
    }
}
