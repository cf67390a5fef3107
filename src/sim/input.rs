//! Per-tick input snapshot
//!
//! Produced by whatever adapter captures keys and pointer events; the simulation
//! only ever sees this immutable value.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Named keys the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Weapon1,
    Weapon2,
    Weapon3,
    Build,
}

impl Key {
    pub const ALL: [Key; 8] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Weapon1,
        Key::Weapon2,
        Key::Weapon3,
        Key::Build,
    ];

    /// Map a lowercase key name (as reported by a browser or windowing layer)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "w" | "arrowup" => Some(Key::Up),
            "s" | "arrowdown" => Some(Key::Down),
            "a" | "arrowleft" => Some(Key::Left),
            "d" | "arrowright" => Some(Key::Right),
            "1" => Some(Key::Weapon1),
            "2" => Some(Key::Weapon2),
            "3" => Some(Key::Weapon3),
            "shift" => Some(Key::Build),
            _ => None,
        }
    }

    #[inline]
    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Set of currently held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet(u16);

impl KeySet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn press(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(move |k| self.is_pressed(*k))
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut set = KeySet::new();
        for key in iter {
            set.press(key);
        }
        set
    }
}

/// Input captured once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Held keys
    pub keys: KeySet,
    /// Pointer position in render (screen) space
    pub pointer: Vec2,
    /// Fire control held
    pub fire: bool,
    /// External start signal (e.g. a click on the title screen)
    pub start: bool,
}

impl InputSnapshot {
    /// Unit movement intent from the direction keys (zero when none or cancelled)
    pub fn move_dir(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.keys.is_pressed(Key::Up) {
            v.y -= 1.0;
        }
        if self.keys.is_pressed(Key::Down) {
            v.y += 1.0;
        }
        if self.keys.is_pressed(Key::Left) {
            v.x -= 1.0;
        }
        if self.keys.is_pressed(Key::Right) {
            v.x += 1.0;
        }
        v.normalize_or_zero()
    }

    /// Weapon slot selected this tick; with several hotkeys held the highest wins
    pub fn weapon_select(&self) -> Option<usize> {
        [Key::Weapon1, Key::Weapon2, Key::Weapon3]
            .iter()
            .enumerate()
            .filter(|(_, k)| self.keys.is_pressed(**k))
            .map(|(i, _)| i)
            .last()
    }

    pub fn build(&self) -> bool {
        self.keys.is_pressed(Key::Build)
    }
}
