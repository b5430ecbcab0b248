//! Key name to engine key code mapping
//!
//! Provides the static table translating semantic key names used by the agent
//! into the key codes understood by the game driver.

use crate::{Error, Result};
use phf::phf_map;
use serde::Serialize;

/// Engine key codes understood by the driver
///
/// Numeric values follow the engine's `KeyCode` enumeration so the driver can
/// forward them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(i32)]
pub enum KeyCode {
    Tab = 9,
    Return = 13,
    Escape = 27,
    Space = 32,
    A = 97,
    B = 98,
    C = 99,
    D = 100,
    E = 101,
    F = 102,
    G = 103,
    H = 104,
    I = 105,
    J = 106,
    K = 107,
    L = 108,
    M = 109,
    N = 110,
    O = 111,
    P = 112,
    Q = 113,
    R = 114,
    S = 115,
    T = 116,
    U = 117,
    V = 118,
    W = 119,
    X = 120,
    Y = 121,
    Z = 122,
    UpArrow = 273,
    DownArrow = 274,
    RightArrow = 275,
    LeftArrow = 276,
    LeftShift = 304,
    LeftControl = 306,
    LeftAlt = 308,
}

/// Static key name mapping using a compile-time hash map for O(1) lookup
/// without runtime allocation
static KEY_MAP: phf::Map<&'static str, KeyCode> = phf_map! {
    "Space" => KeyCode::Space,
    "A" => KeyCode::A,
    "B" => KeyCode::B,
    "C" => KeyCode::C,
    "D" => KeyCode::D,
    "E" => KeyCode::E,
    "F" => KeyCode::F,
    "G" => KeyCode::G,
    "H" => KeyCode::H,
    "I" => KeyCode::I,
    "J" => KeyCode::J,
    "K" => KeyCode::K,
    "L" => KeyCode::L,
    "M" => KeyCode::M,
    "N" => KeyCode::N,
    "O" => KeyCode::O,
    "P" => KeyCode::P,
    "Q" => KeyCode::Q,
    "R" => KeyCode::R,
    "S" => KeyCode::S,
    "T" => KeyCode::T,
    "U" => KeyCode::U,
    "V" => KeyCode::V,
    "W" => KeyCode::W,
    "X" => KeyCode::X,
    "Y" => KeyCode::Y,
    "Z" => KeyCode::Z,
    "LeftArrow" => KeyCode::LeftArrow,
    "RightArrow" => KeyCode::RightArrow,
    "UpArrow" => KeyCode::UpArrow,
    "DownArrow" => KeyCode::DownArrow,
    "Enter" => KeyCode::Return,
    "Return" => KeyCode::Return,
    "Escape" => KeyCode::Escape,
    "Tab" => KeyCode::Tab,
    "Shift" => KeyCode::LeftShift,
    "Control" => KeyCode::LeftControl,
    "Alt" => KeyCode::LeftAlt,
};

/// Resolve a semantic key name to its engine key code
///
/// Surrounding whitespace is ignored. Unknown names fail with
/// [`Error::UnknownKey`] carrying every valid key name.
pub fn resolve_key(name: &str) -> Result<KeyCode> {
    let normalized = name.trim();

    KEY_MAP.get(normalized).copied().ok_or_else(|| {
        let available: Vec<String> = KEY_MAP.keys().map(|k| k.to_string()).collect();
        Error::unknown_key(name, available)
    })
}

/// All valid key names, for availability reporting
pub fn known_keys() -> impl Iterator<Item = &'static str> {
    KEY_MAP.keys().copied()
}
