//! Global-hotkey binding value object

use std::fmt;

/// Modifier mask bits for a binding
pub mod modifiers {
    pub const COMMAND: u32 = 1 << 0;
    pub const OPTION: u32 = 1 << 1;
    pub const CONTROL: u32 = 1 << 2;
    pub const SHIFT: u32 = 1 << 3;

    pub const ALL: u32 = COMMAND | OPTION | CONTROL | SHIFT;
}

/// Virtual key code for 'V', the default shortcut key
pub const KEY_CODE_V: u32 = 9;

/// Key codes that are themselves modifier keys (caps lock, shift,
/// control, option, command and their right-hand variants, fn).
/// A capture must resolve to a non-modifier key.
pub fn is_modifier_key_code(key_code: u32) -> bool {
    (54..=63).contains(&key_code)
}

/// A (key code, modifier mask) pair identifying a global hotkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyBinding {
    pub key_code: u32,
    pub modifiers: u32,
}

impl HotkeyBinding {
    /// Create a binding; the modifier mask is normalized to known bits
    pub fn new(key_code: u32, modifier_mask: u32) -> Self {
        Self {
            key_code,
            modifiers: modifier_mask & modifiers::ALL,
        }
    }

    /// Whether the mask includes at least one accepted modifier
    pub fn has_required_modifier(&self) -> bool {
        self.modifiers & modifiers::ALL != 0
    }

    /// Human-readable description, e.g. "cmd+shift+V"
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.modifiers & modifiers::CONTROL != 0 {
            parts.push("ctrl".to_string());
        }
        if self.modifiers & modifiers::OPTION != 0 {
            parts.push("alt".to_string());
        }
        if self.modifiers & modifiers::SHIFT != 0 {
            parts.push("shift".to_string());
        }
        if self.modifiers & modifiers::COMMAND != 0 {
            parts.push("cmd".to_string());
        }
        parts.push(key_name(self.key_code));
        parts.join("+")
    }
}

impl Default for HotkeyBinding {
    /// cmd+shift+V, the shipped default shortcut
    fn default() -> Self {
        Self::new(KEY_CODE_V, modifiers::COMMAND | modifiers::SHIFT)
    }
}

impl fmt::Display for HotkeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Display name for a virtual key code
fn key_name(key_code: u32) -> String {
    let known = match key_code {
        0 => "A",
        1 => "S",
        2 => "D",
        3 => "F",
        4 => "H",
        5 => "G",
        6 => "Z",
        7 => "X",
        8 => "C",
        9 => "V",
        11 => "B",
        12 => "Q",
        13 => "W",
        14 => "E",
        15 => "R",
        16 => "Y",
        17 => "T",
        31 => "O",
        32 => "U",
        34 => "I",
        35 => "P",
        37 => "L",
        38 => "J",
        40 => "K",
        45 => "N",
        46 => "M",
        36 => "Return",
        48 => "Tab",
        49 => "Space",
        53 => "Escape",
        _ => return format!("key-{}", key_code),
    };
    known.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binding_is_cmd_shift_v() {
        let binding = HotkeyBinding::default();
        assert_eq!(binding.key_code, KEY_CODE_V);
        assert_eq!(binding.modifiers, modifiers::COMMAND | modifiers::SHIFT);
    }

    #[test]
    fn new_normalizes_unknown_mask_bits() {
        let binding = HotkeyBinding::new(9, modifiers::COMMAND | 0xFF00);
        assert_eq!(binding.modifiers, modifiers::COMMAND);
    }

    #[test]
    fn modifier_key_codes_are_recognized() {
        for code in 54..=63 {
            assert!(is_modifier_key_code(code));
        }
        assert!(!is_modifier_key_code(9));
    }

    #[test]
    fn describe_orders_modifiers() {
        let binding = HotkeyBinding::new(KEY_CODE_V, modifiers::COMMAND | modifiers::SHIFT);
        assert_eq!(binding.describe(), "shift+cmd+V");
    }

    #[test]
    fn describe_unknown_key_code() {
        let binding = HotkeyBinding::new(200, modifiers::CONTROL);
        assert_eq!(binding.describe(), "ctrl+key-200");
    }
}
