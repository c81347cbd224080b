//! Key binds: physical key code -> named bind -> abstract action
//!
//! The host engine reports SDL-style key codes. A code resolves to a
//! [`Bind`] through a fixed table; the bind resolves to an [`Action`]
//! through the `[binds]` table of the config file.

use std::collections::HashMap;

use crate::config::ConfigError;

/// A named physical key that can carry an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bind {
    Escape,
    Enter,
    Space,
    Tab,
    Backquote,
    A,
    D,
    Q,
    S,
    W,
    X,
    Z,
    F1,
    Up,
    Down,
    Left,
    Right,
}

/// (key code, bind, config name)
const KEY_TABLE: &[(i32, Bind, &str)] = &[
    (27, Bind::Escape, "ESCAPE"),
    (13, Bind::Enter, "ENTER"),
    (32, Bind::Space, "SPACE"),
    (9, Bind::Tab, "TAB"),
    (96, Bind::Backquote, "BACKQUOTE"),
    (97, Bind::A, "A"),
    (100, Bind::D, "D"),
    (113, Bind::Q, "Q"),
    (115, Bind::S, "S"),
    (119, Bind::W, "W"),
    (120, Bind::X, "X"),
    (122, Bind::Z, "Z"),
    (0x4000_003A, Bind::F1, "F1"),
    (0x4000_004F, Bind::Right, "RIGHT"),
    (0x4000_0050, Bind::Left, "LEFT"),
    (0x4000_0051, Bind::Down, "DOWN"),
    (0x4000_0052, Bind::Up, "UP"),
];

/// Resolve an engine key code to a bind
pub fn bind_for_keycode(keycode: i32) -> Option<Bind> {
    KEY_TABLE
        .iter()
        .find(|(code, _, _)| *code == keycode)
        .map(|(_, bind, _)| *bind)
}

impl Bind {
    /// Parse a config key name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        KEY_TABLE
            .iter()
            .find(|(_, _, n)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(_, bind, _)| *bind)
    }

    /// Key code the engine reports for this bind
    pub fn keycode(&self) -> i32 {
        KEY_TABLE
            .iter()
            .find(|(_, bind, _)| bind == self)
            .map(|(code, _, _)| *code)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        KEY_TABLE
            .iter()
            .find(|(_, bind, _)| bind == self)
            .map(|(_, _, name)| *name)
            .unwrap_or("?")
    }
}

/// Abstract actions the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    #[default]
    None,
    Quit,
    Up,
    Down,
    Left,
    Right,
    Action,
    Debug,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::None => "NONE",
            Action::Quit => "QUIT",
            Action::Up => "UP",
            Action::Down => "DOWN",
            Action::Left => "LEFT",
            Action::Right => "RIGHT",
            Action::Action => "ACTION",
            Action::Debug => "DEBUG",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "NONE" => Some(Action::None),
            "QUIT" => Some(Action::Quit),
            "UP" => Some(Action::Up),
            "DOWN" => Some(Action::Down),
            "LEFT" => Some(Action::Left),
            "RIGHT" => Some(Action::Right),
            "ACTION" => Some(Action::Action),
            "DEBUG" => Some(Action::Debug),
            _ => None,
        }
    }
}

/// Bind -> action table loaded from config
#[derive(Debug, Clone, Default)]
pub struct ActionBinds {
    bind_actions: HashMap<Bind, Action>,
}

impl ActionBinds {
    /// Build the table from `[binds]` entries (`KEY = "ACTION"`)
    ///
    /// Unknown key names or action names are configuration errors.
    pub fn from_table(table: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut bind_actions = HashMap::with_capacity(table.len());
        for (key, action) in table {
            let bind = Bind::from_name(key)
                .ok_or_else(|| ConfigError::UnknownKey(key.clone()))?;
            let action = Action::from_name(action)
                .ok_or_else(|| ConfigError::UnknownAction(action.clone()))?;
            bind_actions.insert(bind, action);
        }
        log::debug!("Loaded {} action binds", bind_actions.len());
        Ok(Self { bind_actions })
    }

    /// Action for a bind, `Action::None` when unbound
    pub fn action_for(&self, bind: Bind) -> Action {
        self.bind_actions.get(&bind).copied().unwrap_or_default()
    }

    /// First bind carrying `action` (used by scripted input)
    pub fn bind_for_action(&self, action: Action) -> Option<Bind> {
        let mut binds: Vec<Bind> = self
            .bind_actions
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(b, _)| *b)
            .collect();
        binds.sort_by_key(|b| b.keycode());
        binds.first().copied()
    }

    pub fn len(&self) -> usize {
        self.bind_actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bind_actions.is_empty()
    }
}
