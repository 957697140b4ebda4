use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use itertools::Itertools;
use std::{collections::HashMap, ops::Not, ops::RangeInclusive};

use crate::{config::RawKeys, error::ConfigError, system::command::Command};

const LETTER_KEYS: RangeInclusive<char> = 'a'..='z';
const DIGIT_KEYS: RangeInclusive<char> = '0'..='9';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    /// `C-c` quits no matter how the rest of the map is configured.
    pub const INTERRUPT: Self = Self {
        code: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
    };

    fn plain_char_in(&self, range: &RangeInclusive<char>) -> bool {
        matches!(self.code, KeyCode::Char(c) if range.contains(&c)) && self.modifiers.is_empty()
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event
                .modifiers
                .intersection(KeyModifiers::not(KeyModifiers::SHIFT)),
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code_str = match self.code {
            KeyCode::Enter => "enter".to_string(),
            KeyCode::Esc => "esc".to_string(),
            KeyCode::Tab => "tab".to_string(),
            KeyCode::Backspace => "bksp".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::F(n) => format!("f{n}"),
            KeyCode::Char(' ') => "space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            _ => "?".to_string(),
        };

        let alt_str = if self.modifiers.contains(KeyModifiers::ALT) {
            "A-"
        } else {
            ""
        };

        let ctrl_str = if self.modifiers.contains(KeyModifiers::CONTROL) {
            "C-"
        } else {
            ""
        };

        write!(f, "{ctrl_str}{alt_str}{code_str}")
    }
}

impl TryFrom<&str> for Key {
    type Error = ConfigError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        // a trailing `-` is the minus key itself, as in "-" or "C--"
        let (key_str, modifier_str) = match s.strip_suffix('-') {
            Some("") => ("-", ""),
            Some(prefix) if prefix.ends_with('-') => ("-", &prefix[..prefix.len() - 1]),
            _ => s
                .rsplit_once('-')
                .map_or((s, ""), |(modifier_str, key_str)| (key_str, modifier_str)),
        };
        let mut modifiers = KeyModifiers::empty();

        for part in modifier_str.split('-').filter(|_| !modifier_str.is_empty()) {
            match part {
                "C" | "c" => modifiers.extend(KeyModifiers::CONTROL),
                "A" | "a" => modifiers.extend(KeyModifiers::ALT),
                _ => return Err(ConfigError::UnknownKey(s.to_string())),
            }
        }

        let code = match key_str {
            "enter" | "Enter" | "return" | "Return" => KeyCode::Enter,
            "esc" | "Esc" => KeyCode::Esc,
            "up" | "Up" => KeyCode::Up,
            "down" | "Down" => KeyCode::Down,
            "left" | "Left" => KeyCode::Left,
            "right" | "Right" => KeyCode::Right,
            "space" | "Space" => KeyCode::Char(' '),
            "bksp" | "backspace" | "Backspace" => KeyCode::Backspace,
            "tab" | "Tab" => KeyCode::Tab,
            f if f.len() > 1 && (f.starts_with('f') || f.starts_with('F')) => f[1..]
                .parse::<u8>()
                .ok()
                .filter(|n| (1..=12).contains(n))
                .map(KeyCode::F)
                .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))?,

            // just assume that any string of one char should refer to that character
            c if c.chars().count() == 1 => c
                .chars()
                .next()
                .map(KeyCode::Char)
                .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))?,
            _ => return Err(ConfigError::UnknownKey(s.to_string())),
        };

        Ok(Self { code, modifiers })
    }
}

/// A flat table from keys to the command they fire. Many keys may map to the
/// same command, and every trigger key maps to the same `Command::Trigger`.
#[derive(Debug, Clone)]
pub struct KeyMap {
    map: HashMap<Key, Command>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let trigger_keys = [KeyCode::Char(' '), KeyCode::Enter]
            .into_iter()
            .chain(LETTER_KEYS.map(KeyCode::Char))
            .chain(DIGIT_KEYS.map(KeyCode::Char))
            .map(|code| (Key::from(code), Command::Trigger));

        let quit_keys = [(Key::from(KeyCode::Esc), Command::Quit)];

        Self {
            map: trigger_keys.chain(quit_keys).collect(),
        }
    }
}

impl TryFrom<&RawKeys> for KeyMap {
    type Error = ConfigError;

    fn try_from(keys: &RawKeys) -> Result<Self, Self::Error> {
        let mut key_map = Self::default();

        if let Some(quit_str) = &keys.quit {
            let key = Key::try_from(quit_str.as_str())?;
            key_map.map.retain(|_, cmd| *cmd != Command::Quit);
            key_map.bind(key, Command::Quit)?;
        }

        for trigger_str in &keys.trigger {
            let key = Key::try_from(trigger_str.as_str())?;
            key_map.bind(key, Command::Trigger)?;
        }

        Ok(key_map)
    }
}

impl KeyMap {
    fn bind(&mut self, key: Key, command: Command) -> Result<(), ConfigError> {
        if key == Key::INTERRUPT {
            return Err(ConfigError::ReservedKey(key.to_string()));
        }

        match self.map.get(&key) {
            Some(existing) if *existing != command => Err(ConfigError::ConflictingBinding {
                key: key.to_string(),
                first: existing.to_string(),
                second: command.to_string(),
            }),
            _ => {
                self.map.insert(key, command);
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn command_for_key(&self, key: Key) -> Option<Command> {
        if key == Key::INTERRUPT {
            return Some(Command::Quit);
        }
        self.map.get(&key).copied()
    }

    /// Builds a short description of the keys bound to `command`, collapsing
    /// complete letter and digit runs into `a-z` and `0-9`.
    /// Used for displaying key hints in the status bar.
    #[must_use]
    pub fn key_hint(&self, command: Command) -> String {
        let keys: Vec<Key> = self
            .map
            .iter()
            .filter_map(|(key, cmd)| (*cmd == command).then_some(*key))
            .collect();

        let covers = |range: &RangeInclusive<char>| {
            range
                .clone()
                .all(|c| keys.contains(&Key::from(KeyCode::Char(c))))
        };
        let letters = covers(&LETTER_KEYS);
        let digits = covers(&DIGIT_KEYS);

        let mut parts: Vec<String> = keys
            .iter()
            .filter(|key| !(letters && key.plain_char_in(&LETTER_KEYS)))
            .filter(|key| !(digits && key.plain_char_in(&DIGIT_KEYS)))
            .map(ToString::to_string)
            .sorted()
            .collect();

        if letters {
            parts.push("a-z".to_string());
        }
        if digits {
            parts.push("0-9".to_string());
        }

        if parts.is_empty() {
            "?".to_string()
        } else {
            parts.join("/")
        }
    }
}
