//! Key scripts for headless play: `"TICK:KEY,TICK:KEY,..."`.
//!
//! `KEY` is `up` or `down` (case-insensitive). Several presses may share a
//! tick; they are applied in the order written, before that tick runs.

use duck_dodge_core::Key;

#[derive(Debug, Clone, PartialEq)]
pub struct KeyScript {
    presses: Vec<(u64, Key)>,
}

impl KeyScript {
    /// Parses a script. An empty or all-whitespace string is an empty script.
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut presses = Vec::new();
        for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (tick, key) = entry
                .split_once(':')
                .ok_or_else(|| format!("key script entry `{entry}` is not TICK:KEY"))?;
            let tick: u64 = tick
                .trim()
                .parse()
                .map_err(|_| format!("invalid tick `{tick}` in key script"))?;
            let key = match key.trim().to_ascii_lowercase().as_str() {
                "up" => Key::Up,
                "down" => Key::Down,
                other => return Err(format!("unknown key `{other}` (expected up or down)")),
            };
            presses.push((tick, key));
        }
        presses.sort_by_key(|(tick, _)| *tick);
        Ok(Self { presses })
    }

    /// Keys scheduled for `tick`, in script order.
    pub fn keys_at(&self, tick: u64) -> impl Iterator<Item = Key> + '_ {
        self.presses
            .iter()
            .filter(move |(t, _)| *t == tick)
            .map(|(_, key)| *key)
    }

    pub fn len(&self) -> usize {
        self.presses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_and_groups_by_tick() {
        let script = KeyScript::parse("10:up, 10:UP,3:down").unwrap();
        assert_eq!(script.len(), 3);
        assert_eq!(script.keys_at(10).collect::<Vec<_>>(), vec![Key::Up, Key::Up]);
        assert_eq!(script.keys_at(3).collect::<Vec<_>>(), vec![Key::Down]);
        assert_eq!(script.keys_at(4).count(), 0);
    }

    #[test]
    fn empty_script_is_allowed() {
        assert_eq!(KeyScript::parse("").unwrap().len(), 0);
        assert_eq!(KeyScript::parse(" , ").unwrap().len(), 0);
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!(KeyScript::parse("10").unwrap_err().contains("TICK:KEY"));
        assert!(KeyScript::parse("x:up").unwrap_err().contains("invalid tick"));
        assert!(KeyScript::parse("5:left").unwrap_err().contains("unknown key"));
    }
}
