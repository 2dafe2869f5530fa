//! Message table

use std::collections::HashMap;

use noportal_gate::MessageKey;

use crate::text::FormattedText;

/// Player-facing messages keyed by configuration key
///
/// Built once at startup and never modified afterwards; share it behind an
/// `Arc` when handlers run on several threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    messages: HashMap<String, FormattedText>,
}

impl MessageTable {
    /// Table with no messages; every lookup yields empty text
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from raw configuration values
    pub fn from_raw<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let messages = entries
            .into_iter()
            .map(|(key, value)| (key.into(), FormattedText::parse_legacy(value.as_ref())))
            .collect();
        Self { messages }
    }

    /// Message for `key`
    ///
    /// Falls back to the key's historical alias, then to empty text.
    pub fn message(&self, key: MessageKey) -> FormattedText {
        self.lookup(key)
            .or_else(|| key.legacy_alias().and_then(|alias| self.lookup(alias)))
            .cloned()
            .unwrap_or_default()
    }

    /// Raw lookup by configuration key, without fallbacks
    pub fn get(&self, key: &str) -> Option<&FormattedText> {
        self.messages.get(key)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn lookup(&self, key: MessageKey) -> Option<&FormattedText> {
        self.messages.get(key.as_str())
    }
}
