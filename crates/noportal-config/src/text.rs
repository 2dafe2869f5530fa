//! Legacy formatting-code text
//!
//! Messages are written with Minecraft's legacy formatting codes, using `&`
//! as the marker: `&c` switches to red, `&l` turns on bold, `&r` resets.
//! A colour code also clears any active styles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The sixteen legacy chat colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl TextColor {
    const CODES: [(char, TextColor); 16] = [
        ('0', TextColor::Black),
        ('1', TextColor::DarkBlue),
        ('2', TextColor::DarkGreen),
        ('3', TextColor::DarkAqua),
        ('4', TextColor::DarkRed),
        ('5', TextColor::DarkPurple),
        ('6', TextColor::Gold),
        ('7', TextColor::Gray),
        ('8', TextColor::DarkGray),
        ('9', TextColor::Blue),
        ('a', TextColor::Green),
        ('b', TextColor::Aqua),
        ('c', TextColor::Red),
        ('d', TextColor::LightPurple),
        ('e', TextColor::Yellow),
        ('f', TextColor::White),
    ];

    pub fn from_code(code: char) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        Self::CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, color)| *color)
    }

    pub fn code(&self) -> char {
        Self::CODES
            .iter()
            .find(|(_, color)| color == self)
            .map(|(c, _)| *c)
            .unwrap_or('f')
    }
}

/// Active text decorations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextStyle {
    pub obfuscated: bool,
    pub bold: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub italic: bool,
}

impl TextStyle {
    /// Turn on the decoration for a style code; false if `code` is not one
    fn apply_code(&mut self, code: char) -> bool {
        match code.to_ascii_lowercase() {
            'k' => self.obfuscated = true,
            'l' => self.bold = true,
            'm' => self.strikethrough = true,
            'n' => self.underline = true,
            'o' => self.italic = true,
            _ => return false,
        }
        true
    }

    fn codes(&self) -> impl Iterator<Item = char> {
        [
            (self.obfuscated, 'k'),
            (self.bold, 'l'),
            (self.strikethrough, 'm'),
            (self.underline, 'n'),
            (self.italic, 'o'),
        ]
        .into_iter()
        .filter_map(|(on, code)| on.then_some(code))
    }

    pub fn is_plain(&self) -> bool {
        *self == TextStyle::default()
    }
}

/// A run of text sharing one colour and style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub content: String,
    pub color: Option<TextColor>,
    pub style: TextStyle,
}

/// Parsed message text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedText {
    spans: Vec<TextSpan>,
}

impl FormattedText {
    /// The legacy formatting-code marker used in configuration files
    pub const MARKER: char = '&';

    /// Empty text
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse text written with `&` formatting codes
    pub fn parse_legacy(input: &str) -> Self {
        let mut spans = Vec::new();
        let mut color = None;
        let mut style = TextStyle::default();
        let mut content = String::new();

        let mut chars = input.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch != Self::MARKER {
                content.push(ch);
                continue;
            }

            let Some(&code) = chars.peek() else {
                content.push(ch);
                break;
            };

            let mut next_color = color;
            let mut next_style = style;
            if let Some(c) = TextColor::from_code(code) {
                next_color = Some(c);
                next_style = TextStyle::default();
            } else if code.eq_ignore_ascii_case(&'r') {
                next_color = None;
                next_style = TextStyle::default();
            } else if !next_style.apply_code(code) {
                content.push(ch);
                continue;
            }
            chars.next();

            if !content.is_empty() {
                spans.push(TextSpan {
                    content: std::mem::take(&mut content),
                    color,
                    style,
                });
            }
            color = next_color;
            style = next_style;
        }

        if !content.is_empty() {
            spans.push(TextSpan {
                content,
                color,
                style,
            });
        }

        Self { spans }
    }

    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|span| span.content.is_empty())
    }

    /// Text with all formatting removed
    pub fn plain(&self) -> String {
        self.spans.iter().map(|span| span.content.as_str()).collect()
    }

    /// Serialize back to legacy codes using `marker`
    ///
    /// Use `'&'` for configuration files and `'§'` for the wire format.
    pub fn to_legacy(&self, marker: char) -> String {
        let mut out = String::new();
        for span in &self.spans {
            match span.color {
                Some(color) => {
                    out.push(marker);
                    out.push(color.code());
                }
                None if !out.is_empty() => {
                    out.push(marker);
                    out.push('r');
                }
                None => {}
            }
            for code in span.style.codes() {
                out.push(marker);
                out.push(code);
            }
            out.push_str(&span.content);
        }
        out
    }
}

impl fmt::Display for FormattedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain())
    }
}
