use alloc::{string::String, vec::Vec};
use core::{fmt, ops::Deref};

/// A token produced by the scanner.
///
/// `text` is the visible content between two split points. Comments found
/// at the top level while the token was being built are collected in
/// `comments`, one entry per comment, without their markers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// Visible token text.
    pub text: String,
    /// Comment bodies attached to this token, in order of appearance.
    pub comments: Vec<String>,
}

impl Token {
    /// Creates a token without comments.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            comments: Vec::new(),
        }
    }

    /// Returns the visible text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the token, returning its text and dropping any comments.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Appends comment text; starts a new fragment when `is_new_series` is set
    /// or when no fragment exists yet.
    pub(crate) fn push_comment(&mut self, s: &str, is_new_series: bool) {
        match self.comments.last_mut() {
            Some(last) if !is_new_series => last.push_str(s),
            _ => self.comments.push(String::from(s)),
        }
    }
}

impl Deref for Token {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.text.fmt(f)
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Token {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl PartialEq<String> for Token {
    fn eq(&self, other: &String) -> bool {
        &self.text == other
    }
}
