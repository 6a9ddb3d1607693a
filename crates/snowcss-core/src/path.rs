//! Token paths.
//!
//! A [`Path`] addresses a token in the nested token table. It is written as a
//! dot-delimited string (`colors.gray.50`) where a dot between two digits is a
//! decimal point rather than a separator (`size.0.5` has two segments).

use std::fmt;
use std::str::FromStr;

use crate::utils::escape_css_var_name;

/// An immutable, ordered sequence of path segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Create a path from already split segments.
    pub fn new<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a dot-separated path, preserving decimal numbers like `0.5`.
    ///
    /// Segments are trimmed. A dangling empty segment at the very end of the
    /// input is dropped, empty segments elsewhere are kept.
    ///
    /// ```
    /// use snowcss_core::path::Path;
    ///
    /// assert_eq!(Path::from_dot_path("size.0.5").segments(), ["size", "0.5"]);
    /// assert_eq!(Path::from_dot_path("a.b.c").segments(), ["a", "b", "c"]);
    /// ```
    pub fn from_dot_path(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let mut segments = Vec::new();
        let mut current = String::new();

        for (idx, &ch) in chars.iter().enumerate() {
            if ch != '.' {
                current.push(ch);
                continue;
            }

            let prev = idx.checked_sub(1).and_then(|i| chars.get(i));
            let next = chars.get(idx + 1);

            if is_digit(prev) && is_digit(next) {
                current.push(ch);
            } else {
                segments.push(current.trim().to_string());
                current.clear();
            }
        }

        let last = current.trim();
        if !last.is_empty() {
            segments.push(last.to_string());
        }

        Self { segments }
    }

    /// The path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Return a new path with `prefix` as its first segment.
    pub fn with_prefix(&self, prefix: &str) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.push(prefix.to_string());
        segments.extend(self.segments.iter().cloned());
        Self { segments }
    }

    /// Serialize into a dot-separated string.
    pub fn to_dot_path(&self) -> String {
        self.segments.join(".")
    }

    /// Serialize into a CSS custom property name, e.g. `--colors-primary`.
    pub fn to_css_var(&self) -> String {
        let escaped: Vec<String> = self
            .segments
            .iter()
            .map(|segment| escape_css_var_name(segment))
            .collect();
        format!("--{}", escaped.join("-"))
    }

    /// Serialize into a CSS variable reference, e.g. `var(--colors-primary)`.
    pub fn to_css_var_ref(&self) -> String {
        format!("var({})", self.to_css_var())
    }
}

fn is_digit(ch: Option<&char>) -> bool {
    ch.is_some_and(|c| c.is_ascii_digit())
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dot_path())
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_dot_path(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self::from_dot_path(s)
    }
}
