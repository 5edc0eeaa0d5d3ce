//! Immutable markup values and a small element builder.
//!
//! Rendering rules are pure functions returning `Markup`. Nothing in here
//! escapes: callers pass text through an [`EscapePolicy`] first, so escaping
//! is decided in exactly one place.
//!
//! [`EscapePolicy`]: super::EscapePolicy

use std::fmt;

/// A finished piece of HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Markup(String);

impl Markup {
    /// Empty markup.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Wrap a string that is already markup.
    pub fn raw(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Check if this markup is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Join fragments, one per line. Empty fragments are dropped.
    pub fn lines<I: IntoIterator<Item = Markup>>(fragments: I) -> Self {
        let mut out = String::new();
        for fragment in fragments {
            if fragment.is_empty() {
                continue;
            }
            out.push_str(&fragment.0);
            out.push('\n');
        }
        Self(out)
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromIterator<Markup> for Markup {
    /// Concatenate fragments with no separator.
    fn from_iter<I: IntoIterator<Item = Markup>>(iter: I) -> Self {
        let mut out = String::new();
        for fragment in iter {
            out.push_str(&fragment.0);
        }
        Self(out)
    }
}

impl From<Markup> for String {
    fn from(markup: Markup) -> Self {
        markup.0
    }
}

/// Builder for a single HTML element.
#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, Option<String>)>,
    children: Vec<Markup>,
    block: bool,
}

impl Element {
    /// Start an element with the given tag.
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
            block: false,
        }
    }

    /// Add `name="value"`. The value is written as given.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, Some(value.into())));
        self
    }

    /// Add `name="value"` only when `value` is present.
    pub fn attr_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Add a valueless attribute such as `allowfullscreen`.
    pub fn flag(mut self, name: &'static str) -> Self {
        self.attrs.push((name, None));
        self
    }

    /// Append a child.
    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    pub fn children<I: IntoIterator<Item = Markup>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    /// Put each child on its own line between the tags.
    pub fn block(mut self) -> Self {
        self.block = true;
        self
    }

    /// Finish the element.
    pub fn build(self) -> Markup {
        let mut out = String::new();
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(value);
                out.push('"');
            }
        }
        out.push('>');

        if self.block {
            out.push('\n');
            out.push_str(Markup::lines(self.children).as_str());
        } else {
            for child in &self.children {
                out.push_str(child.as_str());
            }
        }

        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
        Markup(out)
    }
}

impl From<Element> for Markup {
    fn from(element: Element) -> Self {
        element.build()
    }
}

impl From<&str> for Markup {
    fn from(s: &str) -> Self {
        Markup::raw(s)
    }
}

impl From<String> for Markup {
    fn from(s: String) -> Self {
        Markup::raw(s)
    }
}
