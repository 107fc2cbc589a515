//! Key naming conventions
//!
//! `camel` and `snake` are total functions over strings. They are not
//! inverses of each other: `item_1` becomes `item1` and stays `item1` on the
//! way back, and a run of capitals such as `HTTPCode` snakes to
//! `_h_t_t_p_code`.

use std::fmt;
use std::str::FromStr;

/// Target naming convention for keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Convention {
    /// `helloWorld`
    #[default]
    Camel,
    /// `hello_world`
    Snake,
}

impl Convention {
    /// Rename a single key according to this convention
    pub fn apply(&self, key: &str) -> String {
        match self {
            Convention::Camel => camel(key),
            Convention::Snake => snake(key),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Convention::Camel => "camel",
            Convention::Snake => "snake",
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Convention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "camel" | "camelcase" => Ok(Convention::Camel),
            "snake" | "snake_case" => Ok(Convention::Snake),
            other => Err(format!(
                "Invalid convention '{}'. Use 'camel' or 'snake'",
                other
            )),
        }
    }
}

/// Something that maps one key name to another.
///
/// Takes `&mut self` so that test doubles can record their invocations.
pub trait KeyNamer {
    fn rename(&mut self, key: &str) -> String;
}

impl KeyNamer for Convention {
    fn rename(&mut self, key: &str) -> String {
        self.apply(key)
    }
}

impl<F> KeyNamer for F
where
    F: FnMut(&str) -> String,
{
    fn rename(&mut self, key: &str) -> String {
        self(key)
    }
}

/// `hello_world` -> `helloWorld`
///
/// An underscore is dropped only when an ASCII lowercase letter or digit
/// follows it; that character is upper-cased.
pub fn camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('_', Some(&next)) if next.is_ascii_lowercase() || next.is_ascii_digit() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }

    out
}

/// `helloWorld` -> `hello_world`
pub fn snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);

    for c in key.chars() {
        if is_upper(c) {
            out.push('_');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

// ASCII plus the Latin-1 capitals, excluding the multiplication sign.
fn is_upper(c: char) -> bool {
    c.is_ascii_uppercase() || ('\u{C0}'..='\u{D6}').contains(&c) || ('\u{D9}'..='\u{DD}').contains(&c)
}
