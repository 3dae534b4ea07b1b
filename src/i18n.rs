//! Translation lookup
//!
//! Human-facing strings produced by the view models go through a
//! [`Translate`] implementation passed in by the caller. Message ids are the
//! English source strings.

/// Looks up the display text for an English message id
pub trait Translate {
    fn translate(&self, message: &str) -> String;
}

/// Returns message ids unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translate for Untranslated {
    fn translate(&self, message: &str) -> String {
        message.to_string()
    }
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, message: &str) -> String {
        self(message)
    }
}

/// Picks the singular or plural form and prefixes the count, e.g. "2 placements"
pub fn pluralize(count: usize, singular: &str, plural: &str, t: &dyn Translate) -> String {
    let word = if count == 1 { singular } else { plural };
    format!("{} {}", count, t.translate(word))
}
