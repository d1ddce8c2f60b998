//! Foreground selection: pick text colors that stay legible on a background.

pub mod select;
pub(crate) mod shade;
