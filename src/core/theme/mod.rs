//! Weather- and clock-adaptive theme derivation.
//!
//! `scene` classifies the inputs, `table` resolves a palette along the key
//! cascade, `effects` and `color` produce the derived fragments, and
//! `deriver` assembles them into a [`StyleBundle`].

pub mod color;
pub mod deriver;
pub mod effects;
pub mod scene;
pub mod table;

pub use deriver::{derive_theme, DerivedStyles, DerivedTheme, SceneInputs, StyleBundle, ThemeDeriver};
pub use scene::{Scene, Season, Temperature, TimeOfDay, WeatherMood};
pub use table::{Palette, SceneKey, ThemeTable};
