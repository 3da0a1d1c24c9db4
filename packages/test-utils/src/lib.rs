pub mod datagen;

pub use datagen::*;
