pub mod entries;
pub mod settings;
