pub mod music;

pub use music::{BackgroundMusic, MusicTrack};
