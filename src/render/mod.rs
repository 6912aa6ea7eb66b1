pub mod renderer;

pub use renderer::{HudStyle, Renderer};
