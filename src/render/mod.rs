pub mod braille;
pub mod halfblock;
pub mod registry;
pub mod renderer;
pub mod text;
pub mod threshold;
