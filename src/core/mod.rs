mod pattern;
mod render;
mod walk;

pub use pattern::CompiledPatterns;
pub use walk::{WalkOptions, compare_names, walk_dir};
