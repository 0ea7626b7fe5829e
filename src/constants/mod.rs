//! Generator constants, split into submodules by stage.

mod dungeon;
mod placement;
mod zones;

pub use dungeon::*;
pub use placement::*;
pub use zones::*;
