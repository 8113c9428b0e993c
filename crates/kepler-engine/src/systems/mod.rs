pub mod interaction;
pub mod orbital;
pub mod render;
pub mod starfield;
pub mod twinkle;
pub mod vector;
