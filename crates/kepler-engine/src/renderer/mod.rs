pub mod frame;
pub mod viewport;

pub use frame::{Frame, Label, TextAlign};
pub use viewport::Viewport;
