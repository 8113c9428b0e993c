pub mod api;
pub mod catalog;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::ExplorerConfig;
pub use api::explorer::{CatalogSummary, Explorer};
pub use api::types::{ExplorerEvent, StarId};
pub use catalog::{fallback_records, group_by_host, Catalog, Planet, PlanetRecord, StarSystem};
pub use core::attributes::{estimate_luminosity, is_habitable, star_color, SizeCategory, TemperatureBand};
pub use core::filter::{
    visible_subset, FilterState, HabitableFilter, MultiplicityFilter, SizeFilter, TemperatureFilter,
    UnknownPeriod, VisibleSet,
};
pub use core::lifecycle::CancelToken;
pub use core::projection::{project, project_galaxy, project_hr, project_sky, ProjectionConfig, ViewMode};
pub use core::time::FrameClock;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::frame::{Frame, Label, TextAlign};
pub use renderer::viewport::Viewport;
pub use systems::interaction::{hit_test, Interaction, DEFAULT_HIT_RADIUS};
pub use systems::orbital::{orbit_layout, paint_orbital_diagram, DiagramConfig};
pub use systems::render::{Placement, SkyRenderer};
pub use systems::vector::{VectorColor, VectorState, VectorVertex};
