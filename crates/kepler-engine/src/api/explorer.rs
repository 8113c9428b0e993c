use glam::Vec2;
use serde::Serialize;

use super::config::ExplorerConfig;
use super::types::{ExplorerEvent, StarId};
use crate::catalog::{fallback_records, Catalog, PlanetRecord, StarSystem};
use crate::core::filter::{FilterState, VisibleSet};
use crate::core::projection::ViewMode;
use crate::core::time::FrameClock;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::frame::Frame;
use crate::renderer::viewport::Viewport;
use crate::systems::interaction::Interaction;
use crate::systems::orbital::paint_orbital_diagram;
use crate::systems::render::{Placement, SceneView, SkyRenderer};
use crate::systems::starfield::Starfield;
use crate::systems::twinkle::Twinkle;

/// Counts for the page's stat bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub systems: usize,
    pub planets: usize,
    pub hz_systems: usize,
    pub earth_systems: usize,
    pub visible: usize,
}

/// Cache key for the orbital diagram: catalog generation, star, pixel size.
type DiagramKey = (u64, StarId, u32, u32);

/// The whole explorer: catalog, filter, view mode, interaction and the
/// render loop state. The host calls [`Explorer::frame`] once per display
/// refresh and drains events afterwards.
pub struct Explorer {
    config: ExplorerConfig,
    catalog: Catalog,
    filter: FilterState,
    visible: VisibleSet,
    mode: ViewMode,
    interaction: Interaction,
    renderer: SkyRenderer,
    clock: FrameClock,
    frame: Frame,
    input: InputQueue,
    diagram: Frame,
    diagram_key: Option<DiagramKey>,
    events: Vec<ExplorerEvent>,
}

impl Explorer {
    pub fn new(config: ExplorerConfig) -> Self {
        let renderer = SkyRenderer::new(
            Twinkle::new(config.seed, config.twinkle_speed),
            Starfield::new(config.seed, config.starfield_density, config.starfield_max_points),
        );
        Self {
            interaction: Interaction::new(config.hit_radius),
            mode: config.initial_view,
            catalog: Catalog::new(),
            filter: FilterState::default(),
            visible: VisibleSet::new(),
            renderer,
            clock: FrameClock::new(),
            frame: Frame::new(),
            input: InputQueue::new(),
            diagram: Frame::new(),
            diagram_key: None,
            events: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    // ── Catalog ─────────────────────────────────────────────────────

    /// Replace the catalog. Hover and selection refer to the old catalog
    /// and are cleared; the chrome is told if either was set.
    pub fn load_records(&mut self, records: &[PlanetRecord]) {
        let had_hover = self.interaction.hover().is_some();
        let had_selection = self.interaction.selection().is_some();
        let pointer = self.interaction.pointer().unwrap_or(Vec2::ZERO);

        self.catalog.replace(records);
        self.interaction.clear();
        self.diagram_key = None;

        if had_hover {
            self.events.push(ExplorerEvent::HoverChanged { star: None, pointer });
        }
        if had_selection {
            self.events.push(ExplorerEvent::SelectionChanged { star: None });
        }
        log::info!(
            "catalog loaded: {} planets in {} systems",
            self.catalog.planet_count(),
            self.catalog.len()
        );
    }

    pub fn load_fallback(&mut self) {
        self.load_records(&fallback_records());
    }

    /// Parse and load a JSON array of archive rows. On error the current
    /// catalog is kept.
    pub fn load_json(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let records = PlanetRecord::list_from_json(json)?;
        self.load_records(&records);
        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn star(&self, id: StarId) -> Option<&StarSystem> {
        self.catalog.get(id)
    }

    // ── Filter and view ─────────────────────────────────────────────

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter.normalized();
    }

    /// Set one filter field from a JSON value, e.g. `("habitable", "hz")`.
    pub fn set_filter_field(&mut self, field: &str, value: serde_json::Value) -> Result<(), serde_json::Error> {
        self.filter = self.filter.with_field(field, value)?;
        Ok(())
    }

    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if mode != self.mode {
            log::info!("view mode: {} -> {}", self.mode.name(), mode.name());
            self.mode = mode;
        }
    }

    /// Ids of the systems passing the current filter, in catalog order.
    pub fn visible(&mut self) -> &[StarId] {
        self.visible
            .refresh(&self.catalog, &self.filter, self.config.unknown_period)
    }

    pub fn summary(&mut self) -> CatalogSummary {
        let visible = self.visible().len();
        let systems = self.catalog.systems();
        CatalogSummary {
            systems: systems.len(),
            planets: self.catalog.planet_count(),
            hz_systems: systems.iter().filter(|s| s.has_hz).count(),
            earth_systems: systems.iter().filter(|s| s.has_earth).count(),
            visible,
        }
    }

    // ── Interaction ─────────────────────────────────────────────────

    pub fn hover(&self) -> Option<StarId> {
        self.interaction.hover()
    }

    pub fn selection(&self) -> Option<StarId> {
        self.interaction.selection()
    }

    /// Queue pointer input; it is applied during the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Where `id` was drawn in the last frame.
    pub fn placement(&self, id: StarId) -> Option<Placement> {
        self.renderer.placement(id)
    }

    /// Take the events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<ExplorerEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Frame ───────────────────────────────────────────────────────

    /// Run one frame: project, apply queued input against the new
    /// positions, then paint.
    pub fn frame(&mut self, viewport: Viewport, timestamp_ms: f64) -> &Frame {
        let time = self.clock.tick(timestamp_ms);
        let visible = self
            .visible
            .refresh(&self.catalog, &self.filter, self.config.unknown_period);

        self.renderer
            .layout(&self.catalog, self.mode, &viewport, &self.config.projection);

        for event in self.input.drain() {
            let positions = self.renderer.positions();
            match event {
                InputEvent::PointerMove { x, y } => {
                    let at = viewport.to_local(Vec2::new(x, y));
                    let ev = self.interaction.pointer_move(at, visible, positions);
                    self.events.push(ev);
                }
                InputEvent::PointerLeave => {
                    if let Some(ev) = self.interaction.pointer_leave() {
                        self.events.push(ev);
                    }
                }
                InputEvent::Click { x, y } => {
                    let at = viewport.to_local(Vec2::new(x, y));
                    if let Some(ev) = self.interaction.click(at, visible, positions) {
                        self.events.push(ev);
                    }
                }
            }
        }

        self.frame.begin(viewport);
        let scene = SceneView {
            catalog: &self.catalog,
            visible,
            mode: self.mode,
            hover: self.interaction.hover(),
            selection: self.interaction.selection(),
            time,
            projection: &self.config.projection,
        };
        self.renderer.paint(&scene, &mut self.frame);
        &self.frame
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    /// Orbital diagram of the selected star at `width` x `height` pixels.
    /// Repainted only when the selection, size or catalog changed.
    pub fn orbital_diagram(&mut self, width: u32, height: u32) -> Option<&Frame> {
        let id = self.interaction.selection()?;
        let star = self.catalog.get(id)?;
        let key = (self.catalog.generation(), id, width, height);
        if self.diagram_key != Some(key) {
            let size = Vec2::new(width as f32, height as f32);
            paint_orbital_diagram(star, size, &self.config.diagram, &mut self.diagram);
            self.diagram_key = Some(key);
        }
        Some(&self.diagram)
    }
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new(ExplorerConfig::default())
    }
}
