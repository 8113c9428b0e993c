//! Main view painter: star placements per view mode and the per-frame draw.

use glam::Vec2;

use crate::api::types::StarId;
use crate::catalog::{Catalog, StarSystem};
use crate::core::projection::{hr_x, hr_y, project, ProjectionConfig, ViewMode};
use crate::renderer::frame::{Frame, TextAlign};
use crate::renderer::viewport::Viewport;
use crate::systems::starfield::Starfield;
use crate::systems::twinkle::Twinkle;
use crate::systems::vector::{VectorColor, VectorState};

const BACKGROUND: VectorColor = VectorColor::rgb(0.016, 0.024, 0.063);
const SKY_WASH: VectorColor = VectorColor::new(0.24, 0.32, 0.62, 0.045);
const GALAXY_WASH: VectorColor = VectorColor::new(0.55, 0.5, 0.72, 0.035);
const GRID: VectorColor = VectorColor::new(0.55, 0.62, 0.8, 0.14);
const AXIS_TEXT: VectorColor = VectorColor::new(0.7, 0.76, 0.9, 0.8);
const HZ_RING: VectorColor = VectorColor::new(0.4, 0.9, 0.55, 0.65);
const SELECT_RING: VectorColor = VectorColor::new(1.0, 1.0, 1.0, 0.9);
const SUN: VectorColor = VectorColor::rgb(1.0, 0.86, 0.4);
const FOV: VectorColor = VectorColor::new(0.5, 0.7, 1.0, 0.35);

/// Size of a star with no planets; each planet adds a little, up to six.
const BASE_RADIUS: f32 = 2.2;
const RADIUS_PER_PLANET: f32 = 0.45;
const EMPHASIS: f32 = 1.5;
/// Apparent radius of the Kepler field in the sky view, degrees.
const KEPLER_FOV_RADIUS_DEG: f32 = 6.0;
/// Galactic disk tilt on screen, radians.
const GALAXY_BAND_ANGLE: f32 = -0.35;

const HR_TEFF_TICKS: [f64; 5] = [3_000.0, 5_000.0, 7_000.0, 9_000.0, 11_000.0];
const HR_LOG_LUM_TICKS: [i32; 7] = [-2, -1, 0, 1, 2, 3, 4];

/// Where a star was placed this frame and how big it is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub pos: Vec2,
    pub radius: f32,
}

/// Read-only inputs for one paint.
pub struct SceneView<'a> {
    pub catalog: &'a Catalog,
    /// Sorted, as produced by the filter.
    pub visible: &'a [StarId],
    pub mode: ViewMode,
    pub hover: Option<StarId>,
    pub selection: Option<StarId>,
    /// Animation time, seconds.
    pub time: f32,
    pub projection: &'a ProjectionConfig,
}

/// Render-loop state: this frame's placements, twinkle phases and the
/// background starfield.
pub struct SkyRenderer {
    positions: Vec<Vec2>,
    radii: Vec<f32>,
    twinkle: Twinkle,
    starfield: Starfield,
}

/// Draw radius before hover/selection emphasis.
pub fn base_radius(star: &StarSystem) -> f32 {
    BASE_RADIUS + RADIUS_PER_PLANET * star.planet_count().min(6) as f32
}

impl SkyRenderer {
    pub fn new(twinkle: Twinkle, starfield: Starfield) -> Self {
        Self {
            positions: Vec::new(),
            radii: Vec::new(),
            twinkle,
            starfield,
        }
    }

    /// Project every catalog star, visible or not, for this frame.
    pub fn layout(&mut self, catalog: &Catalog, mode: ViewMode, viewport: &Viewport, cfg: &ProjectionConfig) {
        self.twinkle.sync(catalog.len());
        self.positions.clear();
        self.radii.clear();
        for star in catalog.systems() {
            self.positions.push(project(mode, star, viewport, cfg));
            self.radii.push(base_radius(star));
        }
    }

    /// Positions indexed by catalog position.
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn placement(&self, id: StarId) -> Option<Placement> {
        let pos = *self.positions.get(id.index())?;
        let radius = *self.radii.get(id.index())?;
        Some(Placement { pos, radius })
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn paint(&mut self, scene: &SceneView, frame: &mut Frame) {
        let viewport = frame.viewport;
        frame
            .vectors
            .fill_rect(Vec2::ZERO, viewport.width, viewport.height, BACKGROUND);

        match scene.mode {
            ViewMode::Sky => paint_sky_wash(&viewport, &mut frame.vectors),
            ViewMode::Galaxy => paint_galaxy_wash(&viewport, &mut frame.vectors),
            ViewMode::Hr => paint_hr_grid(&viewport, scene.projection, frame),
        }

        self.starfield.paint(&viewport, &mut frame.vectors);
        self.paint_stars(scene, &mut frame.vectors);

        match scene.mode {
            ViewMode::Sky => paint_field_of_view(&viewport, scene.projection, frame),
            ViewMode::Galaxy => paint_sun(&viewport, frame),
            ViewMode::Hr => {}
        }

        if let Some(id) = scene.selection.filter(|id| scene.visible.binary_search(id).is_ok()) {
            if let (Some(star), Some(p)) = (scene.catalog.get(id), self.placement(id)) {
                let at = p.pos - Vec2::new(0.0, p.radius * EMPHASIS + 18.0);
                frame.label(star.host.clone(), at, 12.0, VectorColor::WHITE, TextAlign::Center);
            }
        }
    }

    fn paint_stars(&self, scene: &SceneView, vectors: &mut VectorState) {
        for &id in scene.visible {
            let (Some(star), Some(p)) = (scene.catalog.get(id), self.placement(id)) else {
                continue;
            };
            let factor = self.twinkle.factor(id.index(), scene.time);
            let hovered = scene.hover == Some(id);
            let selected = scene.selection == Some(id);
            paint_star(vectors, star, p.pos, &StarMark::new(star, p.radius, factor, hovered, selected));
        }
    }
}

/// How one star is drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
struct StarMark {
    radius: f32,
    glow: f32,
    /// Twinkle factor; scales both size and opacity.
    brightness: f32,
    planet_ring: bool,
    hz_ring: bool,
    selected: bool,
}

impl StarMark {
    fn new(star: &StarSystem, base: f32, factor: f32, hovered: bool, selected: bool) -> Self {
        let emphasized = hovered || selected;
        let scale = if emphasized { EMPHASIS * factor } else { factor };
        let radius = base * scale;
        Self {
            radius,
            glow: if emphasized { radius * 4.0 } else { radius * 2.6 },
            brightness: factor,
            planet_ring: star.planet_count() >= 3,
            hz_ring: star.has_hz,
            selected,
        }
    }
}

fn paint_star(vectors: &mut VectorState, star: &StarSystem, pos: Vec2, mark: &StarMark) {
    let radius = mark.radius;
    vectors.fill_glow(pos, mark.glow, 3, star.color.with_alpha(0.07 * mark.brightness));
    vectors.fill_circle(pos, radius, star.color.with_alpha(mark.brightness));

    if mark.planet_ring {
        vectors.stroke_circle(pos, radius + 4.0, 0.8, star.color.with_alpha(0.3));
    }
    if mark.hz_ring {
        vectors.stroke_dashed_circle(pos, radius + 7.0, 1.0, 12, HZ_RING);
    }
    if mark.selected {
        vectors.stroke_circle(pos, radius + 10.0, 1.5, SELECT_RING);
        vectors.stroke_circle(pos, radius + 15.0, 1.0, SELECT_RING.fade(0.45));
    }
}

fn paint_sky_wash(viewport: &Viewport, vectors: &mut VectorState) {
    let radius = viewport.width.min(viewport.height) * 0.65;
    vectors.fill_glow(viewport.center(), radius, 6, SKY_WASH);
}

fn paint_galaxy_wash(viewport: &Viewport, vectors: &mut VectorState) {
    let center = viewport.center();
    let length = viewport.size().length() * 1.2;
    let thickness = viewport.height * 0.45;
    for i in 0..4 {
        let t = thickness * (4 - i) as f32 / 4.0;
        vectors.fill_band(center, length, t, GALAXY_BAND_ANGLE, GALAXY_WASH);
    }
    vectors.fill_glow(center, viewport.height * 0.25, 4, GALAXY_WASH);
}

fn paint_hr_grid(viewport: &Viewport, cfg: &ProjectionConfig, frame: &mut Frame) {
    let m = cfg.hr_margins;
    let top = m.top as f32;
    let bottom = viewport.height - m.bottom as f32;
    let left = m.left as f32;
    let right = viewport.width - m.right as f32;
    if right <= left || bottom <= top {
        return;
    }

    for teff in HR_TEFF_TICKS {
        let x = hr_x(teff, viewport, cfg);
        frame
            .vectors
            .stroke_line(Vec2::new(x, top), Vec2::new(x, bottom), 1.0, GRID);
        frame.label(format!("{teff:.0}"), Vec2::new(x, bottom + 14.0), 10.0, AXIS_TEXT, TextAlign::Center);
    }
    for log_lum in HR_LOG_LUM_TICKS {
        let y = hr_y(log_lum as f64, viewport, cfg);
        frame
            .vectors
            .stroke_line(Vec2::new(left, y), Vec2::new(right, y), 1.0, GRID);
        frame.label(luminosity_tick(log_lum), Vec2::new(left - 6.0, y), 10.0, AXIS_TEXT, TextAlign::Right);
    }

    let mid_x = (left + right) / 2.0;
    frame.label("Temperature (K)", Vec2::new(mid_x, bottom + 32.0), 11.0, AXIS_TEXT, TextAlign::Center);
    frame.label("Luminosity (L☉)", Vec2::new(left, top - 10.0), 11.0, AXIS_TEXT, TextAlign::Left);
}

fn luminosity_tick(log_lum: i32) -> String {
    match log_lum {
        n if n < 0 => format!("0.{}1", "0".repeat((-n - 1) as usize)),
        n => format!("1{}", "0".repeat(n as usize)),
    }
}

fn paint_field_of_view(viewport: &Viewport, cfg: &ProjectionConfig, frame: &mut Frame) {
    let center = viewport.center();
    let radius = KEPLER_FOV_RADIUS_DEG / cfg.sky_half_span_dec as f32 * (viewport.height / 2.0);
    frame.vectors.stroke_circle(center, radius, 1.0, FOV);
    frame.label(
        "Kepler field of view",
        center - Vec2::new(0.0, radius + 10.0),
        11.0,
        FOV.with_alpha(0.8),
        TextAlign::Center,
    );
}

fn paint_sun(viewport: &Viewport, frame: &mut Frame) {
    let center = viewport.center();
    frame.vectors.fill_glow(center, 12.0, 3, SUN.with_alpha(0.12));
    frame.vectors.fill_circle(center, 3.5, SUN);
    frame.label("Sun", center + Vec2::new(0.0, 18.0), 11.0, SUN, TextAlign::Center);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{fallback_records, PlanetRecord};

    fn renderer() -> SkyRenderer {
        SkyRenderer::new(Twinkle::new(1, 1.4), Starfield::new(1, 0.0005, 400))
    }

    fn paint(mode: ViewMode, visible: &[StarId], selection: Option<StarId>) -> Frame {
        let catalog = Catalog::from_records(&fallback_records());
        paint_catalog(&catalog, mode, visible, None, selection)
    }

    fn paint_catalog(
        catalog: &Catalog,
        mode: ViewMode,
        visible: &[StarId],
        hover: Option<StarId>,
        selection: Option<StarId>,
    ) -> Frame {
        let cfg = ProjectionConfig::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut r = renderer();
        r.layout(catalog, mode, &viewport, &cfg);
        let mut frame = Frame::new();
        frame.begin(viewport);
        let scene = SceneView {
            catalog,
            visible,
            mode,
            hover,
            selection,
            time: 0.5,
            projection: &cfg,
        };
        r.paint(&scene, &mut frame);
        frame
    }

    fn has_label(frame: &Frame, text: &str) -> bool {
        frame.labels.iter().any(|l| l.text == text)
    }

    #[test]
    fn layout_places_every_star() {
        let catalog = Catalog::from_records(&fallback_records());
        let mut r = renderer();
        r.layout(&catalog, ViewMode::Sky, &Viewport::new(800.0, 600.0), &ProjectionConfig::default());
        assert_eq!(r.positions().len(), catalog.len());
        assert!(r.placement(StarId(4)).is_some());
        assert!(r.placement(StarId(5)).is_none());
    }

    #[test]
    fn more_planets_draw_bigger() {
        let catalog = Catalog::from_records(&fallback_records());
        let mut r = renderer();
        r.layout(&catalog, ViewMode::Sky, &Viewport::new(800.0, 600.0), &ProjectionConfig::default());
        let single = r.placement(StarId(0)).unwrap().radius;
        let five = r.placement(StarId(2)).unwrap().radius;
        assert!(five > single);
    }

    #[test]
    fn sky_paints_field_of_view_label() {
        let frame = paint(ViewMode::Sky, &[], None);
        assert!(has_label(&frame, "Kepler field of view"));
        assert!(!has_label(&frame, "Sun"));
        assert!(frame.vectors.vertex_count() > 0);
    }

    #[test]
    fn galaxy_paints_sun_marker() {
        let frame = paint(ViewMode::Galaxy, &[], None);
        assert!(has_label(&frame, "Sun"));
    }

    #[test]
    fn hr_paints_axes() {
        let frame = paint(ViewMode::Hr, &[], None);
        assert!(has_label(&frame, "Temperature (K)"));
        assert!(has_label(&frame, "1"));
        assert!(has_label(&frame, "0.01"));
        assert!(has_label(&frame, "5000"));
    }

    #[test]
    fn visible_stars_add_geometry() {
        let none = paint(ViewMode::Sky, &[], None);
        let all: Vec<StarId> = (0..5).map(StarId).collect();
        let some = paint(ViewMode::Sky, &all, None);
        assert!(some.vectors.vertex_count() > none.vectors.vertex_count());
    }

    #[test]
    fn selected_star_gets_name_label() {
        let all: Vec<StarId> = (0..5).map(StarId).collect();
        let frame = paint(ViewMode::Sky, &all, Some(StarId(4)));
        assert!(has_label(&frame, "Kepler-62"));

        let hidden = paint(ViewMode::Sky, &all[..4], Some(StarId(4)));
        assert!(!has_label(&hidden, "Kepler-62"));
    }

    #[test]
    fn luminosity_ticks_read_as_plain_numbers() {
        assert_eq!(luminosity_tick(-2), "0.01");
        assert_eq!(luminosity_tick(0), "1");
        assert_eq!(luminosity_tick(3), "1000");
    }

    fn star(catalog: &Catalog, host: &str) -> StarSystem {
        catalog
            .systems()
            .iter()
            .find(|s| s.host == host)
            .cloned()
            .unwrap()
    }

    fn lone_catalog(insolation: f64) -> Catalog {
        Catalog::from_records(&[PlanetRecord {
            host: "Lone".into(),
            name: "Lone b".into(),
            radius: Some(1.1),
            period: Some(40.0),
            insolation: Some(insolation),
            star_teff: Some(5600.0),
            ra: Some(291.0),
            dec: Some(44.5),
            distance: Some(300.0),
            ..Default::default()
        }])
    }

    #[test]
    fn hover_and_selection_enlarge_by_half() {
        let catalog = Catalog::from_records(&fallback_records());
        let s = star(&catalog, "Kepler-186");
        let plain = StarMark::new(&s, 4.0, 1.0, false, false);
        let hovered = StarMark::new(&s, 4.0, 1.0, true, false);
        let selected = StarMark::new(&s, 4.0, 1.0, false, true);
        assert_eq!(plain.radius, 4.0);
        assert_eq!(hovered.radius, 6.0);
        assert_eq!(selected.radius, 6.0);
        assert!(hovered.glow > plain.glow);
        assert!(!hovered.selected && selected.selected);
    }

    #[test]
    fn twinkle_scales_size_and_opacity() {
        let catalog = Catalog::from_records(&fallback_records());
        let s = star(&catalog, "Kepler-22");
        let dim = StarMark::new(&s, 4.0, 0.64, false, false);
        let bright = StarMark::new(&s, 4.0, 1.0, false, false);
        assert!((dim.radius - 2.56).abs() < 1e-5);
        assert_eq!(bright.radius, 4.0);
        assert!(dim.glow < bright.glow);
        assert_eq!(dim.brightness, 0.64);
    }

    #[test]
    fn rings_mark_crowded_and_habitable_systems() {
        let catalog = Catalog::from_records(&fallback_records());
        let crowded = StarMark::new(&star(&catalog, "Kepler-186"), 4.0, 1.0, false, false);
        assert!(crowded.planet_ring);
        assert!(crowded.hz_ring);
        let single = StarMark::new(&star(&catalog, "Kepler-22"), 4.0, 1.0, false, false);
        assert!(!single.planet_ring);

        let dry = StarMark::new(&star(&lone_catalog(5.0), "Lone"), 4.0, 1.0, false, false);
        assert!(!dry.hz_ring);
    }

    #[test]
    fn habitable_host_draws_extra_ring() {
        let only = [StarId(0)];
        let hz = paint_catalog(&lone_catalog(1.0), ViewMode::Sky, &only, None, None);
        let hot = paint_catalog(&lone_catalog(5.0), ViewMode::Sky, &only, None, None);
        assert!(hz.vectors.vertex_count() > hot.vectors.vertex_count());
    }

    #[test]
    fn hovered_star_draws_differently() {
        let catalog = Catalog::from_records(&fallback_records());
        let only = [StarId(2)];
        let plain = paint_catalog(&catalog, ViewMode::Sky, &only, None, None);
        let hovered = paint_catalog(&catalog, ViewMode::Sky, &only, Some(StarId(2)), None);
        let elsewhere = paint_catalog(&catalog, ViewMode::Sky, &only, Some(StarId(0)), None);
        assert!(hovered.vectors.vertex_count() >= plain.vectors.vertex_count());
        assert_ne!(hovered.vectors.vertices(), plain.vectors.vertices());
        assert_eq!(elsewhere.vectors.vertices(), plain.vectors.vertices());
    }
}
