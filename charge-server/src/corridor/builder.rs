//! Corridor buffering and grid decomposition.

use geo::{
    Area, BooleanOps, BoundingRect, Coord, LineString, MapCoords, MultiPolygon, Polygon, Rect,
    Simplify, coord,
};

use crate::domain::Coordinate;

use super::projection::{mercator_forward, mercator_inverse};

/// Number of segments used to approximate the circular cap at each
/// polyline vertex.
const CAP_SEGMENTS: usize = 16;

/// Errors from corridor construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeometryError {
    /// A corridor needs a polyline of at least two points
    #[error("corridor needs at least 2 route points, got {0}")]
    TooFewPoints(usize),

    /// Projection produced a non-finite plane coordinate
    #[error("route projection produced a non-finite coordinate")]
    NonFinite,

    /// Buffering or rounding collapsed the corridor to nothing
    #[error("corridor buffering produced empty geometry")]
    EmptyBuffer,

    /// Grid decomposition yielded no cells
    #[error("corridor grid produced no cells")]
    EmptyGrid,
}

/// Corridor construction parameters.
#[derive(Debug, Clone)]
pub struct CorridorConfig {
    /// Buffer distance around the route, meters.
    pub buffer_m: f64,

    /// Side length of the square grid cells the corridor is split into,
    /// meters. Bounds the payload of a single spatial query.
    pub cell_size_m: f64,

    /// Douglas-Peucker tolerance applied to the geographic corridor
    /// outline, degrees.
    pub simplify_tolerance_deg: f64,

    /// Decimal places kept on corridor vertices, bounding the WKT size
    /// sent to the station provider.
    pub round_decimals: u32,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            buffer_m: 20_000.0,
            cell_size_m: 300_000.0,
            simplify_tolerance_deg: 0.01,
            round_decimals: 3,
        }
    }
}

/// A search corridor: geographic sub-polygons covering the buffered
/// route, each bounded by the configured cell size.
#[derive(Debug, Clone)]
pub struct Corridor {
    /// Cells in geographic coordinates (x = lon, y = lat).
    pub cells: Vec<Polygon<f64>>,
}

/// Builds search corridors from route polylines.
#[derive(Debug, Clone)]
pub struct CorridorBuilder {
    config: CorridorConfig,
}

impl CorridorBuilder {
    /// Create a builder with the given configuration.
    pub fn new(config: CorridorConfig) -> Self {
        Self { config }
    }

    /// Buffer the route and decompose the result into grid cells.
    ///
    /// The polyline is projected into a Mercator plane, buffered by the
    /// configured distance, brought back to geographic coordinates for
    /// simplification and vertex rounding, then re-projected and tiled.
    pub fn build(&self, route: &[Coordinate]) -> Result<Corridor, GeometryError> {
        if route.len() < 2 {
            return Err(GeometryError::TooFewPoints(route.len()));
        }

        let plane: Vec<Coord<f64>> = route
            .iter()
            .map(|c| mercator_forward(coord! { x: c.lon(), y: c.lat() }))
            .collect();
        if plane.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(GeometryError::NonFinite);
        }

        // Reduce vertex density before unioning the per-segment buffers.
        let line = LineString::new(plane).simplify(self.config.buffer_m / 20.0);

        let buffered = buffer_polyline(&line, self.config.buffer_m);
        if buffered.0.is_empty() {
            return Err(GeometryError::EmptyBuffer);
        }

        let geographic = buffered.map_coords(mercator_inverse);
        let simplified = geographic.simplify(self.config.simplify_tolerance_deg);
        let factor = 10f64.powi(self.config.round_decimals as i32);
        let rounded = simplified.map_coords(|c| coord! {
            x: (c.x * factor).round() / factor,
            y: (c.y * factor).round() / factor,
        });
        if rounded.unsigned_area() == 0.0 {
            return Err(GeometryError::EmptyBuffer);
        }

        let planar = rounded.map_coords(mercator_forward);
        let cells = tile_into_grid(&planar, self.config.cell_size_m);
        if cells.is_empty() {
            return Err(GeometryError::EmptyGrid);
        }

        Ok(Corridor {
            cells: cells
                .into_iter()
                .map(|p| p.map_coords(mercator_inverse))
                .collect(),
        })
    }
}

/// Buffer a plane polyline by `radius` meters.
///
/// The buffer is the union of an oriented rectangle per segment and a
/// circle approximation per vertex, which matches a round-capped,
/// round-joined buffer up to the cap segment count.
fn buffer_polyline(line: &LineString<f64>, radius: f64) -> MultiPolygon<f64> {
    let mut pieces: Vec<Polygon<f64>> = Vec::new();

    for seg in line.lines() {
        let dx = seg.end.x - seg.start.x;
        let dy = seg.end.y - seg.start.y;
        let len = dx.hypot(dy);
        if len == 0.0 {
            continue;
        }
        let nx = -dy / len * radius;
        let ny = dx / len * radius;
        pieces.push(Polygon::new(
            LineString::from(vec![
                (seg.start.x + nx, seg.start.y + ny),
                (seg.end.x + nx, seg.end.y + ny),
                (seg.end.x - nx, seg.end.y - ny),
                (seg.start.x - nx, seg.start.y - ny),
            ]),
            vec![],
        ));
    }

    for c in line.coords() {
        pieces.push(circle(*c, radius));
    }

    union_all(pieces)
}

/// Regular polygon approximating a circle.
fn circle(center: Coord<f64>, radius: f64) -> Polygon<f64> {
    let ring: Vec<(f64, f64)> = (0..CAP_SEGMENTS)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / CAP_SEGMENTS as f64;
            (
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect();
    Polygon::new(LineString::from(ring), vec![])
}

/// Union a list of polygons into one multi-polygon.
fn union_all(pieces: Vec<Polygon<f64>>) -> MultiPolygon<f64> {
    let mut iter = pieces.into_iter();
    let Some(first) = iter.next() else {
        return MultiPolygon::new(vec![]);
    };
    iter.fold(MultiPolygon::new(vec![first]), |acc, piece| {
        acc.union(&MultiPolygon::new(vec![piece]))
    })
}

/// Tile the bounding box of `area` into square cells of side
/// `cell_size`, clipping each cell against the area and dropping empty
/// intersections.
fn tile_into_grid(area: &MultiPolygon<f64>, cell_size: f64) -> Vec<Polygon<f64>> {
    let Some(bounds) = area.bounding_rect() else {
        return Vec::new();
    };

    let min = bounds.min();
    let max = bounds.max();
    let x_steps = ((max.x - min.x) / cell_size).ceil() as usize;
    let y_steps = ((max.y - min.y) / cell_size).ceil() as usize;

    let mut cells = Vec::new();
    for i in 0..x_steps {
        for j in 0..y_steps {
            let x0 = min.x + i as f64 * cell_size;
            let y0 = min.y + j as f64 * cell_size;
            let x1 = (x0 + cell_size).min(max.x);
            let y1 = (y0 + cell_size).min(max.y);
            let cell = Rect::new(coord! { x: x0, y: y0 }, coord! { x: x1, y: y1 }).to_polygon();

            let clipped = area.intersection(&MultiPolygon::new(vec![cell]));
            cells.extend(clipped.0.into_iter().filter(|p| p.unsigned_area() > 0.0));
        }
    }
    cells
}
