//! Plotting surface.
//!
//! [`Drawable`] is the narrow contract the driver renders through: add a
//! curve, replace a curve's data, request a redraw. [`Figure`] is the
//! headless implementation: it keeps curves in insertion order and counts
//! redraw requests, and can rasterize itself to text for terminal output.

use indexmap::IndexMap;
use wavemarch_core::CurveId;

use crate::error::RenderError;

/// A target the driver can draw curves on.
pub trait Drawable {
    /// Add a curve and return its id.
    fn plot(&mut self, x: &[f64], y: &[f64], style: &str) -> Result<CurveId, RenderError>;

    /// Replace the full data of an existing curve.
    fn set_curve_data(&mut self, curve: CurveId, x: &[f64], y: &[f64]) -> Result<(), RenderError>;

    /// Request a redraw.
    fn draw(&mut self) -> Result<(), RenderError>;

    /// Number of curves plotted so far.
    fn curve_count(&self) -> usize;
}

/// Figure dimensions in inches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FigureConfig {
    /// Width. Default: 15.
    pub width_in: f64,
    /// Height. Default: 10.
    pub height_in: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_in: 15.0,
            height_in: 10.0,
        }
    }
}

/// One plotted line.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    /// Line style, e.g. `"-"`.
    pub style: String,
    /// x coordinates.
    pub x: Vec<f64>,
    /// y values.
    pub y: Vec<f64>,
    /// Number of times the data was replaced since plotting.
    pub revision: u64,
}

/// Headless in-memory figure.
#[derive(Clone, Debug, Default)]
pub struct Figure {
    config: FigureConfig,
    curves: IndexMap<CurveId, Curve>,
    next_id: u32,
    draw_count: u64,
}

impl Figure {
    /// Empty figure with the given dimensions.
    pub fn new(config: FigureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Dimensions.
    pub fn config(&self) -> FigureConfig {
        self.config
    }

    /// Look up a curve.
    pub fn curve(&self, id: CurveId) -> Option<&Curve> {
        self.curves.get(&id)
    }

    /// Curves in plotting order.
    pub fn curves(&self) -> impl Iterator<Item = (CurveId, &Curve)> {
        self.curves.iter().map(|(&id, c)| (id, c))
    }

    /// Number of redraw requests received.
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    /// Rasterize every curve onto a `cols` x `rows` character grid.
    ///
    /// Curves are drawn in plotting order with the glyphs `*`, `o`, `+`,
    /// `x` (cycling), so later curves overwrite earlier ones where they
    /// overlap. Axis ranges cover the union of all curve data.
    pub fn render_ascii(&self, cols: usize, rows: usize) -> String {
        const GLYPHS: [char; 4] = ['*', 'o', '+', 'x'];
        if cols == 0 || rows == 0 {
            return String::new();
        }
        let mut canvas = vec![vec![' '; cols]; rows];
        let points = || {
            self.curves
                .values()
                .flat_map(|c| c.x.iter().copied().zip(c.y.iter().copied()))
                .filter(|(x, y)| x.is_finite() && y.is_finite())
        };
        let (mut x0, mut x1, mut y0, mut y1) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
        for (x, y) in points() {
            x0 = x0.min(x);
            x1 = x1.max(x);
            y0 = y0.min(y);
            y1 = y1.max(y);
        }
        if x0 > x1 {
            return canvas_to_string(canvas);
        }
        let xspan = (x1 - x0).max(f64::EPSILON);
        let yspan = (y1 - y0).max(f64::EPSILON);
        for (i, curve) in self.curves.values().enumerate() {
            let glyph = GLYPHS[i % GLYPHS.len()];
            for (&x, &y) in curve.x.iter().zip(&curve.y) {
                if !x.is_finite() || !y.is_finite() {
                    continue;
                }
                let c = (((x - x0) / xspan) * (cols - 1) as f64).round() as usize;
                let r = (((y1 - y) / yspan) * (rows - 1) as f64).round() as usize;
                canvas[r.min(rows - 1)][c.min(cols - 1)] = glyph;
            }
        }
        canvas_to_string(canvas)
    }
}

fn canvas_to_string(canvas: Vec<Vec<char>>) -> String {
    let mut out = String::new();
    for row in canvas {
        out.extend(row);
        out.push('\n');
    }
    out
}

fn check_lengths(x: &[f64], y: &[f64]) -> Result<(), RenderError> {
    if x.len() != y.len() {
        return Err(RenderError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    Ok(())
}

impl Drawable for Figure {
    fn plot(&mut self, x: &[f64], y: &[f64], style: &str) -> Result<CurveId, RenderError> {
        check_lengths(x, y)?;
        let id = CurveId(self.next_id);
        self.next_id += 1;
        self.curves.insert(
            id,
            Curve {
                style: style.to_owned(),
                x: x.to_vec(),
                y: y.to_vec(),
                revision: 0,
            },
        );
        Ok(id)
    }

    fn set_curve_data(&mut self, curve: CurveId, x: &[f64], y: &[f64]) -> Result<(), RenderError> {
        check_lengths(x, y)?;
        let c = self
            .curves
            .get_mut(&curve)
            .ok_or(RenderError::UnknownCurve { curve })?;
        c.x.clear();
        c.x.extend_from_slice(x);
        c.y.clear();
        c.y.extend_from_slice(y);
        c.revision += 1;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), RenderError> {
        self.draw_count += 1;
        Ok(())
    }

    fn curve_count(&self) -> usize {
        self.curves.len()
    }
}
