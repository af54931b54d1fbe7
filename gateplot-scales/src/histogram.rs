use crate::error::ScaleError;
use crate::extent::data_range;
use serde::{Deserialize, Serialize};

/// How a 1-D histogram picks its bins
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistogramBins {
    /// ceil(sqrt(n)) equal-width bins
    #[default]
    Sqrt,
    Count(usize),
}

/// Equal-width 1-D histogram. The last bin is closed on the right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn compute(data: &[f64], bins: HistogramBins) -> Result<Self, ScaleError> {
        let (lo, hi) = data_range(data).unwrap_or((0.0, 1.0));
        let finite_count = data.iter().filter(|v| v.is_finite()).count();

        let bin_count = match bins {
            HistogramBins::Count(0) => return Err(ScaleError::ZeroBins),
            HistogramBins::Count(n) => n,
            HistogramBins::Sqrt if hi > lo => (finite_count as f64).sqrt().ceil() as usize,
            HistogramBins::Sqrt => 1,
        };

        let (lo, hi) = widen_degenerate(lo, hi);
        let edges = linspace(lo, hi, bin_count + 1);
        let mut counts = vec![0u64; bin_count];
        for v in data {
            if let Some(i) = bin_index(*v, lo, hi, bin_count) {
                counts[i] += 1;
            }
        }

        Ok(Self { edges, counts })
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn left_edges(&self) -> &[f64] {
        &self.edges[..self.edges.len().saturating_sub(1)]
    }

    pub fn right_edges(&self) -> &[f64] {
        self.edges.get(1..).unwrap_or(&[])
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Equal-width 2-D histogram. `counts[i][j]` holds x bin `i`, y bin `j`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram2d {
    pub x_edges: Vec<f64>,
    pub y_edges: Vec<f64>,
    pub counts: Vec<Vec<f64>>,
}

impl Histogram2d {
    /// Bin `(x, y)` pairs over `range`; pairs outside the range are dropped
    pub fn compute(
        x: &[f64],
        y: &[f64],
        bins: (usize, usize),
        range: [(f64, f64); 2],
    ) -> Result<Self, ScaleError> {
        ScaleError::check_len("y", x.len(), y.len())?;
        let (nx, ny) = bins;
        if nx == 0 || ny == 0 {
            return Err(ScaleError::ZeroBins);
        }

        let (x_lo, x_hi) = widen_degenerate(range[0].0, range[0].1);
        let (y_lo, y_hi) = widen_degenerate(range[1].0, range[1].1);

        let mut counts = vec![vec![0.0; ny]; nx];
        for (xv, yv) in x.iter().zip(y) {
            let xi = bin_index(*xv, x_lo, x_hi, nx);
            let yi = bin_index(*yv, y_lo, y_hi, ny);
            if let (Some(i), Some(j)) = (xi, yi) {
                counts[i][j] += 1.0;
            }
        }

        Ok(Self {
            x_edges: linspace(x_lo, x_hi, nx + 1),
            y_edges: linspace(y_lo, y_hi, ny + 1),
            counts,
        })
    }

    pub fn x_centers(&self) -> Vec<f64> {
        centers(&self.x_edges)
    }

    pub fn y_centers(&self) -> Vec<f64> {
        centers(&self.y_edges)
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.x_edges.len() - 1, self.y_edges.len() - 1)
    }
}

/// Zero-width ranges are widened by half a unit on each side
fn widen_degenerate(lo: f64, hi: f64) -> (f64, f64) {
    if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

fn bin_index(v: f64, lo: f64, hi: f64, n: usize) -> Option<usize> {
    if !v.is_finite() || v < lo || v > hi {
        return None;
    }
    let i = ((v - lo) / (hi - lo) * n as f64) as usize;
    Some(i.min(n - 1))
}

pub(crate) fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

fn centers(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
}
