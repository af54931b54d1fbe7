use crate::error::ScaleError;

/// Bilinear interpolation over values sampled on a rectilinear grid.
///
/// Queries outside the grid return `None`. An axis with a single sample is
/// treated as constant along that axis.
#[derive(Debug, Clone)]
pub struct RegularGrid<'a> {
    xs: &'a [f64],
    ys: &'a [f64],
    values: &'a [Vec<f64>],
}

impl<'a> RegularGrid<'a> {
    /// `values[i][j]` is the sample at `(xs[i], ys[j])`; both axes must ascend
    pub fn new(xs: &'a [f64], ys: &'a [f64], values: &'a [Vec<f64>]) -> Result<Self, ScaleError> {
        ScaleError::check_len("grid rows", xs.len(), values.len())?;
        for row in values {
            ScaleError::check_len("grid columns", ys.len(), row.len())?;
        }
        Ok(Self { xs, ys, values })
    }

    pub fn interpolate(&self, x: f64, y: f64) -> Option<f64> {
        let (i0, i1, tx) = locate(self.xs, x)?;
        let (j0, j1, ty) = locate(self.ys, y)?;

        let v00 = self.values[i0][j0];
        let v01 = self.values[i0][j1];
        let v10 = self.values[i1][j0];
        let v11 = self.values[i1][j1];

        let v = v00 * (1.0 - tx) * (1.0 - ty)
            + v10 * tx * (1.0 - ty)
            + v01 * (1.0 - tx) * ty
            + v11 * tx * ty;
        v.is_finite().then_some(v)
    }

    /// Interpolate every point, replacing misses with `fill`
    pub fn interpolate_all(&self, x: &[f64], y: &[f64], fill: f64) -> Vec<f64> {
        x.iter()
            .zip(y)
            .map(|(x, y)| self.interpolate(*x, *y).unwrap_or(fill))
            .collect()
    }
}

/// Bracketing sample indices and the fractional position between them
fn locate(axis: &[f64], v: f64) -> Option<(usize, usize, f64)> {
    match axis {
        [] => None,
        [_] => v.is_finite().then_some((0, 0, 0.0)),
        _ => {
            let first = axis[0];
            let last = axis[axis.len() - 1];
            if !(v >= first && v <= last) {
                return None;
            }
            // index of the first sample strictly above v, clamped so that
            // v == last falls into the final cell
            let upper = axis.partition_point(|a| *a <= v).clamp(1, axis.len() - 1);
            let lower = upper - 1;
            let span = axis[upper] - axis[lower];
            let t = if span > 0.0 { (v - axis[lower]) / span } else { 0.0 };
            Some((lower, upper, t))
        }
    }
}
