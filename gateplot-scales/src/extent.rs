use crate::error::ScaleError;
use itertools::{Itertools, MinMaxResult};

/// Padding fraction applied to scatter plot axes so extreme events stay off the edge
pub const SCATTER_PAD: f64 = 0.02;

/// Compute the display bounds of 1-D data.
///
/// Explicit bounds pass through untouched. A missing bound is taken from the
/// data and pushed outward by `pad * max(|min|, |max|)`, so both sides are
/// widened by the same amount.
pub fn calculate_extent(
    data: &[f64],
    d_min: Option<f64>,
    d_max: Option<f64>,
    pad: f64,
) -> Result<(f64, f64), ScaleError> {
    if let (Some(lo), Some(hi)) = (d_min, d_max) {
        return Ok((lo, hi));
    }

    let (data_min, data_max) = data_range(data).ok_or(ScaleError::EmptyData)?;
    let pad_d = data_min.abs().max(data_max.abs()) * pad;

    Ok((
        d_min.unwrap_or(data_min - pad_d),
        d_max.unwrap_or(data_max + pad_d),
    ))
}

/// Minimum and maximum of the finite values in `data`
pub fn data_range(data: &[f64]) -> Option<(f64, f64)> {
    match data.iter().copied().filter(|v| v.is_finite()).minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v, v)),
        MinMaxResult::MinMax(lo, hi) => Some((lo, hi)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[test]
    fn test_no_padding() -> Result<(), ScaleError> {
        let (lo, hi) = calculate_extent(&[1.0, 2.0, 3.0, 4.0, 5.0], None, None, 0.0)?;
        assert_approx_eq!(f64, lo, 1.0);
        assert_approx_eq!(f64, hi, 5.0);
        Ok(())
    }

    #[test]
    fn test_symmetric_padding() -> Result<(), ScaleError> {
        // 10% of max(|1|, |5|) on both sides
        let (lo, hi) = calculate_extent(&[1.0, 2.0, 3.0, 4.0, 5.0], None, None, 0.1)?;
        assert_approx_eq!(f64, lo, 0.5);
        assert_approx_eq!(f64, hi, 5.5);
        Ok(())
    }

    #[test]
    fn test_padding_uses_largest_magnitude() -> Result<(), ScaleError> {
        let (lo, hi) = calculate_extent(&[-10.0, 2.0], None, None, 0.1)?;
        assert_approx_eq!(f64, lo, -11.0);
        assert_approx_eq!(f64, hi, 3.0);
        Ok(())
    }

    #[rstest]
    #[case(Some(-1.0), None, -1.0, 5.5)]
    #[case(None, Some(9.0), 0.5, 9.0)]
    #[case(Some(-1.0), Some(9.0), -1.0, 9.0)]
    fn test_explicit_bounds_pass_through(
        #[case] d_min: Option<f64>,
        #[case] d_max: Option<f64>,
        #[case] lo: f64,
        #[case] hi: f64,
    ) -> Result<(), ScaleError> {
        let extent = calculate_extent(&[1.0, 5.0], d_min, d_max, 0.1)?;
        assert_approx_eq!(f64, extent.0, lo);
        assert_approx_eq!(f64, extent.1, hi);
        Ok(())
    }

    #[test]
    fn test_empty_data() {
        assert_eq!(
            calculate_extent(&[], None, Some(1.0), 0.02),
            Err(ScaleError::EmptyData)
        );
        assert_eq!(
            calculate_extent(&[f64::NAN, f64::NAN], None, None, 0.02),
            Err(ScaleError::EmptyData)
        );
        // Both bounds given, data is never inspected
        assert_eq!(calculate_extent(&[], Some(0.0), Some(1.0), 0.02), Ok((0.0, 1.0)));
    }

    #[test]
    fn test_data_range_skips_nan() {
        assert_eq!(data_range(&[f64::NAN, 3.0, -1.0]), Some((-1.0, 3.0)));
        assert_eq!(data_range(&[f64::NAN]), None);
    }
}
