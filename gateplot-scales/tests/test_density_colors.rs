use gateplot_scales::{density_colormap, estimate_density, DensityOptions, ScatterBounds};

/// Two blobs of very different density on a sparse uniform background
fn blobs() -> (Vec<f64>, Vec<f64>) {
    let mut x = vec![];
    let mut y = vec![];
    for i in 0..400 {
        x.push(20.0 + (i % 20) as f64 * 0.05);
        y.push(20.0 + (i / 20) as f64 * 0.05);
    }
    for i in 0..40 {
        x.push(60.0 + (i % 5) as f64 * 0.5);
        y.push(60.0 + (i / 5) as f64 * 0.5);
    }
    for i in 0..20 {
        x.push(i as f64 * 5.0);
        y.push(100.0 - i as f64 * 5.0);
    }
    (x, y)
}

#[test]
fn test_dense_blob_is_drawn_on_top_in_hot_colors() {
    let (x, y) = blobs();
    let scatter = estimate_density(
        &x,
        &y,
        &ScatterBounds::default(),
        &DensityOptions::default(),
        None,
    )
    .unwrap();

    assert_eq!(scatter.len(), x.len());
    let last = scatter.len() - 1;
    assert!(scatter.x[last] >= 20.0 && scatter.x[last] <= 21.0);

    // Densest point maps to the top of the lookup table
    let cmap = density_colormap();
    assert_eq!(scatter.fill[last], cmap.map_css(1.0));
    assert_eq!(scatter.fill[0], cmap.map_css(0.0));
    assert!(scatter.alpha.iter().all(|a| *a == 0.4));
}

#[test]
fn test_draw_order_is_a_permutation() {
    let (x, y) = blobs();
    let mask: Vec<bool> = (0..x.len()).map(|i| i % 3 == 0).collect();
    let scatter = estimate_density(
        &x,
        &y,
        &ScatterBounds::default(),
        &DensityOptions::default(),
        Some(&mask),
    )
    .unwrap();

    let mut expected: Vec<(u64, u64)> = x.iter().zip(&y).map(|(a, b)| (a.to_bits(), b.to_bits())).collect();
    let mut actual: Vec<(u64, u64)> = scatter
        .x
        .iter()
        .zip(&scatter.y)
        .map(|(a, b)| (a.to_bits(), b.to_bits()))
        .collect();
    expected.sort();
    actual.sort();
    assert_eq!(expected, actual);

    let highlighted = mask.iter().filter(|m| **m).count();
    let split = scatter.len() - highlighted;
    assert!(scatter.alpha[..split].iter().all(|a| *a == 0.3));
    assert!(scatter.alpha[split..].iter().all(|a| *a == 0.4));
}
