use lyon_path::geom::point;
use lyon_path::Path;

/// Closed polygon through the given vertices, in order
pub fn polygon_path(vertices: &[[f64; 2]]) -> Path {
    let mut builder = Path::builder();
    let mut iter = vertices.iter();
    if let Some([x, y]) = iter.next() {
        builder.begin(point(*x as f32, *y as f32));
        for [x, y] in iter {
            builder.line_to(point(*x as f32, *y as f32));
        }
        builder.end(true);
    }
    builder.build()
}
