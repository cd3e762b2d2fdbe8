use crate::geometry::Point;

/// Horizontal spans covered by a closed polygon according to the
/// even-odd rule.
///
/// A pixel belongs to the polygon if its center is inside. Calls
/// `span(y, x_start, x_end)` with exclusive `x_end` for every covered run
/// of pixels in rows `0..height`, with `x` clipped to `0..width`.
pub(crate) fn for_each_span(
    polygon: &[Point],
    width: i32,
    height: i32,
    mut span: impl FnMut(i32, i32, i32),
) {
    if polygon.len() < 3 || width <= 0 || height <= 0 {
        return;
    }
    let min_y = polygon.iter().map(|p| p.y).min().unwrap_or(0).max(0);
    let max_y = polygon.iter().map(|p| p.y).max().unwrap_or(0).min(height);

    let mut crossings: Vec<f64> = Vec::with_capacity(polygon.len());
    for y in min_y..max_y {
        let scan_y = y as f64 + 0.5;
        crossings.clear();
        for (i, a) in polygon.iter().enumerate() {
            let b = polygon[(i + 1) % polygon.len()];
            let (ay, by) = (a.y as f64, b.y as f64);
            // Half-open rule makes shared vertices count once.
            if (ay <= scan_y) != (by <= scan_y) {
                let t = (scan_y - ay) / (by - ay);
                crossings.push(a.x as f64 + t * (b.x - a.x) as f64);
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));

        for pair in crossings.chunks_exact(2) {
            // pixels with centers in [x0, x1)
            let x_start = ((pair[0] - 0.5).ceil() as i32).max(0);
            let x_end = ((pair[1] - 0.5).ceil() as i32).min(width);
            if x_start < x_end {
                span(y, x_start, x_end);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered(polygon: &[Point], width: i32, height: i32) -> Vec<Vec<bool>> {
        let mut res = vec![vec![false; width as usize]; height as usize];
        for_each_span(polygon, width, height, |y, x0, x1| {
            for x in x0..x1 {
                res[y as usize][x as usize] = true;
            }
        });
        res
    }

    #[test]
    fn rectangle_covers_pixels_inside() {
        let polygon = [
            Point::new(1, 1),
            Point::new(4, 1),
            Point::new(4, 3),
            Point::new(1, 3),
        ];
        let res = covered(&polygon, 6, 5);
        for (y, row) in res.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                let expected = (1..4).contains(&x) && (1..3).contains(&y);
                assert_eq!(c, expected, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn polygon_is_clipped() {
        let polygon = [Point::new(-5, -5), Point::new(20, -5), Point::new(20, 20)];
        let res = covered(&polygon, 4, 4);
        // upper-right triangle, diagonal excluded where centers are below it
        assert!(res[0][3]);
        assert!(res[0][1]);
        assert!(!res[3][0]);
    }

    #[test]
    fn self_intersecting_polygon_uses_even_odd_rule() {
        // two overlapping squares traced as one contour
        let polygon = [
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(2, 4),
            Point::new(2, 2),
            Point::new(6, 2),
            Point::new(6, 6),
            Point::new(0, 6),
        ];
        let res = covered(&polygon, 6, 6);
        assert!(res[0][0]);
        assert!(res[5][5]);
    }
}
