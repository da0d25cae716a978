use image::math::Rect;

/// Returns the four corner coordinates of a `width` x `height` grid in the order
/// top-left, bottom-left, top-right, bottom-right.
///
/// Degenerate grids (zero width or height) yield the origin four times.
pub fn corner_points(width: u32, height: u32) -> [(u32, u32); 4] {
    let right = width.saturating_sub(1);
    let bottom = height.saturating_sub(1);
    [(0, 0), (0, bottom), (right, 0), (right, bottom)]
}

/// Calculates the inclusive axis-aligned bounding box of a set of pixel coordinates.
///
/// The returned `Rect` covers every point, so a single point produces a 1x1 box.
/// Returns `None` when the iterator is empty.
///
/// # Examples
///
/// ```
/// use contour_highlight::rect::bounding_box;
///
/// let bbox = bounding_box([(3, 4), (10, 2), (5, 9)]).unwrap();
/// assert_eq!((bbox.x, bbox.y, bbox.width, bbox.height), (3, 2, 8, 8));
/// assert!(bounding_box(std::iter::empty()).is_none());
/// ```
pub fn bounding_box<I>(points: I) -> Option<Rect>
where
    I: IntoIterator<Item = (u32, u32)>,
{
    let mut points = points.into_iter();
    let (x0, y0) = points.next()?;
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (x0, x0, y0, y0);

    for (x, y) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    Some(Rect {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}
