use crate::models::{BoundingBox, VenueMarker};
use geo::{BoundingRect, MultiPoint};

/// Smallest box containing every given marker, for framing the map
///
/// Returns `None` when there is nothing to frame.
pub fn marker_bounds<'a, I>(markers: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = &'a VenueMarker>,
{
    let points: MultiPoint<f64> = markers.into_iter().map(VenueMarker::point).collect();

    points.bounding_rect().map(|rect| BoundingBox {
        min_lat: rect.min().y,
        max_lat: rect.max().y,
        min_lon: rect.min().x,
        max_lon: rect.max().x,
    })
}
