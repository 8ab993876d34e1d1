use geo::{Distance, Euclidean};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    point: geo::Point,
}

impl Location {
    pub fn from_cartesian(x: f64, y: f64) -> Self {
        Self {
            point: geo::Point::new(x, y),
        }
    }

    pub fn x(&self) -> f64 {
        self.point.x()
    }

    pub fn y(&self) -> f64 {
        self.point.y()
    }

    pub fn euclidean_distance(&self, to: &Location) -> f64 {
        Euclidean.distance(&self.point, &to.point)
    }
}

impl From<&Location> for geo::Point<f64> {
    fn from(location: &Location) -> Self {
        location.point
    }
}

impl From<&Location> for geo::Coord<f64> {
    fn from(val: &Location) -> Self {
        geo::Coord {
            x: val.x(),
            y: val.y(),
        }
    }
}

/// Axis-aligned bounding box of a set of locations, `None` when empty.
pub fn bounding_rect<'a>(locations: impl IntoIterator<Item = &'a Location>) -> Option<geo::Rect> {
    let mut iter = locations.into_iter();
    let first = iter.next()?;
    let mut min = geo::Coord::from(first);
    let mut max = min;

    for location in iter {
        min.x = min.x.min(location.x());
        min.y = min.y.min(location.y());
        max.x = max.x.max(location.x());
        max.y = max.y.max(location.y());
    }

    Some(geo::Rect::new(min, max))
}
