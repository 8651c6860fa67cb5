use serde::{Deserialize, Serialize};

/// A longitude/latitude pair.
///
/// On the wire it is a two-element array `[x, y]`, as used by both DHIS2 coordinate strings and
/// GeoJSON.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, PartialOrd, Serialize, Default)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate2D {
    pub x: f64,
    pub y: f64,
}

impl Coordinate2D {
    /// Creates a new coordinate
    ///
    /// # Examples
    ///
    /// ```
    /// use geedhis2_datatypes::primitives::Coordinate2D;
    ///
    /// let c = Coordinate2D::new(1.0, 0.0);
    ///
    /// assert_eq!(c.x, 1.0);
    /// assert_eq!(c.y, 0.0);
    /// ```
    ///
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Coordinate2D {
    fn from(tuple: (f64, f64)) -> Self {
        let (x, y) = tuple;
        Self { x, y }
    }
}

impl From<[f64; 2]> for Coordinate2D {
    /// # Examples
    ///
    /// ```
    /// use geedhis2_datatypes::primitives::Coordinate2D;
    ///
    /// let c: Coordinate2D = [5.1, -3.0].into();
    ///
    /// assert_eq!(c.x, 5.1);
    /// assert_eq!(c.y, -3.0);
    /// ```
    ///
    fn from(array: [f64; 2]) -> Self {
        let [x, y] = array;
        Self { x, y }
    }
}

impl From<Coordinate2D> for [f64; 2] {
    fn from(coordinate: Coordinate2D) -> [f64; 2] {
        [coordinate.x, coordinate.y]
    }
}

impl From<&Coordinate2D> for geojson::Position {
    fn from(coordinate: &Coordinate2D) -> geojson::Position {
        vec![coordinate.x, coordinate.y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_deserializes_from_a_pair() {
        let coordinate: Coordinate2D = serde_json::from_str("[10, 20.5]").unwrap();

        assert_eq!(coordinate, Coordinate2D::new(10., 20.5));
    }

    #[test]
    fn it_rejects_wrong_arity() {
        assert!(serde_json::from_str::<Coordinate2D>("[10]").is_err());
        assert!(serde_json::from_str::<Coordinate2D>("[1, 2, 3]").is_err());
        assert!(serde_json::from_str::<Coordinate2D>("{\"x\": 1, \"y\": 2}").is_err());
    }

    #[test]
    fn it_serializes_to_a_pair() {
        assert_eq!(
            serde_json::to_string(&Coordinate2D::new(-1.5, 2.)).unwrap(),
            "[-1.5,2.0]"
        );
    }
}
