use crate::models::GeoPoint;

/// Geographic pricing strategy. The combiner only ever sees the returned
/// multiplier.
pub trait LocationModel: Send + Sync {
    /// Multiplier for the requested service area. 1.0 is neutral.
    fn multiplier(&self, location: &GeoPoint, radius_km: f64) -> f64;
}

/// Default model: no geographic pricing data yet, every area prices neutral.
pub struct FlatLocationModel;

impl LocationModel for FlatLocationModel {
    fn multiplier(&self, _location: &GeoPoint, _radius_km: f64) -> f64 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_model_is_neutral_everywhere() {
        let model = FlatLocationModel;
        let here = GeoPoint { lat: 0.0, lng: 0.0 };
        let there = GeoPoint { lat: 59.33, lng: 18.07 };

        assert_eq!(model.multiplier(&here, 1.0), 1.0);
        assert_eq!(model.multiplier(&there, 50.0), 1.0);
    }
}
