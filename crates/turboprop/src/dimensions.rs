//! Nacelle dimension regressions.

use uom::si::{
    area::square_meter,
    f64::{Area, Length},
    length::meter,
};

use crate::PropellerLayout;

/// Engine section height (m).
const ENGINE_HEIGHT: f64 = 0.515;
/// Engine section width (m).
const ENGINE_WIDTH: f64 = 0.447;
/// Clearance between engine and nacelle skin, added to each section size (m).
const CLEARANCE: f64 = 0.1;

/// Outer nacelle dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NacelleDimensions {
    pub height: Length,
    pub width: Length,
    pub length: Length,
    /// Wetted area of the nacelle box.
    pub wet_area: Area,
}

impl NacelleDimensions {
    /// Nacelle around an engine of design power `power_kw`.
    #[must_use]
    pub fn for_engine(power_kw: f64, layout: PropellerLayout) -> Self {
        let engine_length = 0.885 * power_kw.powf(0.1048);
        let height = ENGINE_HEIGHT + CLEARANCE;
        let width = ENGINE_WIDTH + CLEARANCE;

        let length = match layout {
            PropellerLayout::Wing | PropellerLayout::Fuselage => 2.0 * engine_length,
            PropellerLayout::Nose => 1.15 * engine_length,
        };

        Self {
            height: Length::new::<meter>(height),
            width: Length::new::<meter>(width),
            length: Length::new::<meter>(length),
            wet_area: Area::new::<square_meter>(2.0 * (height + width) * length),
        }
    }

    /// Values in meters and square meters, in the order height, width, length, wet area.
    #[must_use]
    pub fn to_array(&self) -> [f64; 4] {
        [
            self.height.get::<meter>(),
            self.width.get::<meter>(),
            self.length.get::<meter>(),
            self.wet_area.get::<square_meter>(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_nacelles() {
        let cases = [
            (745.7, [0.61, 0.54, 3.54, 8.23]),
            (1342.26, [0.61, 0.54, 3.77, 8.75]),
        ];
        for (power, expected) in cases {
            let actual = NacelleDimensions::for_engine(power, PropellerLayout::Wing).to_array();
            for (a, e) in actual.iter().zip(expected) {
                assert!((a - e).abs() <= 0.01, "{power} kW: got {actual:?}, expected {expected:?}");
            }
        }
    }

    #[test]
    fn nose_layout_is_shorter() {
        let wing = NacelleDimensions::for_engine(745.7, PropellerLayout::Wing);
        let nose = NacelleDimensions::for_engine(745.7, PropellerLayout::Nose);
        let fuselage = NacelleDimensions::for_engine(745.7, PropellerLayout::Fuselage);

        assert_eq!(wing, fuselage);
        assert!(nose.length < wing.length);
        assert!(nose.wet_area < wing.wet_area);
    }
}
