//! Soil and climate readings fed to the classifiers.

use crate::error::FeatureError;
use serde::{Deserialize, Serialize};

/// Number of model inputs.
pub const FEATURE_COUNT: usize = 7;

/// Order in which the trained models expect their inputs.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = [
    "N",
    "P",
    "K",
    "temperature",
    "humidity",
    "ph",
    "rainfall",
];

/// Accepted range of one input field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

/// Bounds per field, in model order.
pub const FIELD_BOUNDS: [FieldBounds; FEATURE_COUNT] = [
    FieldBounds {
        field: "Nitrogen",
        min: 0.0,
        max: 200.0,
    },
    FieldBounds {
        field: "Phosphorus",
        min: 0.0,
        max: 200.0,
    },
    FieldBounds {
        field: "Potassium",
        min: 0.0,
        max: 200.0,
    },
    FieldBounds {
        field: "Temperature",
        min: 0.0,
        max: 60.0,
    },
    FieldBounds {
        field: "Humidity",
        min: 0.0,
        max: 100.0,
    },
    FieldBounds {
        field: "pH",
        min: 0.0,
        max: 14.0,
    },
    FieldBounds {
        field: "Rainfall",
        min: 0.0,
        max: 500.0,
    },
];

/// One set of soil and climate readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Nitrogen, kg/ha.
    pub nitrogen: u32,
    /// Phosphorus, kg/ha.
    pub phosphorus: u32,
    /// Potassium, kg/ha.
    pub potassium: u32,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    pub ph: f64,
    /// Centimetres.
    pub rainfall: f64,
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self {
            nitrogen: 90,
            phosphorus: 42,
            potassium: 43,
            temperature: 20.8,
            humidity: 82.0,
            ph: 6.5,
            rainfall: 203.0,
        }
    }
}

impl FeatureVector {
    /// Builds a vector from values given in model order, validating each one.
    pub fn from_values(values: &[f64]) -> Result<Self, FeatureError> {
        if values.len() != FEATURE_COUNT {
            return Err(FeatureError::WrongLength {
                expected: FEATURE_COUNT,
                actual: values.len(),
            });
        }
        for (value, bounds) in values.iter().zip(FIELD_BOUNDS.iter()) {
            check_bounds(*value, bounds)?;
        }
        let nutrient = |idx: usize| -> Result<u32, FeatureError> {
            let value = values[idx];
            if value.fract() != 0.0 {
                return Err(FeatureError::NotInteger {
                    field: FIELD_BOUNDS[idx].field,
                    value,
                });
            }
            Ok(value as u32)
        };
        Ok(Self {
            nitrogen: nutrient(0)?,
            phosphorus: nutrient(1)?,
            potassium: nutrient(2)?,
            temperature: values[3],
            humidity: values[4],
            ph: values[5],
            rainfall: values[6],
        })
    }

    /// Checks every field against its declared range.
    pub fn validate(&self) -> Result<(), FeatureError> {
        self.to_array()
            .iter()
            .zip(FIELD_BOUNDS.iter())
            .try_for_each(|(value, bounds)| check_bounds(*value, bounds))
    }

    /// Values in the order the models were trained on.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.nitrogen),
            f64::from(self.phosphorus),
            f64::from(self.potassium),
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }
}

fn check_bounds(value: f64, bounds: &FieldBounds) -> Result<(), FeatureError> {
    if !value.is_finite() {
        return Err(FeatureError::NotFinite {
            field: bounds.field,
        });
    }
    if value < bounds.min || value > bounds.max {
        return Err(FeatureError::OutOfRange {
            field: bounds.field,
            value,
            min: bounds.min,
            max: bounds.max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_vector_is_valid_and_ordered() {
        let v = FeatureVector::default();
        assert!(v.validate().is_ok());
        assert_eq!(v.to_array(), [90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 203.0]);
    }

    #[test]
    fn ph_sits_between_humidity_and_rainfall() {
        let v = FeatureVector {
            ph: 3.3,
            humidity: 55.0,
            rainfall: 120.0,
            ..FeatureVector::default()
        };
        let arr = v.to_array();
        assert_eq!(FEATURE_ORDER[5], "ph");
        assert_eq!(arr[4], 55.0);
        assert_eq!(arr[5], 3.3);
        assert_eq!(arr[6], 120.0);
    }

    #[rstest]
    #[case(FeatureVector { nitrogen: 201, ..FeatureVector::default() }, "Nitrogen")]
    #[case(FeatureVector { potassium: 500, ..FeatureVector::default() }, "Potassium")]
    #[case(FeatureVector { temperature: 60.1, ..FeatureVector::default() }, "Temperature")]
    #[case(FeatureVector { humidity: -0.5, ..FeatureVector::default() }, "Humidity")]
    #[case(FeatureVector { ph: 14.2, ..FeatureVector::default() }, "pH")]
    #[case(FeatureVector { rainfall: 501.0, ..FeatureVector::default() }, "Rainfall")]
    fn out_of_range_fields_are_named(#[case] v: FeatureVector, #[case] expected: &str) {
        match v.validate() {
            Err(FeatureError::OutOfRange { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let v = FeatureVector {
            temperature: f64::NAN,
            ..FeatureVector::default()
        };
        assert_eq!(
            v.validate(),
            Err(FeatureError::NotFinite {
                field: "Temperature"
            })
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let v = FeatureVector {
            nitrogen: 200,
            phosphorus: 0,
            potassium: 200,
            temperature: 60.0,
            humidity: 0.0,
            ph: 14.0,
            rainfall: 500.0,
        };
        assert!(v.validate().is_ok());
    }

    #[test]
    fn from_values_checks_length_and_integers() {
        assert_eq!(
            FeatureVector::from_values(&[1.0, 2.0]),
            Err(FeatureError::WrongLength {
                expected: 7,
                actual: 2
            })
        );
        assert!(matches!(
            FeatureVector::from_values(&[1.5, 2.0, 3.0, 20.0, 50.0, 6.0, 100.0]),
            Err(FeatureError::NotInteger { field: "Nitrogen", .. })
        ));
        let v = FeatureVector::from_values(&[90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 203.0]).unwrap();
        assert_eq!(v, FeatureVector::default());
    }
}
