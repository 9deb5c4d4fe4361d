//! Thermodynamic conditions as a map of named scalar and vector quantities.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::numeric::{Real, Tolerances, nearly_equal};

/// Value of a single named condition.
///
/// Serialized untagged: a scalar is a JSON number, a vector is a JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Scalar(Real),
    Vector(Vec<Real>),
}

impl ConditionValue {
    /// Short description of the value's shape, used in mismatch messages.
    pub fn shape(&self) -> String {
        match self {
            Self::Scalar(_) => "scalar".to_string(),
            Self::Vector(v) => format!("vector[{}]", v.len()),
        }
    }

    /// True if both values are scalars, or both are vectors of equal length.
    pub fn same_shape(&self, other: &ConditionValue) -> bool {
        match (self, other) {
            (Self::Scalar(_), Self::Scalar(_)) => true,
            (Self::Vector(a), Self::Vector(b)) => a.len() == b.len(),
            _ => false,
        }
    }

    fn components(&self) -> &[Real] {
        match self {
            Self::Scalar(v) => std::slice::from_ref(v),
            Self::Vector(v) => v,
        }
    }
}

impl From<Real> for ConditionValue {
    fn from(value: Real) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<Real>> for ConditionValue {
    fn from(value: Vec<Real>) -> Self {
        Self::Vector(value)
    }
}

/// Named thermodynamic conditions for one run, e.g. temperature and
/// parametric chemical potential.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conditions {
    values: BTreeMap<String, ConditionValue>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style scalar insert.
    pub fn with_scalar(mut self, name: impl Into<String>, value: Real) -> Self {
        self.insert_scalar(name, value);
        self
    }

    /// Builder-style vector insert.
    pub fn with_vector(mut self, name: impl Into<String>, value: Vec<Real>) -> Self {
        self.insert_vector(name, value);
        self
    }

    pub fn insert_scalar(&mut self, name: impl Into<String>, value: Real) {
        self.values.insert(name.into(), ConditionValue::Scalar(value));
    }

    pub fn insert_vector(&mut self, name: impl Into<String>, value: Vec<Real>) {
        self.values.insert(name.into(), ConditionValue::Vector(value));
    }

    pub fn get(&self, name: &str) -> Option<&ConditionValue> {
        self.values.get(name)
    }

    /// Scalar value by name, `None` if absent or not a scalar.
    pub fn scalar(&self, name: &str) -> Option<Real> {
        match self.values.get(name) {
            Some(ConditionValue::Scalar(v)) => Some(*v),
            _ => None,
        }
    }

    /// Vector value by name, `None` if absent or not a vector.
    pub fn vector(&self, name: &str) -> Option<&[Real]> {
        match self.values.get(name) {
            Some(ConditionValue::Vector(v)) => Some(v),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConditionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check that `other` has the same keys and, per key, the same value
    /// shape. Reports the first offending key.
    pub fn check_compatible(&self, other: &Conditions) -> CoreResult<()> {
        for (name, value) in &self.values {
            let Some(other_value) = other.values.get(name) else {
                return Err(CoreError::mismatch(name, "missing from increment"));
            };
            if !value.same_shape(other_value) {
                return Err(CoreError::mismatch(
                    name,
                    format!("{} vs {}", value.shape(), other_value.shape()),
                ));
            }
        }
        if let Some(name) = other.values.keys().find(|k| !self.values.contains_key(*k)) {
            return Err(CoreError::mismatch(name, "missing from initial conditions"));
        }
        Ok(())
    }

    /// True if the two maps are not compatible.
    pub fn is_mismatched(&self, other: &Conditions) -> bool {
        self.check_compatible(other).is_err()
    }

    /// Reject NaN and infinite components.
    pub fn check_finite(&self) -> CoreResult<()> {
        for (name, value) in &self.values {
            if let Some(bad) = value.components().iter().find(|v| !v.is_finite()) {
                return Err(CoreError::NonFinite {
                    what: name.clone(),
                    value: *bad,
                });
            }
        }
        Ok(())
    }

    /// Return `self + steps * increment`, elementwise.
    ///
    /// Both maps must be compatible.
    pub fn incremented(&self, increment: &Conditions, steps: usize) -> CoreResult<Conditions> {
        self.check_compatible(increment)?;
        let k = steps as Real;
        let values = self
            .values
            .iter()
            .map(|(name, value)| {
                let next = match (value, increment.values.get(name)) {
                    (ConditionValue::Scalar(a), Some(ConditionValue::Scalar(d))) => {
                        ConditionValue::Scalar(a + k * d)
                    }
                    (ConditionValue::Vector(a), Some(ConditionValue::Vector(d))) => {
                        ConditionValue::Vector(a.iter().zip(d).map(|(a, d)| a + k * d).collect())
                    }
                    _ => return Err(CoreError::mismatch(name, "shape changed")),
                };
                Ok((name.clone(), next))
            })
            .collect::<CoreResult<_>>()?;
        Ok(Conditions { values })
    }

    /// Compare values within tolerance. Maps with different schemas are
    /// never equal.
    pub fn approx_eq(&self, other: &Conditions, tol: Tolerances) -> bool {
        self.check_compatible(other).is_ok()
            && self.values.iter().all(|(name, value)| {
                value
                    .components()
                    .iter()
                    .zip(other.values.get(name).map_or(&[][..], |v| v.components()))
                    .all(|(a, b)| nearly_equal(*a, *b, tol))
            })
    }
}

impl FromIterator<(String, ConditionValue)> for Conditions {
    fn from_iter<I: IntoIterator<Item = (String, ConditionValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Conditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                ConditionValue::Scalar(v) => write!(f, "{name}: {v}")?,
                ConditionValue::Vector(v) => write!(f, "{name}: {v:?}")?,
            }
        }
        write!(f, "}}")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn incremented_matches_formula(
            t0 in -1e4_f64..1e4,
            dt in -1e3_f64..1e3,
            mu in prop::collection::vec((-10.0_f64..10.0, -1.0_f64..1.0), 1..4),
            k in 0_usize..50,
        ) {
            let (mu0, dmu): (Vec<f64>, Vec<f64>) = mu.into_iter().unzip();
            let initial = Conditions::new()
                .with_scalar("temperature", t0)
                .with_vector("param_chem_pot", mu0.clone());
            let increment = Conditions::new()
                .with_scalar("temperature", dt)
                .with_vector("param_chem_pot", dmu.clone());

            let next = initial.incremented(&increment, k).unwrap();
            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
            let t = next.scalar("temperature").unwrap();
            prop_assert!(nearly_equal(t, t0 + k as f64 * dt, tol));
            for (i, v) in next.vector("param_chem_pot").unwrap().iter().enumerate() {
                prop_assert!(nearly_equal(*v, mu0[i] + k as f64 * dmu[i], tol));
            }
        }

        #[test]
        fn vector_length_mismatch_always_fails(n in 1_usize..5, m in 1_usize..5) {
            prop_assume!(n != m);
            let a = Conditions::new().with_vector("mol_composition", vec![0.0; n]);
            let b = Conditions::new().with_vector("mol_composition", vec![0.0; m]);
            prop_assert!(a.is_mismatched(&b));
            prop_assert!(a.incremented(&b, 1).is_err());
        }
    }
}
