use std::fmt;
use std::ops::Deref;

use crate::error::{Error, Result};
use crate::network::settings::MAX_NODES_PER_LAYER;

/// Fixed-capacity vector of node values.
///
/// Sized for the largest possible layer so inputs and outputs can live on
/// the stack. Only the first `len()` entries are meaningful.
#[derive(Clone, Copy)]
pub struct Values {
    len: usize,
    values: [f64; MAX_NODES_PER_LAYER],
}

/// Values fed into the input layer.
pub type Input = Values;
/// Activations read from the output layer.
pub type Output = Values;

impl Values {
    pub const CAPACITY: usize = MAX_NODES_PER_LAYER;

    /// An empty vector (logical length 0).
    pub const fn empty() -> Values {
        Values {
            len: 0,
            values: [0.0; MAX_NODES_PER_LAYER],
        }
    }

    /// Copies `values` in, failing if there are more than [`Values::CAPACITY`].
    pub fn from_slice(values: &[f64]) -> Result<Values> {
        if values.len() > Self::CAPACITY {
            return Err(Error::CapacityExceeded {
                capacity: Self::CAPACITY,
                requested: values.len(),
            });
        }
        let mut out = Values::empty();
        out.values[..values.len()].copy_from_slice(values);
        out.len = values.len();
        Ok(out)
    }

    /// Appends one value, failing when full.
    pub fn push(&mut self, value: f64) -> Result<()> {
        if self.len == Self::CAPACITY {
            return Err(Error::CapacityExceeded {
                capacity: Self::CAPACITY,
                requested: self.len + 1,
            });
        }
        self.values[self.len] = value;
        self.len += 1;
        Ok(())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values[..self.len]
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values[..self.len]
    }

    /// Sets the logical length, zero-filling any newly exposed entries.
    pub(crate) fn resize(&mut self, len: usize) {
        debug_assert!(len <= Self::CAPACITY);
        for v in &mut self.values[self.len.min(len)..len] {
            *v = 0.0;
        }
        self.len = len;
    }
}

impl Default for Values {
    fn default() -> Self {
        Values::empty()
    }
}

impl PartialEq for Values {
    fn eq(&self, other: &Values) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Deref for Values {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        self.as_slice()
    }
}

impl fmt::Debug for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl TryFrom<&[f64]> for Values {
    type Error = Error;

    fn try_from(values: &[f64]) -> Result<Values> {
        Values::from_slice(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_keeps_logical_length() {
        let v = Values::from_slice(&[1.0, 0.0, -2.0]).unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(v.as_slice(), &[1.0, 0.0, -2.0]);
        assert!(Values::empty().is_empty());
    }

    #[test]
    fn from_slice_rejects_oversized_input() {
        let too_many = vec![0.0; Values::CAPACITY + 1];
        assert!(matches!(
            Values::from_slice(&too_many),
            Err(Error::CapacityExceeded { requested, .. }) if requested == Values::CAPACITY + 1
        ));
    }

    #[test]
    fn push_stops_at_capacity() {
        let mut v = Values::from_slice(&[0.5; Values::CAPACITY - 1]).unwrap();
        v.push(1.0).unwrap();
        assert_eq!(v.len(), Values::CAPACITY);
        assert!(v.push(2.0).is_err());
    }

    #[test]
    fn equality_ignores_entries_past_the_logical_length() {
        let mut a = Values::from_slice(&[1.0, 2.0, 3.0]).unwrap();
        a.resize(2);
        let b = Values::from_slice(&[1.0, 2.0]).unwrap();
        assert_eq!(a, b);
    }
}
