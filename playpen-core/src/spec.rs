//! Static array descriptors for actions and observations.
use serde::{Deserialize, Serialize};

/// Element type of an array spec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DType {
    /// 32-bit float.
    F32,

    /// 8-bit unsigned integer, used for rendered images.
    U8,

    /// Boolean flags, e.g. success indicators.
    Bool,
}

/// Shape, dtype and bounds of an action or observation array.
///
/// A pure descriptor: the same spec is returned for every query, independent
/// of any stepping that happened in between. Bounds are scalars broadcast
/// over all elements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundedArraySpec {
    /// Array shape.
    pub shape: Vec<usize>,

    /// Element type.
    pub dtype: DType,

    /// Lower bound, broadcast over all elements.
    pub minimum: f32,

    /// Upper bound, broadcast over all elements.
    pub maximum: f32,
}

impl BoundedArraySpec {
    /// Creates a spec.
    pub fn new(shape: Vec<usize>, dtype: DType, minimum: f32, maximum: f32) -> Self {
        Self {
            shape,
            dtype,
            minimum,
            maximum,
        }
    }

    /// Total number of elements described by the shape.
    pub fn num_elements(&self) -> usize {
        self.shape.iter().product()
    }
}

#[cfg(test)]
mod tests {
    use super::{BoundedArraySpec, DType};

    #[test]
    fn num_elements() {
        let spec = BoundedArraySpec::new(vec![3, 8, 8], DType::U8, 0.0, 255.0);
        assert_eq!(spec.num_elements(), 192);
        assert_eq!(
            BoundedArraySpec::new(vec![4], DType::F32, 0.0, 1.0).num_elements(),
            4
        );
    }
}
