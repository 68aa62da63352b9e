//! Gym-style space descriptors.
use playpen_core::{BoundedArraySpec, DType};
use serde::{Deserialize, Serialize};

/// A Gym-style action or observation space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Space {
    /// Bounded array with uniform bounds broadcast over the shape.
    Box {
        /// Lower bound of every element.
        low: f32,
        /// Upper bound of every element.
        high: f32,
        /// Array shape.
        shape: Vec<usize>,
        /// Element type.
        dtype: DType,
    },

    /// Named product of spaces, in observer order.
    Dict(Vec<(String, Space)>),

    /// Anonymous product of spaces.
    Tuple(Vec<Space>),
}

/// Converts a stepping-interface array spec into a Gym space.
pub fn spec_to_space(spec: &BoundedArraySpec) -> Space {
    Space::Box {
        low: spec.minimum,
        high: spec.maximum,
        shape: spec.shape.clone(),
        dtype: spec.dtype,
    }
}

/// Converts a composite spec list into a Tuple space.
pub fn specs_to_space(specs: &[BoundedArraySpec]) -> Space {
    Space::Tuple(specs.iter().map(spec_to_space).collect())
}

#[cfg(test)]
mod tests {
    use super::{spec_to_space, specs_to_space, Space};
    use playpen_core::{BoundedArraySpec, DType};

    #[test]
    fn bounded_spec_becomes_box() {
        let spec = BoundedArraySpec::new(vec![4], DType::F32, 0.0, 1.0);
        assert_eq!(
            spec_to_space(&spec),
            Space::Box {
                low: 0.0,
                high: 1.0,
                shape: vec![4],
                dtype: DType::F32,
            }
        );
    }

    #[test]
    fn spec_list_becomes_tuple() {
        let specs = [
            BoundedArraySpec::new(vec![4], DType::F32, 0.0, 1.0),
            BoundedArraySpec::new(vec![2], DType::F32, -1.0, 1.0),
        ];
        match specs_to_space(&specs) {
            Space::Tuple(items) => assert_eq!(items.len(), 2),
            _ => panic!("expected a tuple space"),
        }
    }
}
