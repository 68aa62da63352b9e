//! Layered environment state.
use crate::sprite::Sprite;

/// Named, ordered sprite layers supplied by the environment each step.
///
/// Layer order is insertion order, which is also draw order: later layers
/// draw over earlier ones. Plugins receive the state fresh every tick and do
/// not retain it.
///
/// Looking up a name that was never added panics. A bad layer name in a
/// plugin configuration is a programming error, not a runtime condition.
#[derive(Clone, Debug, Default)]
pub struct State {
    layers: Vec<(String, Vec<Sprite>)>,
}

impl State {
    /// Creates a state with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer at the end of the draw order and returns `self`.
    pub fn with_layer(mut self, name: impl Into<String>, sprites: Vec<Sprite>) -> Self {
        self.add_layer(name, sprites);
        self
    }

    /// Adds a layer at the end of the draw order.
    pub fn add_layer(&mut self, name: impl Into<String>, sprites: Vec<Sprite>) {
        self.layers.push((name.into(), sprites));
    }

    /// Sprites of the given layer, in draw order.
    ///
    /// Panics if the layer does not exist.
    pub fn layer(&self, name: &str) -> &[Sprite] {
        self.layers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, sprites)| sprites.as_slice())
            .unwrap_or_else(|| panic!("no such layer: {}", name))
    }

    /// Mutable sprites of the given layer.
    ///
    /// Panics if the layer does not exist.
    pub fn layer_mut(&mut self, name: &str) -> &mut Vec<Sprite> {
        self.layers
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, sprites)| sprites)
            .unwrap_or_else(|| panic!("no such layer: {}", name))
    }

    /// Layer names in draw order.
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|(n, _)| n.as_str())
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the state has no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
