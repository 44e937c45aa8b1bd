//! Board layers and the layer stack.

use serde::{Deserialize, Serialize};

/// Top copper layer name.
pub const LAYER_TOP_COPPER: &str = "top_cu";
/// Bottom copper layer name.
pub const LAYER_BOTTOM_COPPER: &str = "bot_cu";
/// Board outline drawing layer.
pub const LAYER_BOARD_OUTLINES: &str = "board_outlines";
/// Component courtyards on the top side.
pub const LAYER_TOP_COURTYARD: &str = "top_courtyard";
/// Component courtyards on the bottom side.
pub const LAYER_BOTTOM_COURTYARD: &str = "bot_courtyard";

/// Name of the n-th inner copper layer (1-based).
pub fn inner_copper_layer(n: usize) -> String {
    format!("in{n}_cu")
}

/// A single board layer, identified by its stable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    name: String,
    copper: bool,
    enabled: bool,
}

impl Layer {
    fn new(name: impl Into<String>, copper: bool) -> Self {
        Layer {
            name: name.into(),
            copper,
            enabled: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_copper(&self) -> bool {
        self.copper
    }

    pub fn is_top(&self) -> bool {
        self.name.starts_with("top_")
    }

    pub fn is_bottom(&self) -> bool {
        self.name.starts_with("bot_")
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// The board's layer stack: two outer copper layers, a configurable number
/// of inner copper layers, and the non-copper drawing layers the DRC needs
/// (board outlines and the two courtyard layers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl LayerStack {
    pub fn new(inner_copper_count: usize) -> Self {
        let mut layers = vec![Layer::new(LAYER_TOP_COPPER, true)];
        for n in 1..=inner_copper_count {
            layers.push(Layer::new(inner_copper_layer(n), true));
        }
        layers.push(Layer::new(LAYER_BOTTOM_COPPER, true));
        layers.push(Layer::new(LAYER_BOARD_OUTLINES, false));
        layers.push(Layer::new(LAYER_TOP_COURTYARD, false));
        layers.push(Layer::new(LAYER_BOTTOM_COURTYARD, false));
        LayerStack { layers }
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn copper_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|l| l.copper)
    }

    /// Copper layers that take part in checks.
    pub fn enabled_copper_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|l| l.copper && l.enabled)
    }

    pub fn set_layer_enabled(&mut self, name: &str, enabled: bool) {
        if let Some(layer) = self.layers.iter_mut().find(|l| l.name == name) {
            layer.enabled = enabled;
        }
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        LayerStack::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_layer_stack() {
        let stack = LayerStack::new(0);
        let copper: Vec<_> = stack.copper_layers().map(|l| l.name().to_string()).collect();
        assert_eq!(copper, vec![LAYER_TOP_COPPER, LAYER_BOTTOM_COPPER]);
        assert!(stack.layer(LAYER_BOARD_OUTLINES).is_some());
        assert!(!stack.layer(LAYER_TOP_COURTYARD).unwrap().is_copper());
    }

    #[test]
    fn test_inner_layers_and_disable() {
        let mut stack = LayerStack::new(2);
        assert_eq!(stack.copper_layers().count(), 4);
        stack.set_layer_enabled("in2_cu", false);
        assert_eq!(stack.enabled_copper_layers().count(), 3);
    }

    #[test]
    fn test_side_predicates() {
        let stack = LayerStack::new(0);
        assert!(stack.layer(LAYER_TOP_COPPER).unwrap().is_top());
        assert!(stack.layer(LAYER_BOTTOM_COPPER).unwrap().is_bottom());
        assert!(!stack.layer(LAYER_BOARD_OUTLINES).unwrap().is_top());
    }
}
