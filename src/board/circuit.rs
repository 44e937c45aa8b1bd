//! The circuit the board implements: net signals and component instances.
//!
//! The circuit is the electrical ground truth; the board carries its
//! physical realization. Two board objects are on the same net iff they
//! reference the same [`NetSignal`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An electrical net identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetSignal {
    pub uuid: Uuid,
    pub name: String,
}

/// A component of the circuit, placed on the board as a device (unless it
/// is schematic-only, e.g. a supply symbol).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInstance {
    pub uuid: Uuid,
    pub name: String,
    pub schematic_only: bool,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Circuit {
    net_signals: Vec<NetSignal>,
    component_instances: Vec<ComponentInstance>,
}

impl Circuit {
    pub fn new() -> Self {
        Circuit::default()
    }

    pub fn add_net_signal(&mut self, name: impl Into<String>) -> Uuid {
        let uuid = Uuid::new_v4();
        self.net_signals.push(NetSignal {
            uuid,
            name: name.into(),
        });
        uuid
    }

    pub fn add_component_instance(
        &mut self,
        name: impl Into<String>,
        schematic_only: bool,
    ) -> Uuid {
        let uuid = Uuid::new_v4();
        self.component_instances.push(ComponentInstance {
            uuid,
            name: name.into(),
            schematic_only,
        });
        uuid
    }

    pub fn net_signals(&self) -> &[NetSignal] {
        &self.net_signals
    }

    pub fn net_signal(&self, uuid: Uuid) -> Option<&NetSignal> {
        self.net_signals.iter().find(|n| n.uuid == uuid)
    }

    /// Display name of a net, `"(no net)"` for isolated copper.
    pub fn net_name(&self, net: Option<Uuid>) -> String {
        net.and_then(|uuid| self.net_signal(uuid))
            .map(|n| n.name.clone())
            .unwrap_or_else(|| "(no net)".to_string())
    }

    pub fn component_instances(&self) -> &[ComponentInstance] {
        &self.component_instances
    }

    pub fn component_instance(&self, uuid: Uuid) -> Option<&ComponentInstance> {
        self.component_instances.iter().find(|c| c.uuid == uuid)
    }

    /// Merges net `from` into net `to`: `from` disappears from the signal
    /// list. The board is responsible for re-pointing its objects.
    pub fn merge_net_signals(&mut self, from: Uuid, to: Uuid) {
        if from != to {
            self.net_signals.retain(|n| n.uuid != from);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_lookup_and_names() {
        let mut circuit = Circuit::new();
        let gnd = circuit.add_net_signal("GND");
        assert_eq!(circuit.net_signal(gnd).unwrap().name, "GND");
        assert_eq!(circuit.net_name(Some(gnd)), "GND");
        assert_eq!(circuit.net_name(None), "(no net)");
    }

    #[test]
    fn test_merge_removes_source_signal() {
        let mut circuit = Circuit::new();
        let a = circuit.add_net_signal("A");
        let b = circuit.add_net_signal("B");
        circuit.merge_net_signals(a, b);
        assert!(circuit.net_signal(a).is_none());
        assert!(circuit.net_signal(b).is_some());
    }
}
