//! Static plugin metadata.
//!
//! Everything a host reads once at load time: identity strings, capability
//! flags and the four audio ports.

use crate::port::PortRole;

/// Unique plugin ID registered for ADT.
pub const UNIQUE_ID: u32 = 4305;

/// Plugin capability flags, bit-compatible with LADSPA `LADSPA_PROPERTY_*`.
///
/// # Example
///
/// ```rust
/// use adt_host::PluginProperties;
///
/// let props = PluginProperties::HARD_RT_CAPABLE;
/// assert!(props.contains(PluginProperties::HARD_RT_CAPABLE));
/// assert!(!props.contains(PluginProperties::INPLACE_BROKEN));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PluginProperties(u32);

impl PluginProperties {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Plugin has a real-time dependency (e.g. listens to a MIDI device).
    pub const REALTIME: Self = Self(1 << 0);
    /// Plugin fails if input and output buffers alias.
    pub const INPLACE_BROKEN: Self = Self(1 << 1);
    /// Plugin is safe to run on a hard real-time audio thread.
    pub const HARD_RT_CAPABLE: Self = Self(1 << 2);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Raw bit value.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// Data direction of a port, seen from the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    /// Host writes, plugin reads.
    Input,
    /// Plugin writes, host reads.
    Output,
}

/// Kind of data carried by a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    /// One `f32` per sample.
    Audio,
    /// One `f32` per block.
    Control,
}

/// Metadata for one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortDescriptor {
    /// Port role (also its index).
    pub role: PortRole,
    /// Human-readable port name.
    pub name: &'static str,
    /// Data direction.
    pub direction: PortDirection,
    /// Data kind.
    pub kind: PortKind,
}

/// Plugin descriptor handed to the host.
///
/// Built on demand by [`descriptor`] and owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// Registered unique ID ([`UNIQUE_ID`]).
    pub unique_id: u32,
    /// Short label without whitespace.
    pub label: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Author.
    pub maker: &'static str,
    /// License / copyright notice.
    pub copyright: &'static str,
    /// Capability flags.
    pub properties: PluginProperties,
    /// Ports, indexed by [`PortRole::index`].
    pub ports: [PortDescriptor; PortRole::COUNT],
}

impl PluginDescriptor {
    /// The ADT descriptor.
    pub const fn adt() -> Self {
        Self {
            unique_id: UNIQUE_ID,
            label: "ADT",
            name: "ADT (Artificial Double Tracking)",
            maker: "Tyler Hayes (tgh@pdx.edu)",
            copyright: "GPL",
            properties: PluginProperties::HARD_RT_CAPABLE,
            ports: [
                port(PortRole::InputLeft),
                port(PortRole::InputRight),
                port(PortRole::OutputLeft),
                port(PortRole::OutputRight),
            ],
        }
    }

    /// Number of ports.
    pub const fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Port metadata by raw index.
    pub fn port(&self, index: usize) -> Option<&PortDescriptor> {
        self.ports.get(index)
    }
}

impl Default for PluginDescriptor {
    fn default() -> Self {
        Self::adt()
    }
}

const fn port(role: PortRole) -> PortDescriptor {
    PortDescriptor {
        role,
        name: role.name(),
        direction: role.direction(),
        kind: PortKind::Audio,
    }
}

/// Returns the descriptor for plugin `index` in this library.
///
/// The library holds a single plugin, so only index 0 yields a descriptor.
pub fn descriptor(index: usize) -> Option<PluginDescriptor> {
    match index {
        0 => Some(PluginDescriptor::adt()),
        _ => None,
    }
}
