//! Port roles and per-call buffer bindings.

use core::fmt;

use crate::descriptor::PortDirection;
use crate::error::HostError;

/// The four audio ports of the ADT plugin.
///
/// The discriminant is the host-facing port index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortRole {
    /// Left channel input (timing reference).
    InputLeft = 0,
    /// Right channel input (delayed).
    InputRight = 1,
    /// Left channel output.
    OutputLeft = 2,
    /// Right channel output.
    OutputRight = 3,
}

impl PortRole {
    /// Number of ports.
    pub const COUNT: usize = 4;

    /// All roles in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::InputLeft,
        Self::InputRight,
        Self::OutputLeft,
        Self::OutputRight,
    ];

    /// Maps a raw host port index to a role.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::InputLeft),
            1 => Some(Self::InputRight),
            2 => Some(Self::OutputLeft),
            3 => Some(Self::OutputRight),
            _ => None,
        }
    }

    /// Host-facing port index.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable port name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::InputLeft => "Input Left Channel",
            Self::InputRight => "Input Right Channel",
            Self::OutputLeft => "Output Left Channel",
            Self::OutputRight => "Output Right Channel",
        }
    }

    /// Data direction of the port.
    pub const fn direction(self) -> PortDirection {
        match self {
            Self::InputLeft | Self::InputRight => PortDirection::Input,
            Self::OutputLeft | Self::OutputRight => PortDirection::Output,
        }
    }
}

impl fmt::Display for PortRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A host buffer offered to [`PortBindings::connect`].
#[derive(Debug)]
pub enum PortBuffer<'a> {
    /// Read-only buffer for an input port.
    Input(&'a [f32]),
    /// Writable buffer for an output port.
    Output(&'a mut [f32]),
}

/// Buffers bound to the plugin ports for a single `run` call.
///
/// Binding a role again replaces the previous buffer for that role. The
/// bindings borrow the host's buffers and are consumed by
/// [`AdtInstance::run`](crate::AdtInstance::run), so nothing outlives the
/// call.
///
/// # Example
///
/// ```rust
/// use adt_host::{PortBindings, PortBuffer, PortRole};
///
/// let input = [0.0f32; 64];
/// let mut output = [0.0f32; 64];
///
/// let mut ports = PortBindings::new();
/// ports.connect(0, PortBuffer::Input(&input)).unwrap();
/// ports.connect(3, PortBuffer::Output(&mut output)).unwrap();
///
/// assert!(ports.is_connected(PortRole::InputLeft));
/// assert_eq!(ports.first_unconnected(), Some(PortRole::InputRight));
/// ```
#[derive(Debug, Default)]
pub struct PortBindings<'a> {
    input_left: Option<&'a [f32]>,
    input_right: Option<&'a [f32]>,
    output_left: Option<&'a mut [f32]>,
    output_right: Option<&'a mut [f32]>,
}

impl<'a> PortBindings<'a> {
    /// Creates bindings with no ports connected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds all four ports at once.
    pub fn stereo(
        input_left: &'a [f32],
        input_right: &'a [f32],
        output_left: &'a mut [f32],
        output_right: &'a mut [f32],
    ) -> Self {
        Self {
            input_left: Some(input_left),
            input_right: Some(input_right),
            output_left: Some(output_left),
            output_right: Some(output_right),
        }
    }

    /// Binds `buffer` to the port with raw host index `port`.
    ///
    /// # Errors
    ///
    /// - [`HostError::UnknownPort`] if `port` is not a valid index.
    /// - [`HostError::PortDirection`] if the buffer's direction does not
    ///   match the port's.
    pub fn connect(&mut self, port: usize, buffer: PortBuffer<'a>) -> Result<(), HostError> {
        let role = PortRole::from_index(port).ok_or(HostError::UnknownPort(port))?;

        match (role, buffer) {
            (PortRole::InputLeft, PortBuffer::Input(buf)) => self.input_left = Some(buf),
            (PortRole::InputRight, PortBuffer::Input(buf)) => self.input_right = Some(buf),
            (PortRole::OutputLeft, PortBuffer::Output(buf)) => self.output_left = Some(buf),
            (PortRole::OutputRight, PortBuffer::Output(buf)) => self.output_right = Some(buf),
            (role, _) => {
                return Err(HostError::PortDirection {
                    role,
                    expected: role.direction(),
                });
            }
        }
        Ok(())
    }

    /// Binds an input buffer to `role`.
    pub fn connect_input(&mut self, role: PortRole, buffer: &'a [f32]) -> Result<(), HostError> {
        self.connect(role.index(), PortBuffer::Input(buffer))
    }

    /// Binds an output buffer to `role`.
    pub fn connect_output(
        &mut self,
        role: PortRole,
        buffer: &'a mut [f32],
    ) -> Result<(), HostError> {
        self.connect(role.index(), PortBuffer::Output(buffer))
    }

    /// Returns `true` if `role` has a buffer bound.
    pub fn is_connected(&self, role: PortRole) -> bool {
        match role {
            PortRole::InputLeft => self.input_left.is_some(),
            PortRole::InputRight => self.input_right.is_some(),
            PortRole::OutputLeft => self.output_left.is_some(),
            PortRole::OutputRight => self.output_right.is_some(),
        }
    }

    /// Returns the lowest-indexed port with no buffer bound.
    pub fn first_unconnected(&self) -> Option<PortRole> {
        PortRole::ALL
            .into_iter()
            .find(|&role| !self.is_connected(role))
    }

    /// Splits into the four buffers, or returns the first unbound role.
    pub(crate) fn into_buffers(
        self,
    ) -> Result<(&'a [f32], &'a [f32], &'a mut [f32], &'a mut [f32]), PortRole> {
        let missing = self.first_unconnected();
        match (
            self.input_left,
            self.input_right,
            self.output_left,
            self.output_right,
        ) {
            (Some(il), Some(ir), Some(ol), Some(or)) => Ok((il, ir, ol, or)),
            _ => Err(missing.unwrap_or(PortRole::InputLeft)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_index_roundtrip() {
        for role in PortRole::ALL {
            assert_eq!(PortRole::from_index(role.index()), Some(role));
        }
        assert_eq!(PortRole::from_index(4), None);
    }

    #[test]
    fn role_display_uses_port_name() {
        assert_eq!(PortRole::OutputRight.to_string(), "Output Right Channel");
    }

    #[test]
    fn connect_rejects_unknown_port() {
        let buf = [0.0f32; 4];
        let mut ports = PortBindings::new();
        let err = ports.connect(7, PortBuffer::Input(&buf)).unwrap_err();
        assert!(matches!(err, HostError::UnknownPort(7)));
    }

    #[test]
    fn connect_rejects_wrong_direction() {
        let input = [0.0f32; 4];
        let mut output = [0.0f32; 4];
        let mut ports = PortBindings::new();

        let err = ports.connect(2, PortBuffer::Input(&input)).unwrap_err();
        assert!(matches!(
            err,
            HostError::PortDirection {
                role: PortRole::OutputLeft,
                ..
            }
        ));

        let err = ports
            .connect_output(PortRole::InputRight, &mut output)
            .unwrap_err();
        assert!(matches!(
            err,
            HostError::PortDirection {
                role: PortRole::InputRight,
                ..
            }
        ));
        assert!(ports.first_unconnected() == Some(PortRole::InputLeft));
    }

    #[test]
    fn rebinding_keeps_latest_buffer() {
        let first = [1.0f32; 2];
        let second = [2.0f32; 2];
        let mut out_l = [0.0f32; 2];
        let mut out_r = [0.0f32; 2];

        let mut ports = PortBindings::new();
        ports.connect_input(PortRole::InputLeft, &first).unwrap();
        ports.connect_input(PortRole::InputLeft, &second).unwrap();
        ports.connect_input(PortRole::InputRight, &first).unwrap();
        ports
            .connect_output(PortRole::OutputLeft, &mut out_l)
            .unwrap();
        ports
            .connect_output(PortRole::OutputRight, &mut out_r)
            .unwrap();

        let (il, ir, _, _) = ports.into_buffers().unwrap();
        assert_eq!(il, &second);
        assert_eq!(ir, &first);
    }

    #[test]
    fn into_buffers_reports_missing_role() {
        let input = [0.0f32; 2];
        let mut ports = PortBindings::new();
        ports.connect_input(PortRole::InputLeft, &input).unwrap();
        ports.connect_input(PortRole::InputRight, &input).unwrap();

        assert_eq!(ports.into_buffers().unwrap_err(), PortRole::OutputLeft);
    }
}
