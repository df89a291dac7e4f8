use serde::{Deserialize, Serialize};

use crate::utils::errors::FdmError;

/// Named control quantity carried by a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelType {
    Thrust,
    Elevator,
    Aileron,
    Rudder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Channel {
    kind: ChannelType,
    direction: Direction,
    value: f64,
}

/// Registry of indexed input/output channels.
///
/// Indices are handed out in declaration order and are never reused or
/// renumbered. Declaring a (type, direction) pair a second time returns the
/// index it already has.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariableIo {
    channels: Vec<Channel>,
}

impl VariableIo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, kind: ChannelType, direction: Direction) -> usize {
        if let Some(index) = self.index_of(kind, direction) {
            return index;
        }
        self.channels.push(Channel {
            kind,
            direction,
            value: 0.0,
        });
        self.channels.len() - 1
    }

    /// Zero every channel value, keeping the declared indices.
    pub fn reset_values(&mut self) {
        for channel in &mut self.channels {
            channel.value = 0.0;
        }
    }

    pub fn index_of(&self, kind: ChannelType, direction: Direction) -> Option<usize> {
        self.channels
            .iter()
            .position(|c| c.kind == kind && c.direction == direction)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn kind(&self, index: usize) -> Option<ChannelType> {
        self.channels.get(index).map(|c| c.kind)
    }

    fn channel(&self, index: usize, expected: Direction) -> Result<&Channel, FdmError> {
        let channel = self
            .channels
            .get(index)
            .ok_or(FdmError::UndeclaredChannel(index))?;
        if channel.direction != expected {
            return Err(FdmError::ChannelDirection { index, expected });
        }
        Ok(channel)
    }

    fn channel_mut(&mut self, index: usize, expected: Direction) -> Result<&mut Channel, FdmError> {
        let channel = self
            .channels
            .get_mut(index)
            .ok_or(FdmError::UndeclaredChannel(index))?;
        if channel.direction != expected {
            return Err(FdmError::ChannelDirection { index, expected });
        }
        Ok(channel)
    }

    /// Current value of an input channel, 0.0 until something sets it.
    pub fn input(&self, index: usize) -> Result<f64, FdmError> {
        Ok(self.channel(index, Direction::In)?.value)
    }

    pub fn set_input(&mut self, index: usize, value: f64) -> Result<(), FdmError> {
        self.channel_mut(index, Direction::In)?.value = value;
        Ok(())
    }

    pub fn output(&self, index: usize) -> Result<f64, FdmError> {
        Ok(self.channel(index, Direction::Out)?.value)
    }

    pub fn set_output(&mut self, index: usize, value: f64) -> Result<(), FdmError> {
        self.channel_mut(index, Direction::Out)?.value = value;
        Ok(())
    }
}
