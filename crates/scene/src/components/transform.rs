use serde::{Deserialize, Serialize};

use super::{Axis, Axis3};

/// Which half of a [`Transform`] an axis write targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    Rotate,
    Translate,
}

impl Channel {
    fn function(self) -> &'static str {
        match self {
            Channel::Rotate => "rotate",
            Channel::Translate => "translate",
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Channel::Rotate => "deg",
            Channel::Translate => "px",
        }
    }
}

/// Rotation (degrees) and translation (pixels) along the three axes.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub rotate: Axis3,
    pub translate: Axis3,
}

impl Transform {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn axes(&self, channel: Channel) -> &Axis3 {
        match channel {
            Channel::Rotate => &self.rotate,
            Channel::Translate => &self.translate,
        }
    }

    pub fn axes_mut(&mut self, channel: Channel) -> &mut Axis3 {
        match channel {
            Channel::Rotate => &mut self.rotate,
            Channel::Translate => &mut self.translate,
        }
    }

    /// CSS `transform` value: all rotations, then all translations, each in
    /// x, y, z order.
    pub fn css(&self) -> String {
        let mut parts = Vec::with_capacity(6);
        for channel in [Channel::Rotate, Channel::Translate] {
            let axes = self.axes(channel);
            for axis in Axis::ALL {
                parts.push(format!(
                    "{}{}({}{})",
                    channel.function(),
                    axis.suffix(),
                    css_number(axes.get(axis)),
                    channel.unit()
                ));
            }
        }
        parts.join(" ")
    }
}

fn css_number(value: f64) -> String {
    // `-0` is valid CSS but noisy; print it as `0`.
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}
