use crate::components::{Axis, Axis3, AxisUpdate, Channel, Transform};
use crate::element::Element;

/// CSS property the transform descriptor is written to.
pub const TRANSFORM_PROPERTY: &str = "transform";

/// An element paired with its rotate/translate state.
///
/// Every component write recomputes the full transform descriptor and pushes
/// it to the element, replacing the previous value.
#[derive(Debug)]
pub struct Geometry<E> {
    element: E,
    transform: Transform,
}

impl<E: Element> Geometry<E> {
    pub fn new(element: E) -> Self {
        Self {
            element,
            transform: Transform::identity(),
        }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn rotation(&self) -> &Axis3 {
        &self.transform.rotate
    }

    pub fn translation(&self) -> &Axis3 {
        &self.transform.translate
    }

    /// Store one component and re-apply the descriptor. Returns the applied
    /// descriptor.
    pub fn set(&mut self, channel: Channel, axis: Axis, value: f64) -> String {
        self.transform.axes_mut(channel).set(axis, value);
        self.apply()
    }

    pub fn set_rotate(&mut self, axis: Axis, value: f64) -> String {
        self.set(Channel::Rotate, axis, value)
    }

    pub fn set_translate(&mut self, axis: Axis, value: f64) -> String {
        self.set(Channel::Translate, axis, value)
    }

    /// Write every provided component of `update`, in x, y, z order.
    ///
    /// Returns the last applied descriptor, or `None` when nothing was written.
    pub fn update(&mut self, channel: Channel, update: AxisUpdate) -> Option<String> {
        let mut applied = None;
        for axis in Axis::ALL {
            if let Some(value) = update.get(axis) {
                applied = Some(self.set(channel, axis, value));
            }
        }
        applied
    }

    fn apply(&self) -> String {
        let descriptor = self.transform.css();
        self.element.set_style(TRANSFORM_PROPERTY, &descriptor);
        descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::{Geometry, TRANSFORM_PROPERTY};
    use crate::components::{Axis, AxisUpdate, Channel};
    use crate::element::RecordingElement;

    #[test]
    fn nothing_is_written_before_first_mutation() {
        let geometry = Geometry::new(RecordingElement::new("face"));
        assert_eq!(geometry.element().style(TRANSFORM_PROPERTY), None);
        assert_eq!(geometry.rotation().x, 0.0);
        assert_eq!(geometry.translation().z, 0.0);
    }

    #[test]
    fn each_write_regenerates_the_descriptor() {
        let el = RecordingElement::new("face");
        let mut geometry = Geometry::new(el.clone());

        geometry.set_rotate(Axis::X, 20.0);
        assert_eq!(
            el.style(TRANSFORM_PROPERTY).as_deref(),
            Some("rotateX(20deg) rotateY(0deg) rotateZ(0deg) translateX(0px) translateY(0px) translateZ(0px)")
        );

        geometry.set_rotate(Axis::X, 35.0);
        let css = el.style(TRANSFORM_PROPERTY).unwrap_or_default();
        assert_eq!(css.matches("rotateX(").count(), 1);
        assert!(css.starts_with("rotateX(35deg) "));
        assert_eq!(el.style_writes(TRANSFORM_PROPERTY), 2);
    }

    #[test]
    fn returned_descriptor_matches_element() {
        let el = RecordingElement::new("pair");
        let mut geometry = Geometry::new(el.clone());
        let applied = geometry.set_translate(Axis::X, -12.5);
        assert_eq!(el.style(TRANSFORM_PROPERTY), Some(applied));
        assert_eq!(geometry.translation().x, -12.5);
    }

    #[test]
    fn values_are_stored_without_normalization() {
        let mut geometry = Geometry::new(RecordingElement::new("map"));
        geometry.set_rotate(Axis::Z, 725.0);
        assert_eq!(geometry.rotation().z, 725.0);
    }

    #[test]
    fn update_writes_each_provided_axis() {
        let el = RecordingElement::new("map");
        let mut geometry = Geometry::new(el.clone());
        let applied = geometry.update(
            Channel::Rotate,
            AxisUpdate {
                x: Some(10.0),
                z: Some(0.0),
                ..AxisUpdate::default()
            },
        );
        assert!(applied.is_some());
        assert_eq!(el.style_writes(TRANSFORM_PROPERTY), 2);
        assert_eq!(geometry.rotation().x, 10.0);

        assert_eq!(geometry.update(Channel::Rotate, AxisUpdate::default()), None);
        assert_eq!(el.style_writes(TRANSFORM_PROPERTY), 2);
    }
}
