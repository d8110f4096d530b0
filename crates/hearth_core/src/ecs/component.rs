//! # Component System
//!
//! Components are pure data containers with no behavior.
//! Each component reports a stable name; entities store components keyed by
//! that name, and systems find the entities they care about by asking for
//! sets of names.
//!
//! The core never inspects component internals. Collaborators that need the
//! concrete value use the checked downcasts on `dyn Component`, which fail
//! explicitly instead of trusting the name.

use std::any::Any;

/// Type-erasure helper implemented for every `'static` type.
///
/// This is what lets a `&dyn Component` be viewed as `&dyn Any`.
pub trait AsAny: Any {
    /// Returns `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Returns `self` as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Marker trait for ECS components.
///
/// The name must be stable for the lifetime of the value and unique within
/// the taxonomy of component kinds (`"position"`, `"size"`, ...). Two
/// components reporting the same name replace each other on an entity.
///
/// # Example
///
/// ```rust
/// use hearth_core::Component;
///
/// #[derive(Debug)]
/// struct Position {
///     x: f32,
///     y: f32,
/// }
///
/// impl Component for Position {
///     fn name(&self) -> &str {
///         "position"
///     }
/// }
/// ```
pub trait Component: AsAny + Send + Sync {
    /// Identifier the component is stored and filtered under.
    fn name(&self) -> &str;
}

impl dyn Component {
    /// Returns `true` if the concrete type behind this component is `T`.
    #[inline]
    #[must_use]
    pub fn is<T: Component>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Returns the concrete value if it is a `T`.
    #[inline]
    #[must_use]
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Returns the concrete value mutably if it is a `T`.
    #[inline]
    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl std::fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Component").field(&self.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }

    impl Component for Position {
        fn name(&self) -> &str {
            "position"
        }
    }

    struct Size;

    impl Component for Size {
        fn name(&self) -> &str {
            "size"
        }
    }

    #[test]
    fn test_downcast_matches_concrete_type() {
        let component: Box<dyn Component> = Box::new(Position { x: 1.0, y: 2.0 });

        assert!(component.is::<Position>());
        assert!(!component.is::<Size>());
        assert_eq!(
            component.downcast_ref::<Position>(),
            Some(&Position { x: 1.0, y: 2.0 })
        );
        assert!(component.downcast_ref::<Size>().is_none());
    }

    #[test]
    fn test_downcast_mut_writes_through() {
        let mut boxed: Box<dyn Component> = Box::new(Position { x: 0.0, y: 0.0 });

        if let Some(pos) = boxed.downcast_mut::<Position>() {
            pos.x = 5.0;
        }

        let pos = boxed.downcast_ref::<Position>().unwrap();
        assert!((pos.x - 5.0).abs() < f32::EPSILON);
        assert_eq!(boxed.name(), "position");
    }
}
