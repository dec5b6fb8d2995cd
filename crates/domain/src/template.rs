//! Templated values — constants or functions of the trigger context.

use std::fmt;
use std::sync::Arc;

/// A value that is either fixed at configuration time or computed from the
/// context `C` each time an action is played.
pub enum Templatable<T, C> {
    Static(T),
    Dynamic(Arc<dyn Fn(&C) -> T + Send + Sync>),
}

impl<T, C> Templatable<T, C> {
    /// Build a dynamic value from a resolver function.
    pub fn from_fn<F>(resolver: F) -> Self
    where
        F: Fn(&C) -> T + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(resolver))
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static(_))
    }
}

impl<T: Clone, C> Templatable<T, C> {
    /// Resolve the value against `ctx`.
    pub fn value(&self, ctx: &C) -> T {
        match self {
            Self::Static(value) => value.clone(),
            Self::Dynamic(resolver) => resolver(ctx),
        }
    }
}

impl<T: Clone, C> Clone for Templatable<T, C> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(value) => Self::Static(value.clone()),
            Self::Dynamic(resolver) => Self::Dynamic(Arc::clone(resolver)),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Templatable<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(<fn>)"),
        }
    }
}

impl<T, C> From<T> for Templatable<T, C> {
    fn from(value: T) -> Self {
        Self::Static(value)
    }
}

impl<C> From<&str> for Templatable<String, C> {
    fn from(value: &str) -> Self {
        Self::Static(value.to_string())
    }
}
