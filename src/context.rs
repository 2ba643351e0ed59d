//! An immutable, tree-structured carrier of call-scoped values.
//!
//! Rust has no ambient request context, so this module supplies one: a
//! cheaply clonable handle over a chain of typed associations. Deriving a
//! child never mutates the parent, and dropping a child never affects the
//! parent, so a context can be handed down a call tree (or across threads)
//! freely.
//!
//! Associations are keyed by Rust type rather than by name. A consumer that
//! wants a private slot wraps its payload in an unexported newtype; no other
//! code can construct that type, so no other code can read or shadow the
//! slot.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// One association in the chain. Each derivation adds exactly one node.
struct Node {
    parent: Option<Arc<Node>>,
    key: TypeId,
    value: Arc<dyn Any + Send + Sync>,
}

/// An immutable context handle.
///
/// A `Context` is a point in a derivation tree. [`Context::with_value`]
/// produces a child that sees everything the parent sees plus one new
/// association; [`Context::get`] resolves a type to the nearest association
/// on the path back to the root.
///
/// Cloning is an `Arc` bump; clones share the chain.
///
/// ```
/// use ctxmeta::Context;
///
/// struct Deadline(u64);
///
/// let root = Context::new();
/// let ctx = root.with_value(Deadline(30));
/// assert_eq!(ctx.get::<Deadline>().map(|d| d.0), Some(30));
/// assert!(root.get::<Deadline>().is_none());
/// ```
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// Creates a root context with no associations.
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// Derives a child context carrying `value`, keyed by its type.
    ///
    /// The child shadows any ancestor association of the same type; the
    /// ancestor itself is untouched and keeps resolving to its own value.
    #[must_use]
    pub fn with_value<T>(&self, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            head: Some(Arc::new(Node {
                parent: self.head.clone(),
                key: TypeId::of::<T>(),
                value: Arc::new(value),
            })),
        }
    }

    /// Resolves the nearest association of type `T`, walking from this
    /// context back towards the root. Returns `None` if no ancestor carries
    /// one.
    pub fn get<T>(&self) -> Option<&T>
    where
        T: Any + Send + Sync,
    {
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            if current.key == TypeId::of::<T>() {
                return current.value.downcast_ref::<T>();
            }
            node = current.parent.as_deref();
        }
        None
    }

    /// Number of associations on the path from this context to the root.
    fn depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            depth += 1;
            node = current.parent.as_deref();
        }
        depth
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("depth", &self.depth())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct UserSlot(String);

    #[derive(Debug, PartialEq)]
    struct RequestSlot(u32);

    #[test]
    fn root_context_resolves_nothing() {
        let ctx = Context::new();
        assert!(ctx.get::<UserSlot>().is_none());
        assert!(ctx.get::<RequestSlot>().is_none());
    }

    #[test]
    fn child_sees_own_and_ancestor_values() {
        let root = Context::new();
        let with_user = root.with_value(UserSlot("southclaws".to_string()));
        let with_request = with_user.with_value(RequestSlot(42));

        assert_eq!(
            with_request.get::<UserSlot>(),
            Some(&UserSlot("southclaws".to_string()))
        );
        assert_eq!(with_request.get::<RequestSlot>(), Some(&RequestSlot(42)));
    }

    #[test]
    fn nearest_association_shadows_ancestors() {
        let ctx = Context::new()
            .with_value(RequestSlot(1))
            .with_value(RequestSlot(2));

        assert_eq!(ctx.get::<RequestSlot>(), Some(&RequestSlot(2)));
    }

    #[test]
    fn derivation_leaves_parent_untouched() {
        let parent = Context::new().with_value(RequestSlot(1));
        let _child = parent.with_value(RequestSlot(2));

        assert_eq!(parent.get::<RequestSlot>(), Some(&RequestSlot(1)));
    }

    #[test]
    fn clones_share_the_chain() {
        let ctx = Context::new().with_value(UserSlot("a".to_string()));
        let clone = ctx.clone();

        assert_eq!(clone.get::<UserSlot>(), ctx.get::<UserSlot>());
    }

    #[test]
    fn debug_reports_chain_depth() {
        let ctx = Context::new()
            .with_value(UserSlot("a".to_string()))
            .with_value(RequestSlot(1));

        assert_eq!(format!("{ctx:?}"), "Context { depth: 2 }");
    }

    #[test]
    fn context_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Context>();
    }
}
