//! # Component: Borrowed Views Into an Entity
//!
//! Components are plain data owned by the entity struct. When a system wants
//! them it asks the entity for a [`Components`] list: an ordered set of
//! *slots*, each holding a `&mut dyn Any` that points back into the entity.
//! Mutating through a slot mutates the entity.
//!
//! ## Kind Tags
//!
//! Each slot remembers the [`TypeId`] of its component when it is pushed.
//! Typed lookups compare tags and only ever consider the **first** slot of a
//! kind, so an entity that lists two components of the same type still
//! matches once:
//!
//! ```text
//! slots: [Position, Render, Velocity, Position']
//! take::<Position>()  → slot 0
//! take::<Position>()  → None (slot 0 already taken, slot 3 is shadowed)
//! ```
//!
//! ## Taking Instead of Borrowing
//!
//! A system usually needs several components of one entity at once, each as
//! `&mut`. [`Components::take`] moves the slot out of the list and hands back
//! a reference with the list's full lifetime, so the borrow checker can see
//! the results are disjoint:
//!
//! ```ignore
//! let mut components = entity.components();
//! let (Some(position), Some(velocity)) =
//!     (components.take::<Position>(), components.take::<Velocity>())
//! else {
//!     return;
//! };
//! position.0 += velocity.0;
//! ```
//!
//! ## Detached Slots
//!
//! [`Components::with_detached`] declares a component that was passed *by
//! value*. Writes to it could never reach the entity, so the list keeps only
//! its kind tag. Typed lookups skip detached slots and match the first
//! borrowed slot of the kind after them; [`validate`] rejects any entity type
//! that declares one.
//!
//! ```text
//! slots: [Position (detached), Render, Position']
//! take::<Position>()  → slot 2
//! ```

use std::any::{Any, TypeId, type_name};

use crate::error::EcsError;

use super::entity::Composer;

/// One entry in a [`Components`] list.
enum Slot<'a> {
    /// Points into the entity; writes land in the entity.
    Borrowed(&'a mut dyn Any),
    /// Declared by value; there is nothing to write through.
    Detached,
}

/// Ordered list of an entity's components, borrowed from the entity.
#[derive(Default)]
pub struct Components<'a> {
    kinds: Vec<TypeId>,
    names: Vec<&'static str>,
    slots: Vec<Option<Slot<'a>>>,
}

impl<'a> Components<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a borrowed component (builder pattern).
    pub fn with<T: Any>(mut self, component: &'a mut T) -> Self {
        self.push(component);
        self
    }

    /// Append a borrowed component.
    pub fn push<T: Any>(&mut self, component: &'a mut T) {
        self.kinds.push(TypeId::of::<T>());
        self.names.push(type_name::<T>());
        self.slots.push(Some(Slot::Borrowed(component)));
    }

    /// Declare a component passed by value. The value is dropped; lookups
    /// skip the slot and [`validate`] rejects it, so a mistaken copy is caught
    /// in tests.
    pub fn with_detached<T: Any>(mut self, _copy: T) -> Self {
        self.kinds.push(TypeId::of::<T>());
        self.names.push(type_name::<T>());
        self.slots.push(Some(Slot::Detached));
        self
    }

    /// Append every slot of `other` after the existing ones. Used by entity
    /// variants that extend a base variant.
    pub fn extend(mut self, other: Components<'a>) -> Self {
        self.kinds.extend(other.kinds);
        self.names.extend(other.names);
        self.slots.extend(other.slots);
        self
    }

    /// Number of declared components, including detached and taken ones.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Returns `true` if a component of type `T` was declared.
    pub fn has<T: Any>(&self) -> bool {
        let kind = TypeId::of::<T>();
        self.kinds.contains(&kind)
    }

    /// Move the first borrowed `T` out of the list.
    ///
    /// Detached `T` slots are skipped. Returns `None` if there is no borrowed
    /// `T`, or if the first one was already taken.
    pub fn take<T: Any>(&mut self) -> Option<&'a mut T> {
        let index = self.first_borrowed::<T>()?;
        match self.slots[index].take()? {
            Slot::Borrowed(component) => component.downcast_mut::<T>(),
            Slot::Detached => None,
        }
    }

    /// Returns `true` if every declared slot borrows from the entity.
    pub fn all_borrowed(&self) -> bool {
        !self
            .slots
            .iter()
            .any(|slot| matches!(slot, Some(Slot::Detached)))
    }

    /// Type names of the declared components, in order. Diagnostics only.
    pub fn type_names(&self) -> &[&'static str] {
        &self.names
    }

    /// Index of the first `T` slot that is not detached. A slot already taken
    /// still counts, so it keeps shadowing later ones.
    fn first_borrowed<T: Any>(&self) -> Option<usize> {
        let kind = TypeId::of::<T>();
        self.kinds
            .iter()
            .zip(&self.slots)
            .position(|(k, slot)| *k == kind && !matches!(slot, Some(Slot::Detached)))
    }
}

/// Check the component contract of an entity type on a default instance.
///
/// Fails with [`EcsError::NoComponents`] if the entity exposes nothing and with
/// [`EcsError::ComponentNotReference`] if any component is detached.
pub fn validate<E: Composer + Default>() -> Result<(), EcsError> {
    let mut entity = E::default();
    let components = entity.components();
    if components.is_empty() {
        return Err(EcsError::NoComponents);
    }
    if !components.all_borrowed() {
        return Err(EcsError::ComponentNotReference);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::entity::Identity;

    #[derive(Debug, Default, PartialEq)]
    struct Position {
        x: f64,
        y: f64,
    }

    #[derive(Debug, Default, PartialEq)]
    struct Velocity {
        x: f64,
        y: f64,
    }

    #[derive(Debug, Default)]
    struct Frozen;

    #[derive(Default)]
    struct Mover {
        identity: Identity,
        position: Position,
        velocity: Velocity,
    }

    impl Composer for Mover {
        fn identity(&self) -> &Identity {
            &self.identity
        }
        fn identity_mut(&mut self) -> &mut Identity {
            &mut self.identity
        }
        fn components(&mut self) -> Components<'_> {
            Components::new()
                .with(&mut self.position)
                .with(&mut self.velocity)
        }
    }

    #[derive(Default)]
    struct Empty {
        identity: Identity,
    }

    impl Composer for Empty {
        fn identity(&self) -> &Identity {
            &self.identity
        }
        fn identity_mut(&mut self) -> &mut Identity {
            &mut self.identity
        }
        fn components(&mut self) -> Components<'_> {
            Components::new()
        }
    }

    #[derive(Default)]
    struct Copied {
        identity: Identity,
        position: Position,
        frozen: Frozen,
    }

    impl Composer for Copied {
        fn identity(&self) -> &Identity {
            &self.identity
        }
        fn identity_mut(&mut self) -> &mut Identity {
            &mut self.identity
        }
        fn components(&mut self) -> Components<'_> {
            Components::new()
                .with(&mut self.frozen)
                .with_detached(Position {
                    x: self.position.x,
                    y: self.position.y,
                })
        }
    }

    #[test]
    fn take_mutates_entity() {
        let mut mover = Mover {
            velocity: Velocity { x: 1.0, y: -2.0 },
            ..Default::default()
        };
        {
            let mut components = mover.components();
            let position = components.take::<Position>().unwrap();
            let velocity = components.take::<Velocity>().unwrap();
            position.x += velocity.x;
            position.y += velocity.y;
        }
        assert_eq!(mover.position, Position { x: 1.0, y: -2.0 });
    }

    #[test]
    fn take_missing_component() {
        let mut mover = Mover::default();
        let mut components = mover.components();
        assert!(!components.has::<Frozen>());
        assert!(components.take::<Frozen>().is_none());
    }

    #[test]
    fn duplicate_kinds_match_once() {
        let mut a = Position::default();
        let mut b = Position { x: 5.0, y: 5.0 };
        let mut components = Components::new().with(&mut a).with(&mut b);
        assert_eq!(components.len(), 2);
        assert_eq!(components.take::<Position>().map(|p| p.x), Some(0.0));
        assert!(components.take::<Position>().is_none());
    }

    #[test]
    fn detached_slots_are_not_taken() {
        let mut copied = Copied::default();
        let mut components = copied.components();
        assert!(components.has::<Position>());
        assert!(components.take::<Position>().is_none());
        assert!(components.take::<Position>().is_none());
        assert!(!components.all_borrowed());
    }

    #[test]
    fn detached_slot_does_not_shadow_a_borrowed_one() {
        let mut live = Position { x: 3.0, y: 4.0 };
        let mut frozen = Frozen;
        let mut components = Components::new()
            .with_detached(Position::default())
            .with(&mut frozen)
            .with(&mut live);

        let position = components.take::<Position>().unwrap();
        position.x = 9.0;
        assert!(components.take::<Position>().is_none());
        drop(components);
        assert_eq!(live, Position { x: 9.0, y: 4.0 });
    }

    #[test]
    fn extend_keeps_order() {
        let mut position = Position::default();
        let mut velocity = Velocity::default();
        let mut frozen = Frozen;
        let base = Components::new().with(&mut position).with(&mut velocity);
        let components = base.extend(Components::new().with(&mut frozen));
        let names: Vec<_> = components
            .type_names()
            .iter()
            .map(|n| n.rsplit("::").next().unwrap())
            .collect();
        assert_eq!(names, vec!["Position", "Velocity", "Frozen"]);
    }

    #[test]
    fn validate_accepts_borrowed_components() {
        assert_eq!(validate::<Mover>(), Ok(()));
    }

    #[test]
    fn validate_rejects_empty_entity() {
        assert_eq!(validate::<Empty>(), Err(EcsError::NoComponents));
    }

    #[test]
    fn validate_rejects_detached_component() {
        assert_eq!(validate::<Copied>(), Err(EcsError::ComponentNotReference));
    }
}
