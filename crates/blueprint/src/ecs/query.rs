//! # Query: One Component Type Across the Whole World
//!
//! Systems normally see one entity at a time. Some code needs "every `T` in
//! the world" instead, such as finding the input component or counting gravity
//! wells. [`components_of_type`] walks the registry and yields, per entity,
//! the first component of type `T`:
//!
//! ```text
//! entities:  [Input{Mouse}, Block{Pos,Render,Vel}, Well{Pos,Render,Vel,Grav,Static}]
//! components_of_type::<Pos>()   → Block.Pos, Well.Pos
//! components_of_type::<Mouse>() → Input.Mouse
//! ```
//!
//! The iterator is lazy: dropping it early (`.next()`, `.find(..)`, `.take(n)`)
//! leaves the remaining entities unvisited. Each call starts a fresh
//! traversal.

use std::any::Any;
use std::marker::PhantomData;
use std::slice;

use super::entity::Composer;
use super::world::{Entities, World};

/// Lazy iterator returned by [`components_of_type`].
pub struct ComponentsOfType<'w, T> {
    entities: slice::IterMut<'w, Box<dyn Composer>>,
    _marker: PhantomData<fn() -> T>,
}

impl<'w, T: Any> Iterator for ComponentsOfType<'w, T> {
    type Item = &'w mut T;

    fn next(&mut self) -> Option<Self::Item> {
        for entity in self.entities.by_ref() {
            if let Some(component) = entity.components().take::<T>() {
                return Some(component);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.entities.len()))
    }
}

/// Every entity's first `T`, in registry order, at most one per entity.
pub fn components_of_type<T: Any>(entities: &mut Entities) -> ComponentsOfType<'_, T> {
    ComponentsOfType {
        entities: entities.list.iter_mut(),
        _marker: PhantomData,
    }
}

impl World {
    /// Shorthand for [`components_of_type`] over this world's registry.
    pub fn components_of_type<T: Any>(&mut self) -> ComponentsOfType<'_, T> {
        components_of_type(self.entities_mut())
    }
}
