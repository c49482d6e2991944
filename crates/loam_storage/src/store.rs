//! The entity/component store.
//!
//! An [`EntityStore`] owns a registry of entity types. Each type is a
//! closed schema of named components laid out structure-of-arrays: one
//! [`GrowArray`] per component, all kept at exactly the live-population
//! length, with slot `i` of every column belonging to the same entity.
//! A per-type [`HashTable`] maps each entity's stable [`Identity`] to its
//! current slot, and a parallel identity list mirrors slot order.
//!
//! The store is an owned context object; the game-loop driver constructs
//! one at startup and threads it through the frame, instead of the
//! process-wide registry the pattern is sometimes built on.

use loam_foundation::{Error, Identity, Result};

use crate::array::GrowArray;
use crate::column::{self, Column, Component, TypedColumn};
use crate::table::HashTable;

/// Handle to one entity instance: its stable identity plus the tag of
/// the type it was created as.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Entity {
    id: Identity,
    type_index: u32,
}

impl Entity {
    /// The entity's globally unique, lifetime-stable identity.
    #[must_use]
    pub const fn id(self) -> Identity {
        self.id
    }

    /// Index of the entity's type in declaration order.
    #[must_use]
    pub const fn type_index(self) -> u32 {
        self.type_index
    }
}

/// One declared entity type: its schema and its live population.
struct EntityType {
    /// Position of this type's name in the declaration-order list.
    name_index: u32,
    /// Component names in declaration order.
    component_names: GrowArray<String>,
    /// Component name to backing column.
    components: HashTable<String, Box<dyn Column>>,
    /// Identity to current slot index.
    slots: HashTable<Identity, u32>,
    /// Identities in slot order; mirrors every column.
    identities: GrowArray<Identity>,
    /// Live instance count == length of every column.
    live: u32,
}

impl EntityType {
    fn new(name_index: u32) -> Self {
        Self {
            name_index,
            component_names: GrowArray::new(),
            components: HashTable::new(),
            slots: HashTable::new(),
            identities: GrowArray::new(),
            live: 0,
        }
    }
}

/// Schema registry plus per-type structure-of-arrays populations.
///
/// Types are declared once through [`type_begin`](EntityStore::type_begin)
/// / [`add_component`](EntityStore::add_component) /
/// [`type_end`](EntityStore::type_end); at most one declaration is open
/// at a time. After the schema closes, instances are created, accessed by
/// `(entity, component)`, bulk-accessed as whole columns, destroyed, or
/// cleared per type. Misuse never corrupts state: every fallible
/// operation is a checked no-op.
pub struct EntityStore {
    types: HashTable<String, EntityType>,
    /// Type names in declaration order; `Entity::type_index` indexes this.
    type_names: GrowArray<String>,
    /// Name of the type whose declaration is currently open.
    declaring: Option<String>,
}

impl EntityStore {
    /// Creates an empty store with no declared types.
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: HashTable::new(),
            type_names: GrowArray::new(),
            declaring: None,
        }
    }

    /// Opens the declaration of a new entity type.
    ///
    /// # Errors
    ///
    /// Fails if another declaration is open, the name is empty, or a type
    /// with this name already exists.
    pub fn type_begin(&mut self, name: &str) -> Result<()> {
        if let Some(open) = &self.declaring {
            return Err(Error::DeclarationInProgress { name: open.clone() });
        }
        if name.is_empty() {
            return Err(Error::EmptyName {
                what: "entity type",
            });
        }
        if self.types.contains(name) {
            return Err(Error::DuplicateType {
                name: name.to_string(),
            });
        }
        let ty = EntityType::new(self.type_names.len() as u32);
        self.types.add(name.to_string(), ty)?;
        self.type_names.push(name.to_string());
        self.declaring = Some(name.to_string());
        Ok(())
    }

    /// Adds a component to the open declaration, backed by one
    /// [`GrowArray<T>`] across the whole future population.
    ///
    /// # Errors
    ///
    /// Fails if no declaration is open, the name is empty, or the open
    /// type already has a component with this name.
    pub fn add_component<T: Component>(&mut self, name: &str) -> Result<()> {
        let Some(type_name) = self.declaring.clone() else {
            return Err(Error::NoDeclaration);
        };
        if name.is_empty() {
            return Err(Error::EmptyName { what: "component" });
        }
        if let Some(ty) = self.types.get(type_name.as_str()) {
            if ty.components.contains(name) {
                // Recover the owning type's name from the registry value
                // itself, so the diagnostic names the right schema.
                let owner = self
                    .types
                    .key_of(ty)
                    .map_or_else(|| type_name.clone(), Clone::clone);
                return Err(Error::DuplicateComponent {
                    component: name.to_string(),
                    entity_type: owner,
                });
            }
        }
        let ty = self
            .types
            .get_mut(type_name.as_str())
            .ok_or_else(|| Error::unknown_type(type_name.as_str()))?;
        let boxed: Box<dyn Column> = Box::new(TypedColumn::<T>::new());
        ty.components.add(name.to_string(), boxed)?;
        ty.component_names.push(name.to_string());
        Ok(())
    }

    /// Closes the open declaration; the schema is immutable afterwards.
    ///
    /// # Errors
    ///
    /// Fails if no declaration is open.
    pub fn type_end(&mut self) -> Result<()> {
        if self.declaring.take().is_none() {
            return Err(Error::NoDeclaration);
        }
        Ok(())
    }

    /// Returns true if a type declaration is currently open.
    #[must_use]
    pub fn is_declaring(&self) -> bool {
        self.declaring.is_some()
    }

    /// Type names in declaration order.
    #[must_use]
    pub fn type_names(&self) -> &[String] {
        self.type_names.as_slice()
    }

    /// Creates one instance of `type_name` with a fresh identity.
    ///
    /// Appends one default-initialized slot to every component column and
    /// to the identity list, and records identity→slot.
    ///
    /// # Errors
    ///
    /// Fails on an unknown type, or while the type's declaration is
    /// still open (the schema is not closed yet).
    pub fn create(&mut self, type_name: &str) -> Result<Entity> {
        if self.declaring.as_deref() == Some(type_name) {
            return Err(Error::DeclarationInProgress {
                name: type_name.to_string(),
            });
        }
        let ty = self
            .types
            .get_mut(type_name)
            .ok_or_else(|| Error::unknown_type(type_name))?;

        let id = Identity::generate();
        let slot = ty.live;
        ty.slots.add(id, slot)?;
        ty.identities.push(id);
        for i in 0..ty.component_names.len() {
            let name = &ty.component_names[i];
            if let Some(col) = ty.components.get_mut(name) {
                col.push_default();
            }
        }
        ty.live += 1;
        Ok(Entity {
            id,
            type_index: ty.name_index,
        })
    }

    /// Reads the entity's value of the named component.
    ///
    /// O(1): one identity→slot lookup plus a typed slice index.
    ///
    /// # Errors
    ///
    /// Fails on an unknown type, component, or entity, or if `T` is not
    /// the element type the component was declared with.
    pub fn get_component<T: Component>(&self, entity: Entity, component: &str) -> Result<&T> {
        let (type_name, ty) = self.type_of(entity)?;
        let col = ty
            .components
            .get(component)
            .ok_or_else(|| Error::unknown_component(component, type_name))?;
        let col = downcast_col::<T>(col.as_ref(), component)?;
        let slot = *ty
            .slots
            .get(&entity.id)
            .ok_or_else(|| Error::unknown_entity(entity.id))?;
        col.as_slice()
            .get(slot as usize)
            .ok_or_else(|| Error::unknown_entity(entity.id))
    }

    /// Writes through to the entity's value of the named component.
    ///
    /// # Errors
    ///
    /// Same failure cases as [`get_component`](EntityStore::get_component).
    pub fn get_component_mut<T: Component>(
        &mut self,
        entity: Entity,
        component: &str,
    ) -> Result<&mut T> {
        let (type_name, ty) = self.type_of_mut(entity)?;
        let slot = *ty
            .slots
            .get(&entity.id)
            .ok_or_else(|| Error::unknown_entity(entity.id))?;
        let col = ty
            .components
            .get_mut(component)
            .ok_or_else(|| Error::unknown_component(component, type_name))?;
        let col = downcast_col_mut::<T>(col.as_mut(), component)?;
        col.as_mut_slice()
            .get_mut(slot as usize)
            .ok_or_else(|| Error::unknown_entity(entity.id))
    }

    /// The whole column of a component across the type's live population,
    /// in slot order. Structure-of-arrays access for bulk updates.
    ///
    /// # Errors
    ///
    /// Fails on an unknown type or component, or a mismatched `T`.
    pub fn components<T: Component>(&self, type_name: &str, component: &str) -> Result<&[T]> {
        let ty = self
            .types
            .get(type_name)
            .ok_or_else(|| Error::unknown_type(type_name))?;
        let col = ty
            .components
            .get(component)
            .ok_or_else(|| Error::unknown_component(component, type_name))?;
        Ok(downcast_col::<T>(col.as_ref(), component)?.as_slice())
    }

    /// Mutable form of [`components`](EntityStore::components).
    ///
    /// # Errors
    ///
    /// Same failure cases as [`components`](EntityStore::components).
    pub fn components_mut<T: Component>(
        &mut self,
        type_name: &str,
        component: &str,
    ) -> Result<&mut [T]> {
        let ty = self
            .types
            .get_mut(type_name)
            .ok_or_else(|| Error::unknown_type(type_name))?;
        let col = ty
            .components
            .get_mut(component)
            .ok_or_else(|| Error::unknown_component(component, type_name))?;
        Ok(downcast_col_mut::<T>(col.as_mut(), component)?.as_mut_slice())
    }

    /// Destroys an entity instance.
    ///
    /// Shift-removes its slot from every component column and from the
    /// identity list (slot order is preserved), deletes identity→slot,
    /// then repairs the cached slot index of every identity above the
    /// freed slot. The repair walk is the one O(n) operation here.
    ///
    /// # Errors
    ///
    /// Fails on an unknown type or entity; the population is untouched.
    pub fn destroy(&mut self, entity: Entity) -> Result<()> {
        let (_, ty) = self.type_of_mut(entity)?;
        let slot = *ty
            .slots
            .get(&entity.id)
            .ok_or_else(|| Error::unknown_entity(entity.id))?;

        for i in 0..ty.component_names.len() {
            let name = &ty.component_names[i];
            if let Some(col) = ty.components.get_mut(name) {
                col.remove_at(slot as usize);
            }
        }
        ty.identities.remove_at(slot as usize);
        ty.slots.del(&entity.id)?;
        ty.live -= 1;

        // Everything above the freed slot shifted down by one; keep the
        // identity→slot table matching true positions.
        for id in &ty.identities.as_slice()[slot as usize..] {
            if let Some(cached) = ty.slots.get_mut(id) {
                *cached -= 1;
            }
        }
        Ok(())
    }

    /// Drops every instance of a type, keeping its schema.
    ///
    /// Column capacities are kept, so repopulating after a "reset level"
    /// style teardown does not re-grow.
    ///
    /// # Errors
    ///
    /// Fails on an unknown type.
    pub fn type_clear(&mut self, type_name: &str) -> Result<()> {
        let ty = self
            .types
            .get_mut(type_name)
            .ok_or_else(|| Error::unknown_type(type_name))?;
        for i in 0..ty.component_names.len() {
            let name = &ty.component_names[i];
            if let Some(col) = ty.components.get_mut(name) {
                col.clear();
            }
        }
        ty.identities.clear();
        ty.slots.clear();
        ty.live = 0;
        Ok(())
    }

    /// Number of live instances of a type.
    ///
    /// # Errors
    ///
    /// Fails on an unknown type.
    pub fn population(&self, type_name: &str) -> Result<usize> {
        let ty = self
            .types
            .get(type_name)
            .ok_or_else(|| Error::unknown_type(type_name))?;
        Ok(ty.live as usize)
    }

    /// Identities of a type's live instances, in slot order.
    ///
    /// # Errors
    ///
    /// Fails on an unknown type.
    pub fn identities(&self, type_name: &str) -> Result<&[Identity]> {
        let ty = self
            .types
            .get(type_name)
            .ok_or_else(|| Error::unknown_type(type_name))?;
        Ok(ty.identities.as_slice())
    }

    /// The name of the type an entity was created as.
    ///
    /// # Errors
    ///
    /// Fails if the handle's type tag is unknown.
    pub fn type_name(&self, entity: Entity) -> Result<&str> {
        self.type_of(entity).map(|(name, _)| name)
    }

    fn type_of(&self, entity: Entity) -> Result<(&str, &EntityType)> {
        let name = self
            .type_names
            .get(entity.type_index as usize)
            .ok_or_else(|| Error::unknown_entity(entity.id))?;
        let ty = self
            .types
            .get(name)
            .ok_or_else(|| Error::unknown_type(name.clone()))?;
        Ok((name.as_str(), ty))
    }

    fn type_of_mut(&mut self, entity: Entity) -> Result<(&str, &mut EntityType)> {
        let name = self
            .type_names
            .get(entity.type_index as usize)
            .ok_or_else(|| Error::unknown_entity(entity.id))?;
        let ty = self
            .types
            .get_mut(name.as_str())
            .ok_or_else(|| Error::unknown_type(name.clone()))?;
        Ok((name.as_str(), ty))
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

fn downcast_col<'a, T: Component>(
    col: &'a dyn Column,
    component: &str,
) -> Result<&'a TypedColumn<T>> {
    let stored = col.element_type_name();
    column::downcast::<T>(col).ok_or_else(|| Error::ComponentTypeMismatch {
        component: component.to_string(),
        stored,
        requested: std::any::type_name::<T>(),
    })
}

fn downcast_col_mut<'a, T: Component>(
    col: &'a mut dyn Column,
    component: &str,
) -> Result<&'a mut TypedColumn<T>> {
    let stored = col.element_type_name();
    column::downcast_mut::<T>(col).ok_or_else(|| Error::ComponentTypeMismatch {
        component: component.to_string(),
        stored,
        requested: std::any::type_name::<T>(),
    })
}
