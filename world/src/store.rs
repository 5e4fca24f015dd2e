//! Generational entity store with one sparse table per component type.
//!
//! Entities are keys of a [`SlotMap`]; every component type owns a
//! [`SecondaryMap`] keyed by the same entity. Scans snapshot the matching
//! entities up front, so systems may create entities mid-scan without those
//! entities being visited in the same pass.

use slotmap::{SecondaryMap, SlotMap};

use lawn_defence_core::{
    components::{
        AttackTimer, BossState, ChomperState, Drop, DropTag, EnemyTag, ExplosionEffect, Freezable,
        GridPos, Health, Lawnmower, LawnmowerTag, Plant, PlantTag, PotatoMineState, Projectile,
        ProjectileTag, SpriteAnim, Sun, SunProducer, SunTag, Velocity, WorldPos, Zombie,
        ZombieSpecial,
    },
    Armor, Entity,
};

/// Plain-data value that can be attached to an entity.
pub trait Component: Copy + 'static {
    /// Table holding every instance of the component.
    #[doc(hidden)]
    fn column(tables: &Tables) -> &SecondaryMap<Entity, Self>;
    /// Mutable access to the component's table.
    #[doc(hidden)]
    fn column_mut(tables: &mut Tables) -> &mut SecondaryMap<Entity, Self>;
}

macro_rules! component_tables {
    ($($component:ty => $field:ident),+ $(,)?) => {
        /// Sparse storage for every component type known to the store.
        #[derive(Debug, Default)]
        pub struct Tables {
            $($field: SecondaryMap<Entity, $component>,)+
        }

        impl Tables {
            fn remove_all(&mut self, entity: Entity) {
                $(let _ = self.$field.remove(entity);)+
            }

            fn clear(&mut self) {
                $(self.$field.clear();)+
            }
        }

        $(
            impl Component for $component {
                fn column(tables: &Tables) -> &SecondaryMap<Entity, Self> {
                    &tables.$field
                }

                fn column_mut(tables: &mut Tables) -> &mut SecondaryMap<Entity, Self> {
                    &mut tables.$field
                }
            }
        )+
    };
}

component_tables! {
    GridPos => grid_pos,
    WorldPos => world_pos,
    Velocity => velocity,
    Health => health,
    Armor => armor,
    PlantTag => plant_tag,
    EnemyTag => enemy_tag,
    ProjectileTag => projectile_tag,
    SunTag => sun_tag,
    LawnmowerTag => lawnmower_tag,
    DropTag => drop_tag,
    Plant => plant,
    Zombie => zombie,
    AttackTimer => attack_timer,
    SunProducer => sun_producer,
    PotatoMineState => potato_mine,
    ChomperState => chomper,
    ExplosionEffect => explosion,
    ZombieSpecial => zombie_special,
    BossState => boss,
    Freezable => freezable,
    Projectile => projectile,
    Sun => sun,
    Drop => drop,
    Lawnmower => lawnmower,
    SpriteAnim => sprite_anim,
}

/// Set of component types an [`Store::each`] scan requires.
///
/// Implemented for tuples of up to six components; the scan yields a copy of
/// each component for every entity that holds all of them.
pub trait Signature {
    /// Copied component values yielded per matching entity.
    type Item;

    /// Reads the signature's components from `entity`, if it holds all of them.
    fn fetch(store: &Store, entity: Entity) -> Option<Self::Item>;
}

macro_rules! impl_signature {
    ($($component:ident),+) => {
        impl<$($component: Component),+> Signature for ($($component,)+) {
            type Item = ($($component,)+);

            fn fetch(store: &Store, entity: Entity) -> Option<Self::Item> {
                Some(($(*store.get::<$component>(entity)?,)+))
            }
        }
    };
}

impl_signature!(A);
impl_signature!(A, B);
impl_signature!(A, B, C);
impl_signature!(A, B, C, D);
impl_signature!(A, B, C, D, E);
impl_signature!(A, B, C, D, E, F);

/// Arena of live entities and their components.
#[derive(Debug, Default)]
pub struct Store {
    entities: SlotMap<Entity, ()>,
    tables: Tables,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh entity with no components.
    pub fn create(&mut self) -> Entity {
        self.entities.insert(())
    }

    /// Whether the entity has not been destroyed.
    #[must_use]
    pub fn alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Attaches or replaces a component. Ignored for destroyed entities.
    pub fn add<C: Component>(&mut self, entity: Entity, component: C) {
        if !self.alive(entity) {
            return;
        }
        let _ = C::column_mut(&mut self.tables).insert(entity, component);
    }

    /// Overwrites a component the entity already holds and reports whether
    /// it did. Used to write back values copied out by [`Store::each`].
    pub fn set<C: Component>(&mut self, entity: Entity, component: C) -> bool {
        match self.get_mut::<C>(entity) {
            Some(slot) => {
                *slot = component;
                true
            }
            None => false,
        }
    }

    /// Detaches a component, returning its last value.
    pub fn remove<C: Component>(&mut self, entity: Entity) -> Option<C> {
        C::column_mut(&mut self.tables).remove(entity)
    }

    /// Reads a component.
    #[must_use]
    pub fn get<C: Component>(&self, entity: Entity) -> Option<&C> {
        C::column(&self.tables).get(entity)
    }

    /// Mutably borrows a component.
    pub fn get_mut<C: Component>(&mut self, entity: Entity) -> Option<&mut C> {
        C::column_mut(&mut self.tables).get_mut(entity)
    }

    /// Whether the entity holds a component of type `C`.
    #[must_use]
    pub fn has<C: Component>(&self, entity: Entity) -> bool {
        C::column(&self.tables).contains_key(entity)
    }

    /// Applies `update` to the entity's component if present and reports
    /// whether it ran.
    pub fn modify<C: Component>(&mut self, entity: Entity, update: impl FnOnce(&mut C)) -> bool {
        match self.get_mut::<C>(entity) {
            Some(component) => {
                update(component);
                true
            }
            None => false,
        }
    }

    /// Snapshots every live entity holding the whole signature `S`, in slot
    /// order, together with copies of the requested components.
    #[must_use]
    pub fn each<S: Signature>(&self) -> Vec<(Entity, S::Item)> {
        self.entities
            .keys()
            .filter_map(|entity| S::fetch(self, entity).map(|item| (entity, item)))
            .collect()
    }

    /// Visits every entity holding `C` with mutable access to the component.
    pub fn each_mut<C: Component>(&mut self, mut visit: impl FnMut(Entity, &mut C)) {
        for (entity, component) in C::column_mut(&mut self.tables).iter_mut() {
            visit(entity, component);
        }
    }

    /// Counts entities holding `C`.
    #[must_use]
    pub fn count<C: Component>(&self) -> usize {
        C::column(&self.tables).len()
    }

    /// Removes the entity and all of its components immediately.
    ///
    /// Returns `false` when the entity was already gone.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        self.tables.remove_all(entity);
        true
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the store holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Destroys every entity.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.tables.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::Store;
    use lawn_defence_core::{Armor, GridPos, Health, WorldPos};

    #[test]
    fn each_matches_the_full_signature_only() {
        let mut store = Store::new();
        let both = store.create();
        store.add(both, Health::new(10));
        store.add(both, WorldPos::new(1.0, 2.0));
        let health_only = store.create();
        store.add(health_only, Health::new(5));

        let matches = store.each::<(Health, WorldPos)>();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].0, both);
        assert_eq!(matches[0].1 .1, WorldPos::new(1.0, 2.0));
        assert_eq!(store.each::<(Health,)>().len(), 2);
    }

    #[test]
    fn destroyed_entities_lose_every_component() {
        let mut store = Store::new();
        let entity = store.create();
        store.add(entity, Health::new(10));
        store.add(entity, Armor::new(3));

        assert!(store.destroy(entity));
        assert!(!store.alive(entity));
        assert!(!store.has::<Health>(entity));
        assert!(!store.has::<Armor>(entity));
        assert!(!store.destroy(entity), "second destroy is a no-op");
    }

    #[test]
    fn stale_identifiers_never_alias_new_entities() {
        let mut store = Store::new();
        let first = store.create();
        assert!(store.destroy(first));
        let second = store.create();
        assert_ne!(first, second);
        store.add(first, GridPos { row: 0, col: 0 });
        assert!(!store.has::<GridPos>(second));
        assert!(!store.has::<GridPos>(first));
    }

    #[test]
    fn modify_reports_missing_components() {
        let mut store = Store::new();
        let entity = store.create();
        assert!(!store.modify::<Health>(entity, |health| health.kill()));
        store.add(entity, Health::new(4));
        assert!(store.modify::<Health>(entity, |health| health.kill()));
        assert_eq!(store.get::<Health>(entity).map(|h| h.current), Some(0));
    }

    #[test]
    fn entities_created_mid_scan_are_not_visited() {
        let mut store = Store::new();
        for _ in 0..3 {
            let entity = store.create();
            store.add(entity, Health::new(1));
        }

        let mut visited = 0;
        for (_, (_health,)) in store.each::<(Health,)>() {
            visited += 1;
            let spawned = store.create();
            store.add(spawned, Health::new(1));
        }

        assert_eq!(visited, 3);
        assert_eq!(store.count::<Health>(), 6);
    }

    #[test]
    fn each_mut_updates_in_place() {
        let mut store = Store::new();
        let entity = store.create();
        store.add(entity, Health::new(10));
        store.each_mut::<Health>(|_, health| health.damage(4));
        assert_eq!(store.get::<Health>(entity).map(|h| h.current), Some(6));
    }
}
