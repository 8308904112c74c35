use crate::profiling::profile_function;
use std::num::NonZeroU64;

/// Generational handle into a [`SlotArena`].
///
/// The upper 32 bits hold the generation and the lower 32 bits hold the slot
/// index plus one, so `Option<SlotKey>` is the same size as `SlotKey`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey(NonZeroU64);

impl SlotKey {
    /// Largest index a key can address. `MAX_INDEX + 1` still fits in the low half.
    pub const MAX_INDEX: u32 = u32::MAX - 1;

    /// # Panics
    /// If `idx` is greater than [`SlotKey::MAX_INDEX`].
    pub fn new(generation: u32, idx: u32) -> Self {
        assert!(
            idx <= Self::MAX_INDEX,
            "slot index {} exceeds SlotKey::MAX_INDEX",
            idx
        );
        let packed = ((generation as u64) << 32) | (idx as u64 + 1);
        match NonZeroU64::new(packed) {
            Some(raw) => Self(raw),
            None => unreachable!("slot key packing produced zero"),
        }
    }

    pub fn generation(&self) -> u32 {
        (self.0.get() >> 32) as u32
    }

    pub fn index(&self) -> u32 {
        (self.0.get() & u32::MAX as u64) as u32 - 1
    }

    /// Raw packed value, useful for logging.
    pub fn to_bits(self) -> u64 {
        self.0.get()
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Vector-backed storage that hands out generational [`SlotKey`]s.
///
/// Removing a value bumps the generation of its slot, so keys to removed values
/// are rejected instead of silently aliasing whatever reuses the slot.
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Store `value`, reusing a freed slot when one is available.
    ///
    /// # Panics
    /// If every one of the `SlotKey::MAX_INDEX + 1` slots is occupied.
    pub fn insert(&mut self, value: T) -> SlotKey {
        profile_function!();
        if let Some(idx) = self.free.pop() {
            self.len += 1;
            let slot = &mut self.slots[idx as usize];
            slot.value = Some(value);
            SlotKey::new(slot.generation, idx)
        } else {
            let idx = Self::next_index(self.slots.len());
            self.len += 1;
            self.slots.push(Slot {
                generation: 0,
                value: Some(value),
            });
            SlotKey::new(0, idx)
        }
    }

    fn next_index(slot_count: usize) -> u32 {
        match u32::try_from(slot_count) {
            Ok(idx) if idx <= SlotKey::MAX_INDEX => idx,
            _ => panic!("SlotArena is full ({} slots)", slot_count),
        }
    }

    fn slot(&self, key: SlotKey) -> Option<&Slot<T>> {
        self.slots
            .get(key.index() as usize)
            .filter(|slot| slot.generation == key.generation())
    }

    pub fn get(&self, key: SlotKey) -> Option<&T> {
        self.slot(key).and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, key: SlotKey) -> Option<&mut T> {
        self.slots
            .get_mut(key.index() as usize)
            .filter(|slot| slot.generation == key.generation())
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, key: SlotKey) -> bool {
        self.get(key).is_some()
    }

    /// Remove the value behind `key`, invalidating every copy of the key.
    pub fn remove(&mut self, key: SlotKey) -> Option<T> {
        profile_function!();
        let index = key.index();
        let slot = self
            .slots
            .get_mut(index as usize)
            .filter(|slot| slot.generation == key.generation())?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.len -= 1;
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every value. Outstanding keys all become stale.
    pub fn clear(&mut self) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(idx as u32);
            }
        }
        self.len = 0;
    }

    /// Iterate live values in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.value
                .as_ref()
                .map(|value| (SlotKey::new(slot.generation, idx as u32), value))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotKey, &mut T)> + '_ {
        self.slots.iter_mut().enumerate().filter_map(|(idx, slot)| {
            let generation = slot.generation;
            slot.value
                .as_mut()
                .map(|value| (SlotKey::new(generation, idx as u32), value))
        })
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SlotArena<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotArena")
            .field("len", &self.len)
            .field("capacity", &self.slots.len())
            .field("free", &self.free.len())
            .finish()
    }
}

static_assertions::assert_eq_size!(SlotKey, Option<SlotKey>);
