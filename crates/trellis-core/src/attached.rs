//! Attached properties.
//!
//! An attached property is a value stored on one node but owned by another
//! node type, usually the container that reads it during layout (a grid reads
//! `grid.row` from each of its children). Children never need to know which
//! containers annotate them.
//!
//! [`AttachedStore::set`] only writes. Owners wrap it in named setters that
//! decide which nodes have to be invalidated afterwards.

use smallvec::SmallVec;
use std::fmt;

/// Namespace-qualified key of an attached property, e.g. `grid.row`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttachedKey {
    owner: &'static str,
    name: &'static str,
}

impl AttachedKey {
    pub const fn new(owner: &'static str, name: &'static str) -> Self {
        Self { owner, name }
    }

    /// Domain of the node type that owns the property.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if `qualified` spells this key as `owner.name`.
    pub fn matches(&self, qualified: &str) -> bool {
        qualified
            .split_once('.')
            .is_some_and(|(owner, name)| owner == self.owner && name == self.name)
    }
}

impl fmt::Debug for AttachedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.name)
    }
}

impl fmt::Display for AttachedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.name)
    }
}

/// Stored representation of an attached value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttachedValue {
    Int(i32),
    Float(f32),
    Bool(bool),
}

/// Rust types that can be stored as an attached value.
pub trait AttachedType: Copy {
    fn into_value(self) -> AttachedValue;
    fn from_value(value: &AttachedValue) -> Option<Self>;
}

impl AttachedType for i32 {
    fn into_value(self) -> AttachedValue {
        AttachedValue::Int(self)
    }

    fn from_value(value: &AttachedValue) -> Option<Self> {
        match value {
            AttachedValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl AttachedType for f32 {
    fn into_value(self) -> AttachedValue {
        AttachedValue::Float(self)
    }

    fn from_value(value: &AttachedValue) -> Option<Self> {
        match value {
            AttachedValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl AttachedType for bool {
    fn into_value(self) -> AttachedValue {
        AttachedValue::Bool(self)
    }

    fn from_value(value: &AttachedValue) -> Option<Self> {
        match value {
            AttachedValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

/// Typed handle to an attached property.
///
/// Declared once by the owning type, usually as a `const`:
///
/// ```
/// use trellis_core::AttachedProperty;
///
/// const DOCK: AttachedProperty<i32> = AttachedProperty::new("dock", "side", 0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct AttachedProperty<T: AttachedType> {
    key: AttachedKey,
    default: T,
}

impl<T: AttachedType> AttachedProperty<T> {
    pub const fn new(owner: &'static str, name: &'static str, default: T) -> Self {
        Self {
            key: AttachedKey::new(owner, name),
            default,
        }
    }

    pub fn key(&self) -> AttachedKey {
        self.key
    }

    /// Value reported for nodes that never had this property set.
    pub fn default_value(&self) -> T {
        self.default
    }
}

/// Per-node attached property storage.
///
/// Nodes typically carry a handful of attached values, so entries live inline
/// and lookups are linear.
#[derive(Clone, Debug, Default)]
pub struct AttachedStore {
    entries: SmallVec<[(AttachedKey, AttachedValue); 4]>,
}

impl AttachedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored value, or the property default when unset.
    pub fn get<T: AttachedType>(&self, property: &AttachedProperty<T>) -> T {
        match self.get_raw(property.key) {
            Some(value) => T::from_value(value).unwrap_or_else(|| {
                log::warn!(
                    "attached property {} holds {:?}; reading default",
                    property.key,
                    value
                );
                property.default
            }),
            None => property.default,
        }
    }

    /// Stores `value`, replacing any previous value. Does not invalidate.
    pub fn set<T: AttachedType>(&mut self, property: &AttachedProperty<T>, value: T) {
        self.set_raw(property.key, value.into_value());
    }

    pub fn get_raw(&self, key: AttachedKey) -> Option<&AttachedValue> {
        self.entries
            .iter()
            .find(|(stored, _)| *stored == key)
            .map(|(_, value)| value)
    }

    pub fn set_raw(&mut self, key: AttachedKey, value: AttachedValue) {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(stored, _)| *stored == key) {
            *existing = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn contains(&self, key: AttachedKey) -> bool {
        self.get_raw(key).is_some()
    }

    /// Removes the value so reads fall back to the default again.
    /// Returns whether a value was present.
    pub fn remove(&mut self, key: AttachedKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(stored, _)| *stored != key);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttachedKey, AttachedValue)> + '_ {
        self.entries.iter().copied()
    }
}
