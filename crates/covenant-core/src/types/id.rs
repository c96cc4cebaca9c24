use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
    sync::{Mutex, OnceLock},
};
use ulid::{Generator, Ulid};

// Monotonic generator so keys minted within the same millisecond still sort
// in mint order. Falls back to plain randomness on generator overflow.
static GENERATOR: OnceLock<Mutex<Generator>> = OnceLock::new();

fn next_ulid() -> Ulid {
    let generator = GENERATOR.get_or_init(|| Mutex::new(Generator::new()));

    match generator.lock() {
        Ok(mut g) => g.generate().unwrap_or_else(|_| Ulid::new()),
        Err(_) => Ulid::new(),
    }
}

///
/// Id
///
/// Typed primary-key wrapper for entity identities. Carries the entity type
/// as phantom context without changing the underlying ULID key.
/// Serializes identically to a bare ULID string.
///

#[repr(transparent)]
pub struct Id<E: ?Sized> {
    key: Ulid,
    _marker: PhantomData<fn() -> E>,
}

impl<E: ?Sized> Id<E> {
    #[must_use]
    pub const fn from_key(key: Ulid) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    /// Mint a fresh identity.
    #[must_use]
    pub fn generate() -> Self {
        Self::from_key(next_ulid())
    }

    #[must_use]
    pub const fn nil() -> Self {
        Self::from_key(Ulid::nil())
    }

    /// The underlying key.
    #[must_use]
    pub const fn key(&self) -> Ulid {
        self.key
    }
}

// Manual impls: deriving would bound `E` itself, which is only phantom here.

#[allow(clippy::expl_impl_clone_on_copy)]
impl<E: ?Sized> Clone for Id<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: ?Sized> Copy for Id<E> {}

impl<E: ?Sized> PartialEq for Id<E> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<E: ?Sized> Eq for Id<E> {}

impl<E: ?Sized> PartialOrd for Id<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E: ?Sized> Ord for Id<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<E: ?Sized> Hash for Id<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<E: ?Sized> fmt::Debug for Id<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.key)
    }
}

impl<E: ?Sized> fmt::Display for Id<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key.fmt(f)
    }
}

impl<E: ?Sized> FromStr for Id<E> {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_str(s).map(Self::from_key)
    }
}

impl<E: ?Sized> From<Ulid> for Id<E> {
    fn from(key: Ulid) -> Self {
        Self::from_key(key)
    }
}

impl<E: ?Sized> Serialize for Id<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.key.serialize(serializer)
    }
}

impl<'de, E: ?Sized> Deserialize<'de> for Id<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ulid::deserialize(deserializer).map(Self::from_key)
    }
}

///
/// TESTS
///
