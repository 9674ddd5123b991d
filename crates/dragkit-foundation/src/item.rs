//! Item identity and opaque payloads shared by draggables and droppables.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Opaque key joining every registry map. Either a number or a string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemId {
    Num(u64),
    Str(Rc<str>),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Num(value) => write!(f, "{value}"),
            ItemId::Str(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        ItemId::Num(value)
    }
}

impl From<u32> for ItemId {
    fn from(value: u32) -> Self {
        ItemId::Num(u64::from(value))
    }
}

impl From<usize> for ItemId {
    fn from(value: usize) -> Self {
        ItemId::Num(value as u64)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId::Str(Rc::from(value))
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        ItemId::Str(Rc::from(value))
    }
}

/// Consumer payload attached to a registered item.
///
/// Clones share the same value; equality is identity.
#[derive(Clone)]
pub struct ItemData(Rc<dyn Any>);

impl ItemData {
    pub fn new<T: Any>(value: T) -> Self {
        Self(Rc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    pub fn ptr_eq(&self, other: &ItemData) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ItemData {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ItemData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ItemData(..)")
    }
}
