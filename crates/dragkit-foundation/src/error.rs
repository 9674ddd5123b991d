use crate::ItemId;

#[derive(Debug, Clone, PartialEq)]
pub enum DndError {
    /// The id is not present in the registry category that was addressed.
    UnknownItem { id: ItemId },
    /// The id is already registered in that category.
    DuplicateItem { id: ItemId },
    /// A configuration value is negative or not a number.
    InvalidConfig { field: &'static str, value: f64 },
}

impl std::fmt::Display for DndError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DndError::UnknownItem { id } => write!(f, "item {id} is not registered"),
            DndError::DuplicateItem { id } => write!(f, "item {id} is already registered"),
            DndError::InvalidConfig { field, value } => {
                write!(f, "invalid configuration: {field} = {value}")
            }
        }
    }
}

impl std::error::Error for DndError {}
