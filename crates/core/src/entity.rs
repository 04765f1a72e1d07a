//! Stored records with a system-assigned key.

/// A record whose identity is its key, not its field values.
pub trait Entity {
    /// Key assigned by storage; never reused once handed out.
    type Id: Copy + Ord + core::fmt::Debug + core::fmt::Display;

    fn id(&self) -> Self::Id;

    /// Two values denote the same stored record when their keys match,
    /// whatever their other fields say.
    fn same_record(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
