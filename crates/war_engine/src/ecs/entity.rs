//! Entity implementation

slotmap::new_key_type! {
    /// Generational entity handle
    ///
    /// Cells and components hold these instead of references, so a despawned
    /// entity can never be reached through a stale handle.
    pub struct EntityId;
}
