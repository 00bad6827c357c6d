use serde::{Deserialize, Serialize};

///
/// EntityTypeId
///
/// Stable identifier issued by the model arena. Ids are never reused, so a
/// stale id resolves to nothing rather than to a different entity type.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct EntityTypeId(pub(crate) u32);

impl EntityTypeId {
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

// Identifier for a node owned by one entity type: the owner plus the
// position in the owner's declaration-ordered list.
macro_rules! member_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
        )]
        pub struct $name {
            pub(crate) entity: EntityTypeId,
            pub(crate) index: u32,
        }

        impl $name {
            #[must_use]
            pub const fn entity(self) -> EntityTypeId {
                self.entity
            }

            #[must_use]
            pub const fn index(self) -> u32 {
                self.index
            }

            pub(crate) const fn new(entity: EntityTypeId, index: u32) -> Self {
                Self { entity, index }
            }
        }
    };
}

member_id! {
    ///
    /// PropertyId
    ///
    PropertyId
}

member_id! {
    ///
    /// KeyId
    ///
    KeyId
}

member_id! {
    ///
    /// ForeignKeyId
    /// The owning entity is the dependent (association) side.
    ///
    ForeignKeyId
}

member_id! {
    ///
    /// NavigationId
    ///
    NavigationId
}

member_id! {
    ///
    /// SkipNavigationId
    ///
    SkipNavigationId
}
