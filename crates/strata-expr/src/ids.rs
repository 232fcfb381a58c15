macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Get the inner u32 value.
            pub fn inner(self) -> u32 {
                self.0
            }

            /// Create an ID from a u32 value.
            pub fn new(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

define_id_type!(BlockId);
define_id_type!(VariableId);
define_id_type!(ConstraintId);
define_id_type!(ObjectiveId);
define_id_type!(ExpressionId);
define_id_type!(GreyBoxId);

#[cfg(test)]
mod tests {
    use super::{BlockId, VariableId};
    use std::collections::BTreeSet;

    #[test]
    fn id_roundtrip() {
        let id = VariableId::new(7);
        assert_eq!(id.inner(), 7);
    }

    #[test]
    fn ids_deduplicate_by_identity() {
        let mut set = BTreeSet::new();
        set.insert(BlockId::new(3));
        set.insert(BlockId::new(3));
        set.insert(BlockId::new(4));
        assert_eq!(set.len(), 2);
    }
}
