#![macro_use]

macro_rules! impl_index_id {
    ($idtype: ident) => {
        impl $idtype {
            /// Create a new id from a raw index
            pub const fn new(value: usize) -> Self {
                Self(value)
            }

            /// The raw index
            pub fn raw(self) -> usize {
                self.0
            }
        }

        impl From<usize> for $idtype {
            fn from(value: usize) -> Self {
                Self(value)
            }
        }

        impl From<$idtype> for usize {
            fn from(value: $idtype) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $idtype {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl PartialEq<usize> for $idtype {
            fn eq(&self, other: &usize) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$idtype> for usize {
            fn eq(&self, other: &$idtype) -> bool {
                *self == other.0
            }
        }
    };
}
