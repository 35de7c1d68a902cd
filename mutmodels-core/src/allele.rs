use std::borrow::Borrow;

/// A state at a site.
///
/// Alleles are arbitrary tokens: nucleotide codes,
/// amino acid codes, `"0"`/`"1"`, and so on.
///
/// ```
/// # use mutmodels_core::Allele;
/// let a = Allele::from("A");
/// assert_eq!(a, "A");
/// assert_eq!(Allele::from('A'), a);
/// assert_eq!(a.to_string(), "A");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Allele(String);

impl Allele {
    /// The allele as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Allele {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Allele {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<char> for Allele {
    fn from(value: char) -> Self {
        Self(value.to_string())
    }
}

impl From<&Allele> for Allele {
    fn from(value: &Allele) -> Self {
        value.clone()
    }
}

impl From<Allele> for String {
    fn from(value: Allele) -> Self {
        value.0
    }
}

impl AsRef<str> for Allele {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Allele {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Allele {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Allele {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for Allele {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
