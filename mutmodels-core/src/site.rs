use crate::Allele;
use crate::Error;
use crate::MutationId;
use crate::NodeId;
use crate::Position;
use crate::Result;
use crate::Time;

/// A mutation at a [`Site`].
///
/// A mutation with no parent derives from the
/// site's ancestral state. Otherwise it derives
/// from the derived state of its parent, which
/// is an earlier mutation at the same site.
#[derive(Clone, Debug, PartialEq)]
pub struct MutationEvent {
    derived_state: Allele,
    time: Time,
    parent: Option<MutationId>,
    node: Option<NodeId>,
}

impl MutationEvent {
    /// The state this mutation produces
    pub fn derived_state(&self) -> &Allele {
        &self.derived_state
    }

    /// The origin time of the mutation
    pub fn time(&self) -> Time {
        self.time
    }

    /// The mutation this one is stacked above, if any.
    pub fn parent(&self) -> Option<MutationId> {
        self.parent
    }

    /// The genealogy node directly below the mutation, if recorded.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }
}

/// A site: a position, its ancestral state,
/// and the mutations that occurred there.
///
/// Mutations are stored in the order they were added.
/// A mutation may only name an already-added mutation
/// as its parent, so the parent links of a site
/// always form a forest.
///
/// ```
/// # use mutmodels_core::*;
/// let mut site = Site::new(Position::new_valid(10), "G");
/// let first = site
///     .add_mutation("T", Time::new_valid(1.0), None)
///     .unwrap();
/// let second = site
///     .add_mutation("A", Time::new_valid(2.0), Some(first))
///     .unwrap();
/// assert_eq!(site.parent_state(first).unwrap(), "G");
/// assert_eq!(site.parent_state(second).unwrap(), "T");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Site {
    position: Position,
    ancestral_state: Allele,
    mutations: Vec<MutationEvent>,
}

/// A site table
pub type SiteTable = Vec<Site>;

impl Site {
    /// Create a site with no mutations
    pub fn new<A: Into<Allele>>(position: Position, ancestral_state: A) -> Self {
        Self {
            position,
            ancestral_state: ancestral_state.into(),
            mutations: vec![],
        }
    }

    /// Add a mutation to the site.
    ///
    /// # Errors
    ///
    /// * [`Error::MutationParentOutOfBounds`] if `parent`
    ///   is not a mutation already present at this site.
    /// * [`Error::MutationTimeOrder`] if `time` is not
    ///   strictly greater than the parent's time.
    pub fn add_mutation<A: Into<Allele>>(
        &mut self,
        derived_state: A,
        time: Time,
        parent: Option<MutationId>,
    ) -> Result<MutationId> {
        self.add_event(MutationEvent {
            derived_state: derived_state.into(),
            time,
            parent,
            node: None,
        })
    }

    /// Add a mutation that maps to `node` of a
    /// [`Genealogy`](crate::Genealogy).
    ///
    /// Errors are the same as for [`Site::add_mutation`].
    pub fn add_mutation_on_node<A: Into<Allele>>(
        &mut self,
        derived_state: A,
        time: Time,
        parent: Option<MutationId>,
        node: NodeId,
    ) -> Result<MutationId> {
        self.add_event(MutationEvent {
            derived_state: derived_state.into(),
            time,
            parent,
            node: Some(node),
        })
    }

    fn add_event(&mut self, event: MutationEvent) -> Result<MutationId> {
        if let Some(parent) = event.parent {
            match self.mutations.get(parent.raw()) {
                None => {
                    return Err(Error::MutationParentOutOfBounds {
                        parent,
                        num_mutations: self.mutations.len(),
                    })
                }
                Some(p) => {
                    if p.time >= event.time {
                        return Err(Error::MutationTimeOrder {
                            time: event.time,
                            parent_time: p.time,
                        });
                    }
                }
            }
        }
        self.mutations.push(event);
        Ok(MutationId::new(self.mutations.len() - 1))
    }

    /// Position of the site
    pub fn position(&self) -> Position {
        self.position
    }

    /// The state before any mutation
    pub fn ancestral_state(&self) -> &Allele {
        &self.ancestral_state
    }

    /// All mutations, in insertion order
    pub fn mutations(&self) -> &[MutationEvent] {
        &self.mutations
    }

    /// Get a mutation by id
    pub fn mutation(&self, id: MutationId) -> Option<&MutationEvent> {
        self.mutations.get(id.raw())
    }

    /// Number of mutations at the site
    pub fn num_mutations(&self) -> usize {
        self.mutations.len()
    }

    /// The state a mutation derives from.
    ///
    /// This is the ancestral state for a mutation without
    /// a parent and the parent's derived state otherwise.
    /// Returns `None` if `id` is out of range.
    pub fn parent_state(&self, id: MutationId) -> Option<&Allele> {
        let mutation = self.mutation(id)?;
        match mutation.parent {
            None => Some(&self.ancestral_state),
            Some(parent) => self.mutation(parent).map(|p| &p.derived_state),
        }
    }

    /// Iterate over `(parent state, derived state)` for every mutation.
    pub fn transitions(&self) -> impl Iterator<Item = (&Allele, &Allele)> + '_ {
        self.mutations.iter().map(move |m| {
            let from = match m.parent {
                // add_event guarantees the parent exists
                Some(parent) => &self.mutations[parent.raw()].derived_state,
                None => &self.ancestral_state,
            };
            (from, &m.derived_state)
        })
    }
}

/// Check that sites are sorted by strictly increasing position.
pub fn validate_site_table(sites: &[Site]) -> Result<()> {
    for w in sites.windows(2) {
        if w[0].position == w[1].position {
            return Err(Error::DuplicatedSitePosition);
        }
        if w[0].position > w[1].position {
            return Err(Error::UnsortedSitePosition);
        }
    }
    Ok(())
}
