use std::collections::BTreeMap;

use mutmodels_core::validate_site_table;
use mutmodels_core::Allele;
use mutmodels_core::Genealogy;
use mutmodels_core::MutationId;
use mutmodels_core::NodeId;
use mutmodels_core::Position;
use mutmodels_core::Site;
use mutmodels_core::SiteTable;
use mutmodels_core::Time;
use rand::distr::Uniform;
use rand::Rng;
use rand_distr::Poisson;
use tracing::debug;

use crate::Error;
use crate::MutationModel;
use crate::RateMap;
use crate::Result;

/// Settings for a [`MutationOverlay`].
///
/// ```
/// use mutmodels_core::Time;
/// use mutmodels_markov::OverlayConfig;
///
/// let config = OverlayConfig::new()
///     .with_start_time(Time::new_valid(10.0))
///     .with_keep(false);
/// assert_eq!(config.start_time(), 10.0);
/// assert!(!config.keep());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    start_time: f64,
    end_time: f64,
    keep: bool,
}

impl OverlayConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: mutations anywhere in time, existing mutations kept.
    pub fn new() -> Self {
        Self {
            start_time: 0.0,
            end_time: f64::INFINITY,
            keep: true,
        }
    }

    /// Only place mutations at or after `time`.
    pub fn with_start_time(mut self, time: Time) -> Self {
        self.start_time = time.value();
        self
    }

    /// Only place mutations before `time`.
    pub fn with_end_time(mut self, time: Time) -> Self {
        self.end_time = time.value();
        self
    }

    /// Whether [`MutationOverlay::simulate_onto`] keeps existing sites.
    pub fn with_keep(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }

    /// Start of the time window
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// End of the time window
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Whether existing sites are kept
    pub fn keep(&self) -> bool {
        self.keep
    }

    /// # Errors
    ///
    /// [`Error::InvalidTimeWindow`] unless `start_time < end_time`.
    pub fn validate(&self) -> Result<()> {
        if self.start_time < self.end_time {
            Ok(())
        } else {
            Err(Error::InvalidTimeWindow {
                start: self.start_time,
                end: self.end_time,
            })
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::new()
    }
}

struct PendingEvent {
    time: Time,
    node: NodeId,
    // None for mutations placed by this overlay
    derived_state: Option<Allele>,
}

struct PendingSite {
    ancestral_state: Option<Allele>,
    events: Vec<PendingEvent>,
}

/// Places neutral mutations on a [`Genealogy`].
///
/// Mutations arise as a Poisson process along branches with
/// rates from a [`RateMap`], at discrete positions. New sites
/// draw their ancestral state from the model's root distribution
/// and every new mutation draws its derived state from the model
/// row of the state it arose on.
///
/// ```
/// use mutmodels_core::{Genealogy, Position, Time};
/// use mutmodels_markov::{presets, MutationOverlay, OverlayConfig, RateMap};
/// use rand::SeedableRng;
///
/// let mut g = Genealogy::new(Position::new_valid(1000)).unwrap();
/// let root = g.add_node(Time::new_valid(0.0), None).unwrap();
/// g.add_node(Time::new_valid(100.0), Some(root)).unwrap();
/// g.add_node(Time::new_valid(100.0), Some(root)).unwrap();
///
/// let model = presets::jc69().unwrap();
/// let rates = RateMap::uniform(g.sequence_length(), 1e-3).unwrap();
/// let overlay = MutationOverlay::new(&model, rates, OverlayConfig::new()).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(101);
/// let sites = overlay.simulate(&g, &mut rng).unwrap();
/// assert!(sites.windows(2).all(|w| w[0].position() < w[1].position()));
/// ```
#[derive(Clone, Debug)]
pub struct MutationOverlay<'m> {
    model: &'m MutationModel,
    rate_map: RateMap,
    config: OverlayConfig,
}

impl<'m> MutationOverlay<'m> {
    /// # Errors
    ///
    /// [`Error::InvalidTimeWindow`] if `config` is invalid.
    pub fn new(model: &'m MutationModel, rate_map: RateMap, config: OverlayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            model,
            rate_map,
            config,
        })
    }

    /// The mutation model
    pub fn model(&self) -> &MutationModel {
        self.model
    }

    /// The rate map
    pub fn rate_map(&self) -> &RateMap {
        &self.rate_map
    }

    /// The configuration
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Place mutations on a genealogy with no existing sites.
    ///
    /// See [`MutationOverlay::simulate_onto`].
    pub fn simulate<R: Rng>(&self, genealogy: &Genealogy, rng: &mut R) -> Result<SiteTable> {
        self.simulate_onto(genealogy, SiteTable::new(), rng)
    }

    /// Place mutations on a genealogy, stacking them onto `existing` sites.
    ///
    /// If the configuration does not keep existing sites they are discarded.
    /// Kept mutations retain their derived states, but the parent of every
    /// mutation is recomputed as the most recent earlier mutation on the
    /// path from its node to the root. Kept mutations must therefore carry
    /// a node.
    ///
    /// The output is sorted by position, and the mutations of each
    /// site are sorted by time.
    ///
    /// # Errors
    ///
    /// * [`Error::RateMapOutOfBounds`] if the rate map extends past
    ///   the genealogy's sequence length.
    /// * [`Error::SiteOutOfBounds`] if a kept site is not inside
    ///   `[0, sequence_length)`.
    /// * [`Error::MissingMutationNode`] or [`Error::UnknownMutationNode`]
    ///   if a kept mutation cannot be located on the genealogy.
    /// * [`Error::MutationTimeOutsideBranch`] if a kept mutation's time
    ///   is not on the branch above its node.
    /// * [`Error::UnknownAllele`] if a new mutation arises on a state
    ///   outside the model's alphabet.
    /// * [`Error::Core`] if `existing` is not sorted by position.
    #[tracing::instrument(skip_all, fields(num_nodes = genealogy.num_nodes(), num_existing_sites = existing.len()))]
    pub fn simulate_onto<R: Rng>(
        &self,
        genealogy: &Genealogy,
        existing: SiteTable,
        rng: &mut R,
    ) -> Result<SiteTable> {
        if self.rate_map.end() > genealogy.sequence_length() {
            return Err(Error::RateMapOutOfBounds {
                rate_map_end: self.rate_map.end(),
                sequence_length: genealogy.sequence_length(),
            });
        }
        validate_site_table(&existing)?;

        let mut pending = BTreeMap::new();
        if self.config.keep {
            for site in existing {
                let (position, site) = pending_from_existing(genealogy, site)?;
                pending.insert(position, site);
            }
        }
        let num_new = self.place_mutations(genealogy, &mut pending, rng)?;

        let mut sites = SiteTable::with_capacity(pending.len());
        for (position, mut site) in pending {
            let ancestral_state = match site.ancestral_state {
                Some(a) => a,
                None => self.model.alleles()[self.model.sample_root(rng)].clone(),
            };
            site.events.sort_by_key(|e| e.time);
            sites.push(self.resolve_site(genealogy, position, ancestral_state, site.events, rng)?);
        }
        debug!(num_sites = sites.len(), num_new, "placed mutations");
        Ok(sites)
    }

    fn place_mutations<R: Rng>(
        &self,
        genealogy: &Genealogy,
        pending: &mut BTreeMap<Position, PendingSite>,
        rng: &mut R,
    ) -> Result<u64> {
        let mut num_new = 0;
        for interval in self.rate_map.intervals() {
            if interval.rate() == 0.0 {
                continue;
            }
            let invalid = || Error::InvalidRateInterval {
                left: interval.left(),
                right: interval.right(),
                rate: interval.rate(),
            };
            let positions = Uniform::new(interval.left(), interval.right()).map_err(|_| invalid())?;
            for (parent, child) in genealogy.branches() {
                let (Some(p), Some(c)) = (genealogy.node(parent), genealogy.node(child)) else {
                    continue;
                };
                let lo = p.time.value().max(self.config.start_time);
                let hi = c.time.value().min(self.config.end_time);
                if hi <= lo {
                    continue;
                }
                let mean = interval.rate() * interval.span() as f64 * (hi - lo);
                if mean <= 0.0 {
                    continue;
                }
                let draw: f64 = rng.sample(Poisson::new(mean).map_err(|_| invalid())?);
                let count = draw as u64;
                for _ in 0..count {
                    let position = rng.sample(&positions);
                    // branches exclude their parent's time
                    let t = rng.random_range(lo..hi);
                    let time = Time::try_from(if t > p.time.value() { t } else { 0.5 * (lo + hi) })?;
                    pending
                        .entry(position)
                        .or_insert_with(|| PendingSite {
                            ancestral_state: None,
                            events: vec![],
                        })
                        .events
                        .push(PendingEvent {
                            time,
                            node: child,
                            derived_state: None,
                        });
                }
                num_new += count;
            }
        }
        Ok(num_new)
    }

    fn resolve_site<R: Rng>(
        &self,
        genealogy: &Genealogy,
        position: Position,
        ancestral_state: Allele,
        events: Vec<PendingEvent>,
        rng: &mut R,
    ) -> Result<Site> {
        let mut site = Site::new(position, ancestral_state);
        // ascending in time, like events
        let mut placed: Vec<(NodeId, Time, MutationId)> = Vec::with_capacity(events.len());
        for event in events {
            let parent = find_parent(genealogy, &placed, event.node, event.time);
            let derived_state = match event.derived_state {
                Some(d) => d,
                None => {
                    let from_state = parent
                        .and_then(|p| site.mutation(p))
                        .map(|m| m.derived_state())
                        .unwrap_or(site.ancestral_state());
                    let from = self.model.index_of(from_state.as_str())?;
                    let to = self
                        .model
                        .sample_transition(from, rng)
                        .ok_or_else(|| Error::UnknownAllele {
                            allele: from_state.clone(),
                        })?;
                    self.model.alleles()[to].clone()
                }
            };
            let id = site.add_mutation_on_node(derived_state, event.time, parent, event.node)?;
            placed.push((event.node, event.time, id));
        }
        Ok(site)
    }
}

fn pending_from_existing(genealogy: &Genealogy, site: Site) -> Result<(Position, PendingSite)> {
    let position = site.position();
    if position >= genealogy.sequence_length() {
        return Err(Error::SiteOutOfBounds(position));
    }
    let mut events = Vec::with_capacity(site.num_mutations());
    for m in site.mutations() {
        let node = m.node().ok_or(Error::MissingMutationNode(position))?;
        let n = genealogy
            .node(node)
            .ok_or(Error::UnknownMutationNode { position, node })?;
        // the branch above a node spans (parent time, node time]
        let after_parent = n
            .parent
            .and_then(|p| genealogy.node(p))
            .map_or(true, |p| m.time() > p.time);
        if !after_parent || m.time() > n.time {
            return Err(Error::MutationTimeOutsideBranch {
                position,
                node,
                time: m.time().value(),
            });
        }
        events.push(PendingEvent {
            time: m.time(),
            node,
            derived_state: Some(m.derived_state().clone()),
        });
    }
    Ok((
        position,
        PendingSite {
            ancestral_state: Some(site.ancestral_state().clone()),
            events,
        },
    ))
}

/// The most recent mutation older than `time` on the path from `node` to the root.
fn find_parent(
    genealogy: &Genealogy,
    placed: &[(NodeId, Time, MutationId)],
    node: NodeId,
    time: Time,
) -> Option<MutationId> {
    let mut current = Some(node);
    while let Some(c) = current {
        if let Some(&(_, _, id)) = placed.iter().rev().find(|&&(n, t, _)| n == c && t < time) {
            return Some(id);
        }
        current = genealogy.parent(c);
    }
    None
}
