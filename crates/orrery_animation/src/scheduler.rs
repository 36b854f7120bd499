//! Animation scheduler
//!
//! Owns every live animation instance and steps them once per frame.

use orrery_core::{sanitize_delta, seeded_rng, TransformHandle};
use rand::rngs::StdRng;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::chain::{ChainId, ChainSequencer, ChainStep};
use crate::config::{AnimationConfig, AnimationKind};
use crate::motion::{Motion, StepOutcome};

new_key_type! {
    /// Generation-tagged id of a registered animation
    pub struct AnimationId;
}

/// A registered animation bound to its target
pub(crate) struct AnimationInstance {
    pub target: TransformHandle,
    pub motion: Motion,
}

/// Live instances plus their registration order
#[derive(Default)]
pub(crate) struct AnimationSet {
    instances: SlotMap<AnimationId, AnimationInstance>,
    order: Vec<AnimationId>,
}

impl AnimationSet {
    pub fn insert(&mut self, target: &TransformHandle, config: AnimationConfig) -> AnimationId {
        let kind = config.kind();
        let motion = Motion::new(config, &target.get());
        let id = self.instances.insert(AnimationInstance {
            target: target.clone(),
            motion,
        });
        self.order.push(id);
        tracing::debug!(?id, %kind, "animation registered");
        id
    }

    pub fn remove(&mut self, id: AnimationId) -> bool {
        if self.instances.remove(id).is_none() {
            return false;
        }
        self.order.retain(|&other| other != id);
        tracing::debug!(?id, "animation removed");
        true
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }
}

/// The animation scheduler that ticks all active animations
pub struct AnimationScheduler {
    animations: AnimationSet,
    chains: ChainSequencer,
    rng: StdRng,
}

impl AnimationScheduler {
    /// Scheduler with an entropy-seeded random source
    pub fn new() -> Self {
        Self::from_rng(seeded_rng(None))
    }

    /// Scheduler whose shake noise is reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(seeded_rng(Some(seed)))
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self {
            animations: AnimationSet::default(),
            chains: ChainSequencer::default(),
            rng,
        }
    }

    /// Start animating `target`. Start state is captured from the target now.
    pub fn register(
        &mut self,
        target: &TransformHandle,
        config: impl Into<AnimationConfig>,
    ) -> AnimationId {
        self.animations.insert(target, config.into())
    }

    /// Stop one animation, leaving the target where it is.
    ///
    /// Unknown or already-removed ids are ignored; returns whether anything was removed.
    pub fn stop(&mut self, id: AnimationId) -> bool {
        self.animations.remove(id)
    }

    /// Stop every animation and chain bound to `target`; returns the number of
    /// animations removed
    pub fn stop_all(&mut self, target: &TransformHandle) -> usize {
        let ids: SmallVec<[AnimationId; 8]> = self
            .animations
            .order
            .iter()
            .copied()
            .filter(|&id| {
                self.animations
                    .instances
                    .get(id)
                    .is_some_and(|instance| instance.target.same_node(target))
            })
            .collect();

        for &id in &ids {
            self.animations.remove(id);
        }
        self.chains.cancel_for_target(target, &mut self.animations);
        ids.len()
    }

    /// Remove every animation and chain
    pub fn clear(&mut self) {
        self.animations.instances.clear();
        self.animations.order.clear();
        self.chains.clear();
        tracing::debug!("animation scheduler cleared");
    }

    /// Run `steps` one after another on `target`
    pub fn chain(
        &mut self,
        target: &TransformHandle,
        steps: impl IntoIterator<Item = ChainStep>,
    ) -> ChainId {
        self.chains
            .start(target, steps.into_iter().collect(), &mut self.animations)
    }

    /// Cancel a chain and stop its active step; unknown ids are ignored
    pub fn cancel_chain(&mut self, id: ChainId) -> bool {
        self.chains.cancel(id, &mut self.animations)
    }

    /// Whether a chain has run out of steps (or never existed)
    pub fn is_chain_finished(&self, id: ChainId) -> bool {
        !self.chains.contains(id)
    }

    /// Animation currently driven by a chain, if any
    pub fn chain_active_step(&self, id: ChainId) -> Option<AnimationId> {
        self.chains.active_animation(id)
    }

    /// Advance all animations by `dt` seconds, in registration order.
    ///
    /// Chain countdowns consume the same `dt` after the animation pass.
    pub fn advance(&mut self, dt: f32) {
        let dt = sanitize_delta(dt);
        let Self {
            animations,
            chains,
            rng,
        } = self;

        let mut finished: SmallVec<[AnimationId; 4]> = SmallVec::new();
        for &id in &animations.order {
            let Some(AnimationInstance { target, motion }) = animations.instances.get_mut(id)
            else {
                continue;
            };
            let outcome = target.update(|transform| motion.step(dt, transform, rng));
            if outcome == StepOutcome::Finished {
                finished.push(id);
            }
        }

        for id in finished {
            tracing::trace!(?id, "animation finished");
            animations.remove(id);
        }

        chains.tick(dt, animations);
    }

    /// Number of live animations
    pub fn active_count(&self) -> usize {
        self.animations.len()
    }

    /// Number of chains still running
    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    pub fn contains(&self, id: AnimationId) -> bool {
        self.animations.instances.contains_key(id)
    }

    pub fn kind_of(&self, id: AnimationId) -> Option<AnimationKind> {
        self.animations
            .instances
            .get(id)
            .map(|instance| instance.motion.kind())
    }

    /// Config and state of a live animation
    pub fn motion(&self, id: AnimationId) -> Option<&Motion> {
        self.animations
            .instances
            .get(id)
            .map(|instance| &instance.motion)
    }

    /// Target of a live animation
    pub fn target(&self, id: AnimationId) -> Option<&TransformHandle> {
        self.animations
            .instances
            .get(id)
            .map(|instance| &instance.target)
    }

    /// Live animation ids in evaluation order
    pub fn ids(&self) -> impl Iterator<Item = AnimationId> + '_ {
        self.animations.order.iter().copied()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
