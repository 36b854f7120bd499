//! Chained animation sequences
//!
//! A chain runs its steps one after another on a single target. Timed steps
//! count down the same simulated `dt` the scheduler advances with; steps
//! without a duration start their animation, leave it running, and hand over
//! to the next step immediately.

use orrery_core::TransformHandle;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::config::AnimationConfig;
use crate::scheduler::{AnimationId, AnimationSet};

new_key_type! {
    /// Generation-tagged id of a chain
    pub struct ChainId;
}

/// One step of a chain
#[derive(Clone, Debug, PartialEq)]
pub struct ChainStep {
    pub config: AnimationConfig,
    /// Seconds of simulated time before the step is stopped and the next one starts
    pub duration: Option<f32>,
}

impl ChainStep {
    /// A step that starts its animation and immediately yields to the next step
    pub fn new(config: impl Into<AnimationConfig>) -> Self {
        Self {
            config: config.into(),
            duration: None,
        }
    }

    /// A step that runs for `seconds` before being stopped
    pub fn timed(config: impl Into<AnimationConfig>, seconds: f32) -> Self {
        Self {
            config: config.into(),
            duration: Some(seconds),
        }
    }

    /// Duration that actually holds the chain; zero or invalid durations do not
    fn hold(&self) -> Option<f32> {
        self.duration.filter(|d| d.is_finite() && *d > 0.0)
    }
}

struct Chain {
    target: TransformHandle,
    steps: SmallVec<[ChainStep; 4]>,
    next: usize,
    active: Option<AnimationId>,
    remaining: f32,
}

impl Chain {
    /// Start steps until one holds the chain or the steps run out
    fn start_next(&mut self, animations: &mut AnimationSet) {
        while let Some(step) = self.steps.get(self.next) {
            self.next += 1;
            let id = animations.insert(&self.target, step.config.clone());
            if let Some(duration) = step.hold() {
                self.active = Some(id);
                self.remaining += duration;
                return;
            }
        }
        self.active = None;
    }

    fn is_finished(&self) -> bool {
        self.active.is_none() && self.next >= self.steps.len()
    }

    fn tick(&mut self, dt: f32, animations: &mut AnimationSet) {
        self.remaining -= dt;
        while self.remaining <= 0.0 {
            let Some(active) = self.active.take() else {
                break;
            };
            animations.remove(active);
            self.start_next(animations);
        }
    }
}

/// Running chains
#[derive(Default)]
pub(crate) struct ChainSequencer {
    chains: SlotMap<ChainId, Chain>,
}

impl ChainSequencer {
    pub fn start(
        &mut self,
        target: &TransformHandle,
        steps: SmallVec<[ChainStep; 4]>,
        animations: &mut AnimationSet,
    ) -> ChainId {
        let step_count = steps.len();
        let mut chain = Chain {
            target: target.clone(),
            steps,
            next: 0,
            active: None,
            remaining: 0.0,
        };
        chain.start_next(animations);

        let finished = chain.is_finished();
        let id = self.chains.insert(chain);
        if finished {
            // every step was untimed; nothing left to drive
            self.chains.remove(id);
        }
        tracing::debug!(?id, step_count, finished, "chain started");
        id
    }

    pub fn tick(&mut self, dt: f32, animations: &mut AnimationSet) {
        let mut done: SmallVec<[ChainId; 4]> = SmallVec::new();
        for (id, chain) in self.chains.iter_mut() {
            chain.tick(dt, animations);
            if chain.is_finished() {
                done.push(id);
            }
        }
        for id in done {
            tracing::debug!(?id, "chain finished");
            self.chains.remove(id);
        }
    }

    pub fn cancel(&mut self, id: ChainId, animations: &mut AnimationSet) -> bool {
        let Some(chain) = self.chains.remove(id) else {
            return false;
        };
        if let Some(active) = chain.active {
            animations.remove(active);
        }
        tracing::debug!(?id, "chain cancelled");
        true
    }

    pub fn cancel_for_target(&mut self, target: &TransformHandle, animations: &mut AnimationSet) {
        let ids: SmallVec<[ChainId; 4]> = self
            .chains
            .iter()
            .filter(|(_, chain)| chain.target.same_node(target))
            .map(|(id, _)| id)
            .collect();
        for id in ids {
            self.cancel(id, animations);
        }
    }

    pub fn active_animation(&self, id: ChainId) -> Option<AnimationId> {
        self.chains.get(id).and_then(|chain| chain.active)
    }

    pub fn contains(&self, id: ChainId) -> bool {
        self.chains.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn clear(&mut self) {
        self.chains.clear();
    }
}
