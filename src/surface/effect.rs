use crate::errors::Result;
use crate::scene::Scene;

/// Whether an effect wants another step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectState {
    Running,
    Finished,
}

/// A transient, self-terminating animation living in the scene.
///
/// Effects are stepped by the surface once per tick, after the program
/// update. An effect is responsible for removing whatever it added to the
/// scene before it reports [`EffectState::Finished`]; the surface then drops
/// it. Nothing outside the effect can stop it early except unmounting the
/// surface, which drops every live effect together with the scene.
pub trait Effect {
    fn name(&self) -> &'static str;

    fn step(&mut self, scene: &mut Scene) -> Result<EffectState>;
}

/// Live effects of one surface.
#[derive(Default)]
pub struct Effects {
    live: Vec<Box<dyn Effect>>,
}

impl Effects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an effect. Effects are independent: spawning the same kind twice
    /// runs two of them side by side.
    pub fn spawn(&mut self, effect: Box<dyn Effect>) {
        log::debug!("Effects: spawn '{}'", effect.name());
        self.live.push(effect);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Steps every live effect once and drops the finished ones.
    pub(crate) fn step_all(&mut self, scene: &mut Scene) -> Result<()> {
        let mut i = 0;
        while i < self.live.len() {
            match self.live[i].step(scene)? {
                EffectState::Running => i += 1,
                EffectState::Finished => {
                    let done = self.live.swap_remove(i);
                    log::debug!("Effects: '{}' finished", done.name());
                }
            }
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.live.clear();
    }
}
