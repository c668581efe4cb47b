//! The UI seam.
//!
//! A `Presenter` receives effects in emission order and renders them:
//! toggling CSS classes, playing audio buffers, drawing terminal widgets.
//! `Vec<Effect>` implements it so tests can record what a game asked for.

use super::effect::{Effect, EffectBatch};

/// Renders game effects.
pub trait Presenter {
    /// Render one effect.
    fn present(&mut self, effect: Effect);
}

impl Presenter for Vec<Effect> {
    fn present(&mut self, effect: Effect) {
        self.push(effect);
    }
}

impl EffectBatch {
    /// Hand every pending effect to a presenter, in order.
    pub fn flush_to<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        for effect in self.drain() {
            presenter.present(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Cue;

    /// Counts sounds, ignores everything else.
    struct SoundCounter(usize);

    impl Presenter for SoundCounter {
        fn present(&mut self, effect: Effect) {
            if matches!(effect, Effect::PlaySound(_) | Effect::Cue(_)) {
                self.0 += 1;
            }
        }
    }

    #[test]
    fn test_flush_to_presenter() {
        let mut batch = EffectBatch::new();
        batch.push(Effect::Cue(Cue::Wrong));
        batch.push(Effect::Shake);
        batch.push(Effect::Cue(Cue::Hit));

        let mut counter = SoundCounter(0);
        batch.flush_to(&mut counter);
        assert_eq!(counter.0, 2);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_vec_records() {
        let mut batch = EffectBatch::new();
        batch.push(Effect::Celebrate);

        let mut recorded: Vec<Effect> = Vec::new();
        batch.flush_to(&mut recorded);
        assert_eq!(recorded, vec![Effect::Celebrate]);
    }
}
