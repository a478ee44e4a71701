//! Canned coaching messages shown next to the drawing surface.

use crate::config::CuratorConfig;

/// Source of uniform values in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = (self.next_f64() * items.len() as f64) as usize;
        items.get(idx.min(items.len() - 1))
    }
}

/// Browser randomness via `getrandom`'s JS backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn next_f64(&mut self) -> f64 {
        let mut buf = [0u8; 8];
        if let Err(e) = getrandom::getrandom(&mut buf) {
            log::warn!("random source unavailable: {}", e);
            return 0.0;
        }
        // 53 random bits into the mantissa.
        (u64::from_le_bytes(buf) >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Curator {
    config: CuratorConfig,
    message: String,
}

impl Curator {
    pub fn new(config: CuratorConfig) -> Self {
        let message = config.greeting.clone();
        Self { config, message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    /// React to a colour pick. Colours without feedback leave the current
    /// message alone.
    pub fn on_color_selected(&mut self, color: &str, rng: &mut impl RandomSource) -> bool {
        let lines = self
            .config
            .color_feedback
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(color))
            .map(|(_, lines)| lines.as_slice())
            .unwrap_or(&[]);

        match rng.pick(lines) {
            Some(line) => {
                self.message = line.clone();
                true
            }
            None => false,
        }
    }

    /// React to the start of a stroke. Praises only occasionally.
    pub fn on_interaction(&mut self, rng: &mut impl RandomSource) -> bool {
        if rng.next_f64() >= self.config.praise_probability {
            return false;
        }
        match rng.pick(&self.config.praise) {
            Some(line) => {
                self.message = line.clone();
                true
            }
            None => false,
        }
    }

    pub fn on_avatar_clicked(&mut self) {
        self.message = self.config.avatar_message.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed sequence of values.
    struct Sequence(Vec<f64>, usize);

    impl Sequence {
        fn new(values: &[f64]) -> Self {
            Self(values.to_vec(), 0)
        }
    }

    impl RandomSource for Sequence {
        fn next_f64(&mut self) -> f64 {
            let value = self.0[self.1 % self.0.len()];
            self.1 += 1;
            value
        }
    }

    #[test]
    fn test_starts_with_greeting() {
        let config = CuratorConfig::default();
        let curator = Curator::new(config.clone());
        assert_eq!(curator.message(), config.greeting);
    }

    #[test]
    fn test_color_feedback_picks_from_list() {
        let mut curator = Curator::new(CuratorConfig::default());
        assert!(curator.on_color_selected("#ff5252", &mut Sequence::new(&[0.99])));
        assert_eq!(curator.message(), "화면이 환해지는 느낌이에요.");
    }

    #[test]
    fn test_unknown_color_keeps_message() {
        let mut curator = Curator::new(CuratorConfig::default());
        assert!(!curator.on_color_selected("#795548", &mut Sequence::new(&[0.0])));
        assert_eq!(curator.message(), CuratorConfig::default().greeting);
    }

    #[test]
    fn test_praise_respects_probability() {
        let mut curator = Curator::new(CuratorConfig::default());
        assert!(!curator.on_interaction(&mut Sequence::new(&[0.5])));
        assert_eq!(curator.message(), CuratorConfig::default().greeting);

        assert!(curator.on_interaction(&mut Sequence::new(&[0.1, 0.0])));
        assert_eq!(curator.message(), "선이 참 시원시원하시네요! 👏");
    }

    #[test]
    fn test_avatar_click() {
        let mut curator = Curator::new(CuratorConfig::default());
        curator.on_avatar_clicked();
        assert_eq!(curator.message(), CuratorConfig::default().avatar_message);
    }

    #[test]
    fn test_pick_handles_empty_and_edge_values() {
        let empty: [u8; 0] = [];
        assert_eq!(Sequence::new(&[0.5]).pick(&empty), None);
        assert_eq!(Sequence::new(&[1.0]).pick(&[1, 2, 3]), Some(&3));
    }

    #[test]
    fn test_system_random_in_unit_range() {
        let mut rng = SystemRandom;
        for _ in 0..32 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value));
        }
    }
}
