//! Keyboard chords for human play.
use std::collections::HashMap;

/// Key code of space.
pub const K_SPACE: u32 = 32;

/// Key code of `a`.
pub const K_A: u32 = 97;

/// Key code of `d`.
pub const K_D: u32 = 100;

/// Key code of `s`.
pub const K_S: u32 = 115;

/// Key code of `w`.
pub const K_W: u32 = 119;

const KEYS_TO_ACTION: [(&[u32], usize); 18] = [
    (&[], 0),
    (&[K_SPACE], 1),
    (&[K_W], 2),
    (&[K_D], 3),
    (&[K_A], 4),
    (&[K_S], 5),
    (&[K_D, K_W], 6),
    (&[K_A, K_W], 7),
    (&[K_D, K_S], 8),
    (&[K_A, K_S], 9),
    (&[K_SPACE, K_W], 10),
    (&[K_SPACE, K_D], 11),
    (&[K_SPACE, K_A], 12),
    (&[K_SPACE, K_S], 13),
    (&[K_SPACE, K_D, K_W], 14),
    (&[K_SPACE, K_A, K_W], 15),
    (&[K_SPACE, K_D, K_S], 16),
    (&[K_SPACE, K_A, K_S], 17),
];

/// Maps sorted chords of key codes to discrete actions.
///
/// The table is the same for every game. The empty chord, no key pressed, is action 0.
pub fn keys_to_action() -> HashMap<Vec<u32>, usize> {
    KEYS_TO_ACTION
        .iter()
        .map(|(keys, a)| (keys.to_vec(), *a))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_keys_to_action() {
        let map = keys_to_action();

        assert_eq!(map.len(), 18);
        assert_eq!(map[&Vec::<u32>::new()], 0);
        assert_eq!(map[&vec![K_SPACE]], 1);
        assert_eq!(map[&vec![K_D, K_W]], 6);
        assert_eq!(map[&vec![K_SPACE, K_A, K_S]], 17);

        let mut actions: Vec<_> = map.values().copied().collect();
        actions.sort_unstable();
        assert_eq!(actions, (0..18).collect::<Vec<_>>());
    }
}
