use serde::{Deserialize, Serialize};

const WORD_BITS: usize = u64::BITS as usize;

/// A fixed-universe bitset over dense question indices (see
/// [`crate::QuestionIndex`]).
///
/// The Minimizer's greedy loop computes `|visible(s) ∩ uncovered|` and
/// `uncovered -= visible(s)` once per candidate scenario per iteration; doing
/// that with a word-at-a-time bitset keeps each step linear in
/// `universe_size / 64` rather than in the number of questions compared one
/// at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionMask {
    words: Vec<u64>,
}

impl QuestionMask {
    pub fn with_capacity(bits: usize) -> Self {
        let words = (bits + WORD_BITS - 1) / WORD_BITS;
        QuestionMask {
            words: vec![0u64; words],
        }
    }

    pub fn insert(&mut self, index: usize) {
        let (word, bit) = Self::locate(index);
        self.ensure_words(word + 1);
        self.words[word] |= 1u64 << bit;
    }

    pub fn contains(&self, index: usize) -> bool {
        let (word, bit) = Self::locate(index);
        self.words.get(word).map_or(false, |w| w & (1u64 << bit) != 0)
    }

    pub fn union_with(&mut self, other: &QuestionMask) {
        self.ensure_words(other.words.len());
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a |= *b;
        }
    }

    pub fn difference_with(&mut self, other: &QuestionMask) {
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a &= !*b;
        }
    }

    pub fn intersection_count(&self, other: &QuestionMask) -> u32 {
        self.words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| (a & b).count_ones())
            .sum()
    }

    /// The bitwise intersection as a new mask, sized to `self`.
    pub fn intersection(&self, other: &QuestionMask) -> QuestionMask {
        let mut result = self.clone();
        for (a, b) in result.words.iter_mut().zip(other.words.iter()) {
            *a &= *b;
        }
        for a in result.words.iter_mut().skip(other.words.len()) {
            *a = 0;
        }
        result
    }

    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(word_idx, &word)| {
            (0..WORD_BITS).filter_map(move |bit| {
                if word & (1u64 << bit) != 0 {
                    Some(word_idx * WORD_BITS + bit)
                } else {
                    None
                }
            })
        })
    }

    fn locate(index: usize) -> (usize, usize) {
        (index / WORD_BITS, index % WORD_BITS)
    }

    fn ensure_words(&mut self, words: usize) {
        if self.words.len() < words {
            self.words.resize(words, 0);
        }
    }
}
