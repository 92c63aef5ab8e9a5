// src/stemmer.rs
//! Stemming capability.
//!
//! The normalizer only sees `Stemmer::stem`. Two implementations ship:
//! - `IndonesianStemmer`: affix stripper (particles, possessives, first/second
//!   order derivational prefixes, derivational suffixes), following the
//!   measure-guarded rules of the Snowball Indonesian algorithm. Nasal prefixes
//!   before a vowel restore the assimilated `k`/`t` (`mengirim` -> `kirim`,
//!   `menulis` -> `tulis`) unless the remainder is a known vowel-initial root.
//! - `IdentityStemmer`: returns the word unchanged.
//!
//! `IndonesianStemmer` is not strictly idempotent: a second pass may strip one
//! more affix layer from an already reduced word.

use serde::Deserialize;
use std::sync::Arc;

/// Deterministic, pure `word -> root` reduction.
pub trait Stemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_string()
    }
}

/// Stemmer selection in configuration (`[pipeline] stemmer = "..."`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemmerKind {
    #[default]
    Indonesian,
    Identity,
}

impl StemmerKind {
    pub fn build(self) -> Arc<dyn Stemmer> {
        match self {
            StemmerKind::Indonesian => Arc::new(IndonesianStemmer),
            StemmerKind::Identity => Arc::new(IdentityStemmer),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IndonesianStemmer;

impl Stemmer for IndonesianStemmer {
    fn stem(&self, word: &str) -> String {
        // Rules are defined over ASCII letters only.
        if !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return word.to_string();
        }
        let mut w = Word::new(word);
        if w.measure <= 2 {
            return w.s;
        }

        w.remove_particle();
        if w.measure <= 2 {
            return w.s;
        }
        w.remove_possessive_pronoun();
        if w.measure <= 2 {
            return w.s;
        }

        if w.remove_first_order_prefix() {
            if w.measure > 2 && w.remove_suffix() && w.measure > 2 {
                w.remove_second_order_prefix();
            }
        } else {
            w.remove_second_order_prefix();
            if w.measure > 2 {
                w.remove_suffix();
            }
        }
        w.s
    }
}

/// Vowel-initial roots that take `meng-`/`peng-` without an assimilated `k`.
const VOWEL_ROOTS: &[&str] = &[
    "ajar", "akses", "aktif", "alam", "ambil", "angkat", "antar", "atur", "edit", "empat",
    "ikut", "ingat", "ingin", "isi", "olah", "ubah", "ukur", "umum", "unduh", "unggah", "urus",
];

// Prefix classes, used to gate suffix removal.
const PREFIX_NONE: u8 = 0;
const PREFIX_DI_MENG_TER: u8 = 1;
const PREFIX_PER: u8 = 2;
const PREFIX_KE_PENG: u8 = 3;
const PREFIX_BER: u8 = 4;

struct Word {
    s: String,
    /// Number of vowels left; every removed affix carries exactly one.
    measure: usize,
    prefix: u8,
}

impl Word {
    fn new(word: &str) -> Self {
        Self {
            s: word.to_string(),
            measure: word.bytes().filter(|b| is_vowel(*b)).count(),
            prefix: PREFIX_NONE,
        }
    }

    fn strip_suffix(&mut self, n: usize) {
        self.s.truncate(self.s.len() - n);
        self.measure = self.measure.saturating_sub(1);
    }

    fn replace_prefix(&mut self, n: usize, with: &str, prefix: u8) {
        self.s.replace_range(..n, with);
        self.measure = self.measure.saturating_sub(1);
        self.prefix = prefix;
    }

    fn vowel_at(&self, i: usize) -> bool {
        self.s.as_bytes().get(i).is_some_and(|b| is_vowel(*b))
    }

    fn remove_particle(&mut self) -> bool {
        match ["kah", "lah", "pun"].iter().find(|p| self.s.ends_with(*p)) {
            Some(p) => {
                self.strip_suffix(p.len());
                true
            }
            None => false,
        }
    }

    fn remove_possessive_pronoun(&mut self) -> bool {
        match ["nya", "ku", "mu"].iter().find(|p| self.s.ends_with(*p)) {
            Some(p) => {
                self.strip_suffix(p.len());
                true
            }
            None => false,
        }
    }

    fn remove_suffix(&mut self) -> bool {
        let s = self.s.as_str();
        if s.ends_with("kan") && self.prefix != PREFIX_KE_PENG && self.prefix != PREFIX_PER {
            self.strip_suffix(3);
        } else if s.ends_with("an") && self.prefix != PREFIX_DI_MENG_TER {
            self.strip_suffix(2);
        } else if s.ends_with('i') && self.prefix <= PREFIX_PER && !s.ends_with("si") {
            self.strip_suffix(1);
        } else {
            return false;
        }
        true
    }

    /// Longest matching prefix wins; conditional entries fall back to shorter ones.
    fn remove_first_order_prefix(&mut self) -> bool {
        let s = self.s.as_str();
        let (n, with, class) = if s.starts_with("meng") {
            (4, self.restore_k(4), PREFIX_DI_MENG_TER)
        } else if s.starts_with("meny") && self.vowel_at(4) {
            (4, "s", PREFIX_DI_MENG_TER)
        } else if s.starts_with("peng") {
            (4, self.restore_k(4), PREFIX_KE_PENG)
        } else if s.starts_with("peny") && self.vowel_at(4) {
            (4, "s", PREFIX_KE_PENG)
        } else if s.starts_with("mem") {
            (3, if self.vowel_at(3) { "p" } else { "" }, PREFIX_DI_MENG_TER)
        } else if s.starts_with("pem") {
            (3, if self.vowel_at(3) { "p" } else { "" }, PREFIX_KE_PENG)
        } else if s.starts_with("men") {
            (3, if self.vowel_at(3) { "t" } else { "" }, PREFIX_DI_MENG_TER)
        } else if s.starts_with("ter") {
            (3, "", PREFIX_DI_MENG_TER)
        } else if s.starts_with("pen") {
            (3, if self.vowel_at(3) { "t" } else { "" }, PREFIX_KE_PENG)
        } else if s.starts_with("di") || s.starts_with("me") {
            (2, "", PREFIX_DI_MENG_TER)
        } else if s.starts_with("ke") {
            (2, "", PREFIX_KE_PENG)
        } else {
            return false;
        };
        self.replace_prefix(n, with, class);
        true
    }

    fn remove_second_order_prefix(&mut self) -> bool {
        let s = self.s.as_str();
        if s.starts_with("pelajar") {
            // prefix class left untouched
            self.s.replace_range(..7, "ajar");
            self.measure = self.measure.saturating_sub(1);
        } else if s.starts_with("belajar") {
            self.replace_prefix(7, "ajar", PREFIX_BER);
        } else if s.starts_with("per") {
            self.replace_prefix(3, "", PREFIX_PER);
        } else if s.starts_with("ber") {
            self.replace_prefix(3, "", PREFIX_BER);
        } else if s.starts_with("pe") {
            self.replace_prefix(2, "", PREFIX_PER);
        } else if s.starts_with("be") && self.ker_at(2) {
            self.replace_prefix(2, "", PREFIX_BER);
        } else {
            return false;
        }
        true
    }

    /// `k` for `meng`/`peng` + vowel, unless the rest starts with a known vowel root.
    fn restore_k(&self, at: usize) -> &'static str {
        let rest = &self.s[at..];
        if self.vowel_at(at) && !VOWEL_ROOTS.iter().any(|r| rest.starts_with(r)) {
            "k"
        } else {
            ""
        }
    }

    /// Consonant followed by "er" at byte offset `i`.
    fn ker_at(&self, i: usize) -> bool {
        let b = self.s.as_bytes();
        b.len() >= i + 3 && !is_vowel(b[i]) && &b[i + 1..i + 3] == b"er"
    }
}

#[inline]
fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}
