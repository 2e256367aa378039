use serde::{Deserialize, Serialize};

/// Per-base tallies, in the order the marketplace reports them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NucleotideCounts {
    pub a: u64,
    pub c: u64,
    pub t: u64,
    pub g: u64,
}

impl NucleotideCounts {
    pub fn total(&self) -> u64 {
        self.a + self.c + self.t + self.g
    }

    pub fn gc(&self) -> u64 {
        self.g + self.c
    }
}

/// Count A, C, T and G bases. Other symbols are ignored.
pub fn nucleotide_counts(seq: &str) -> NucleotideCounts {
    let mut counts = NucleotideCounts::default();
    for base in seq.chars() {
        match base.to_ascii_uppercase() {
            'A' => counts.a += 1,
            'C' => counts.c += 1,
            'T' => counts.t += 1,
            'G' => counts.g += 1,
            _ => {}
        }
    }
    counts
}

/// Number of G and C bases in a sequence
pub fn gc_base_pairs(seq: &str) -> u64 {
    nucleotide_counts(seq).gc()
}

/// GC content as a fraction (0.0 to 1.0) of the counted bases
pub fn gc_content(seq: &str) -> f64 {
    let counts = nucleotide_counts(seq);
    if counts.total() == 0 {
        return 0.0;
    }
    counts.gc() as f64 / counts.total() as f64
}

/// Count aligned positions where both sequences carry the same base.
///
/// Sequences are compared position by position up to the shorter length.
/// Only A, C, G and T count as matches, so `N` against `N` does not.
pub fn homologous_base_pairs(a: &str, b: &str) -> u64 {
    a.chars()
        .zip(b.chars())
        .filter(|(x, y)| {
            let x = x.to_ascii_uppercase();
            matches!(x, 'A' | 'C' | 'G' | 'T') && x == y.to_ascii_uppercase()
        })
        .count() as u64
}
