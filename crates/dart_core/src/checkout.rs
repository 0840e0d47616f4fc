//! Checkout solver
//!
//! Maps every remaining score in `2..=170` to one finishing sequence of up to
//! three darts that ends on a double (or the inner bull).
//!
//! The table is two layers merged once at startup:
//! 1. a generated layer, searching 1-dart, then 2-dart, then 3-dart finishes
//!    and keeping the first hit per total
//! 2. a curated layer of standard expert finishes, which replaces the
//!    generated entry wherever both exist
//!
//! Scores that cannot be finished in three darts (159, 162, 163, 165, 166, 168,
//! 169) have no entry at all.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::board::segment::{Segment, BULL};

/// Lowest score that can be checked out (D1)
pub const MIN_CHECKOUT: u32 = 2;
/// Highest score that can be checked out (T20 T20 BULL)
pub const MAX_CHECKOUT: u32 = 170;

/// Shared table, built on first use.
pub static CHECKOUT_TABLE: Lazy<CheckoutTable> = Lazy::new(CheckoutTable::build);

/// Look up the shared table.
pub fn lookup(remaining: u32) -> Option<&'static Checkout> {
    CHECKOUT_TABLE.lookup(remaining)
}

/// A finishing sequence of 1..=3 darts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    darts: Vec<Segment>,
}

impl Checkout {
    fn new(darts: &[Segment]) -> Self {
        Self { darts: darts.to_vec() }
    }

    pub fn darts(&self) -> &[Segment] {
        &self.darts
    }

    pub fn len(&self) -> usize {
        self.darts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.darts.is_empty()
    }

    pub fn first(&self) -> Option<Segment> {
        self.darts.first().copied()
    }

    pub fn total(&self) -> u32 {
        self.darts.iter().map(|d| d.score).sum()
    }

    /// `T20 T20 BULL`
    pub fn label(&self) -> String {
        self.darts.iter().map(Segment::label).collect::<Vec<_>>().join(" ")
    }
}

/// Remaining score → checkout
#[derive(Debug, Clone)]
pub struct CheckoutTable {
    entries: BTreeMap<u32, Checkout>,
}

impl CheckoutTable {
    /// Generated layer overlaid with the curated layer.
    pub fn build() -> Self {
        let mut entries = generated_entries();
        entries.extend(curated_entries());
        log::debug!(
            "checkout table built: {} entries ({} curated)",
            entries.len(),
            CURATED.len()
        );
        Self { entries }
    }

    /// `None` for scores outside `2..=170` and for the seven unfinishable scores.
    pub fn lookup(&self, remaining: u32) -> Option<&Checkout> {
        self.entries.get(&remaining)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Checkout)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

// ========== Generated Layer ==========

/// Finishing darts, most popular doubles first.
fn finishing_darts() -> Vec<Segment> {
    const DOUBLE_PREFERENCE: [u8; 20] =
        [20, 16, 18, 12, 10, 8, 19, 17, 15, 14, 13, 11, 9, 7, 6, 5, 4, 3, 2, 1];
    let mut finals: Vec<Segment> = DOUBLE_PREFERENCE.iter().map(|&n| Segment::double(n)).collect();
    finals.push(Segment::INNER_BULL);
    finals
}

/// Every scoring dart, highest score first (trebles before doubles on equal score).
fn setup_darts() -> Vec<Segment> {
    let mut darts: Vec<Segment> = (1..=20u8)
        .flat_map(|n| (1..=3u8).map(move |m| Segment::sector(n, m)))
        .collect();
    darts.push(Segment::OUTER_BULL);
    darts.push(Segment::INNER_BULL);
    darts.sort_by(|a, b| b.score.cmp(&a.score).then(b.multiplier.cmp(&a.multiplier)));
    darts
}

fn generated_entries() -> BTreeMap<u32, Checkout> {
    let finals = finishing_darts();
    let setups = setup_darts();
    let mut entries = BTreeMap::new();
    let in_range = |total: u32| (MIN_CHECKOUT..=MAX_CHECKOUT).contains(&total);

    for fin in &finals {
        entries.entry(fin.score).or_insert_with(|| Checkout::new(&[*fin]));
    }

    for fin in &finals {
        for a in &setups {
            let total = a.score + fin.score;
            if in_range(total) {
                entries.entry(total).or_insert_with(|| Checkout::new(&[*a, *fin]));
            }
        }
    }

    for fin in &finals {
        for a in &setups {
            for b in &setups {
                let total = a.score + b.score + fin.score;
                if in_range(total) {
                    entries.entry(total).or_insert_with(|| Checkout::new(&[*a, *b, *fin]));
                }
            }
        }
    }

    entries
}

// ========== Curated Layer ==========

const fn s(n: u8) -> Segment {
    Segment::single(n)
}
const fn d(n: u8) -> Segment {
    Segment::double(n)
}
const fn t(n: u8) -> Segment {
    Segment::treble(n)
}
const B25: Segment = Segment::OUTER_BULL;
const BULLS_EYE: Segment = Segment::INNER_BULL;

/// Standard finishes from the professional checkout chart.
const CURATED: &[(u32, &[Segment])] = &[
    (170, &[t(20), t(20), BULLS_EYE]),
    (167, &[t(20), t(19), BULLS_EYE]),
    (164, &[t(20), t(18), BULLS_EYE]),
    (161, &[t(20), t(17), BULLS_EYE]),
    (160, &[t(20), t(20), d(20)]),
    (158, &[t(20), t(20), d(19)]),
    (157, &[t(20), t(19), d(20)]),
    (156, &[t(20), t(20), d(18)]),
    (155, &[t(20), t(19), d(19)]),
    (154, &[t(20), t(18), d(20)]),
    (153, &[t(20), t(19), d(18)]),
    (152, &[t(20), t(20), d(16)]),
    (151, &[t(20), t(17), d(20)]),
    (150, &[t(20), t(18), d(18)]),
    (149, &[t(20), t(19), d(16)]),
    (148, &[t(20), t(16), d(20)]),
    (147, &[t(20), t(17), d(18)]),
    (146, &[t(20), t(18), d(16)]),
    (145, &[t(20), t(15), d(20)]),
    (144, &[t(20), t(20), d(12)]),
    (143, &[t(20), t(17), d(16)]),
    (142, &[t(20), t(14), d(20)]),
    (141, &[t(20), t(19), d(12)]),
    (140, &[t(20), t(20), d(10)]),
    (139, &[t(20), t(13), d(20)]),
    (138, &[t(20), t(18), d(12)]),
    (137, &[t(20), t(19), d(10)]),
    (136, &[t(20), t(20), d(8)]),
    (135, &[t(20), t(17), d(12)]),
    (134, &[t(20), t(14), d(16)]),
    (133, &[t(20), t(19), d(8)]),
    (132, &[t(20), t(16), d(12)]),
    (131, &[t(20), t(13), d(16)]),
    (130, &[t(20), t(20), d(5)]),
    (129, &[t(19), t(16), d(12)]),
    (128, &[t(18), t(14), d(16)]),
    (127, &[t(20), t(17), d(8)]),
    (126, &[t(19), t(19), d(6)]),
    (125, &[B25, t(20), d(20)]),
    (124, &[t(20), t(16), d(8)]),
    (123, &[t(19), t(16), d(9)]),
    (122, &[t(18), t(20), d(4)]),
    (121, &[t(20), t(11), d(14)]),
    (120, &[t(20), s(20), d(20)]),
    (119, &[t(19), t(12), d(13)]),
    (118, &[t(20), s(18), d(20)]),
    (117, &[t(20), s(17), d(20)]),
    (116, &[t(20), s(16), d(20)]),
    (115, &[t(20), s(15), d(20)]),
    (114, &[t(20), s(14), d(20)]),
    (113, &[t(20), s(13), d(20)]),
    (112, &[t(20), t(12), d(8)]),
    (111, &[t(20), s(19), d(16)]),
    (110, &[t(20), BULLS_EYE]),
    (109, &[t(20), s(9), d(20)]),
    (108, &[t(20), s(16), d(16)]),
    (107, &[t(19), BULLS_EYE]),
    (106, &[t(20), s(6), d(20)]),
    (105, &[t(20), s(13), d(16)]),
    (104, &[t(18), BULLS_EYE]),
    (103, &[t(19), s(6), d(20)]),
    (102, &[t(20), s(10), d(16)]),
    (101, &[t(17), BULLS_EYE]),
    (100, &[t(20), d(20)]),
    (99, &[t(19), s(10), d(16)]),
    (98, &[t(20), d(19)]),
    (97, &[t(19), d(20)]),
    (96, &[t(20), d(18)]),
    (95, &[t(19), d(19)]),
    (94, &[t(18), d(20)]),
    (93, &[t(19), d(18)]),
    (92, &[t(20), d(16)]),
    (91, &[t(17), d(20)]),
    (90, &[t(20), d(15)]),
    (89, &[t(19), d(16)]),
    (88, &[t(16), d(20)]),
    (87, &[t(17), d(18)]),
    (86, &[t(18), d(16)]),
    (85, &[t(15), d(20)]),
    (84, &[t(20), d(12)]),
    (83, &[t(17), d(16)]),
    (82, &[BULLS_EYE, d(16)]),
    (81, &[t(19), d(12)]),
    (80, &[t(20), d(10)]),
    (79, &[t(19), d(11)]),
    (78, &[t(18), d(12)]),
    (77, &[t(19), d(10)]),
    (76, &[t(20), d(8)]),
    (75, &[t(17), d(12)]),
    (74, &[t(14), d(16)]),
    (73, &[t(19), d(8)]),
    (72, &[t(16), d(12)]),
    (71, &[t(13), d(16)]),
    (70, &[t(18), d(8)]),
    (69, &[t(19), d(6)]),
    (68, &[t(20), d(4)]),
    (67, &[t(17), d(8)]),
    (66, &[t(10), d(18)]),
    (65, &[t(19), d(4)]),
    (64, &[t(16), d(8)]),
    (63, &[t(13), d(12)]),
    (62, &[t(10), d(16)]),
    (61, &[t(15), d(8)]),
    (60, &[s(20), d(20)]),
    (50, &[BULLS_EYE]),
    (40, &[d(20)]),
    (36, &[d(18)]),
    (32, &[d(16)]),
];

fn curated_entries() -> impl Iterator<Item = (u32, Checkout)> {
    CURATED.iter().map(|(score, darts)| (*score, Checkout::new(darts)))
}

fn is_finishing_dart(seg: &Segment) -> bool {
    seg.is_double() && (seg.number <= 20 || seg.number == BULL)
}

/// Checkout validity: 1..=3 darts, sums to `remaining`, last dart a double.
pub fn is_valid_checkout(remaining: u32, checkout: &Checkout) -> bool {
    (1..=3).contains(&checkout.len())
        && checkout.total() == remaining
        && checkout.darts().last().is_some_and(is_finishing_dart)
}

// ========== Tests ==========
