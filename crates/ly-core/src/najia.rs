//! Na Jia (纳甲): stem-branch assignment for the six lines.
//!
//! Every trigram carries one triple for when it sits below (lines 1–3) and
//! another for when it sits above (lines 4–6).

use crate::branch::{Branch, Stem, StemBranch};
use crate::cast::Hexagram;
use crate::error::CoreResult;
use crate::trigram::Trigram;

const fn sb(stem: Stem, branch: Branch) -> StemBranch {
    StemBranch::new(stem, branch)
}

use Branch::{Chen, Chou, Hai, Mao, Shen, Si, Wei, Xu, Yin, You, Zi};

/// Inner and outer triples per trigram, in palace order.
const TABLE: [([StemBranch; 3], [StemBranch; 3]); 8] = [
    // 乾
    (
        [sb(Stem::Jia, Zi), sb(Stem::Jia, Yin), sb(Stem::Jia, Chen)],
        [sb(Stem::Ren, Branch::Wu), sb(Stem::Ren, Shen), sb(Stem::Ren, Xu)],
    ),
    // 兑
    (
        [sb(Stem::Ding, Si), sb(Stem::Ding, Mao), sb(Stem::Ding, Chou)],
        [sb(Stem::Ding, Hai), sb(Stem::Ding, You), sb(Stem::Ding, Wei)],
    ),
    // 离
    (
        [sb(Stem::Ji, Mao), sb(Stem::Ji, Chou), sb(Stem::Ji, Hai)],
        [sb(Stem::Ji, You), sb(Stem::Ji, Wei), sb(Stem::Ji, Si)],
    ),
    // 震
    (
        [sb(Stem::Geng, Zi), sb(Stem::Geng, Yin), sb(Stem::Geng, Chen)],
        [sb(Stem::Geng, Branch::Wu), sb(Stem::Geng, Shen), sb(Stem::Geng, Xu)],
    ),
    // 巽
    (
        [sb(Stem::Xin, Chou), sb(Stem::Xin, Hai), sb(Stem::Xin, You)],
        [sb(Stem::Xin, Wei), sb(Stem::Xin, Si), sb(Stem::Xin, Mao)],
    ),
    // 坎
    (
        [sb(Stem::Wu, Yin), sb(Stem::Wu, Chen), sb(Stem::Wu, Branch::Wu)],
        [sb(Stem::Wu, Shen), sb(Stem::Wu, Xu), sb(Stem::Wu, Zi)],
    ),
    // 艮
    (
        [sb(Stem::Bing, Chen), sb(Stem::Bing, Branch::Wu), sb(Stem::Bing, Shen)],
        [sb(Stem::Bing, Xu), sb(Stem::Bing, Zi), sb(Stem::Bing, Yin)],
    ),
    // 坤
    (
        [sb(Stem::Yi, Wei), sb(Stem::Yi, Si), sb(Stem::Yi, Mao)],
        [sb(Stem::Gui, Chou), sb(Stem::Gui, Hai), sb(Stem::Gui, You)],
    ),
];

/// Stem-branches a trigram takes in the lower half.
pub fn inner_triple(trigram: Trigram) -> [StemBranch; 3] {
    TABLE[trigram.index()].0
}

/// Stem-branches a trigram takes in the upper half.
pub fn outer_triple(trigram: Trigram) -> [StemBranch; 3] {
    TABLE[trigram.index()].1
}

/// The six stem-branches of a hexagram, bottom first.
pub fn assign(hexagram: &Hexagram) -> [StemBranch; 6] {
    let [a, b, c] = inner_triple(hexagram.inner());
    let [d, e, f] = outer_triple(hexagram.outer());
    [a, b, c, d, e, f]
}

/// Parse a six-digit hexagram and assign its stem-branches.
pub fn assign_str(hexagram: &str) -> CoreResult<[StemBranch; 6]> {
    Ok(assign(&hexagram.parse()?))
}
