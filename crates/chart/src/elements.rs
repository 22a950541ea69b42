//! # 五行计分

use oracle_core::chart::entity::{FiveElementsTally, PillarSet};

/// 天干、地支本气权重
pub const VISIBLE_WEIGHT: f64 = 1.0;
/// 地支藏干权重
pub const HIDDEN_WEIGHT: f64 = 0.3;

/// # Summary
/// 统计四柱的五行分布。
///
/// # Logic
/// 1. 每柱天干、地支各计 1.0。
/// 2. 每个地支藏干计 0.3。
/// 3. 不做归一化，总分 = 8.0 + 0.3 × 藏干个数。
pub fn five_elements(pillars: &PillarSet) -> FiveElementsTally {
    let mut tally = FiveElementsTally::default();
    for pillar in pillars.iter() {
        tally.add(pillar.stem.element(), VISIBLE_WEIGHT);
        tally.add(pillar.branch.element(), VISIBLE_WEIGHT);
        for hidden in pillar.branch.hidden_stems() {
            tally.add(hidden.element(), HIDDEN_WEIGHT);
        }
    }
    tally
}
