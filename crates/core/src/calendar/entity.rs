use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::calendar::table::{BRANCH_ELEMENTS, HIDDEN_STEMS, STEM_ELEMENTS};

/// # Summary
/// 五行。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    /// 固定输出顺序：木、火、土、金、水
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Element::Wood => "Wood",
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Metal => "Metal",
            Element::Water => "Water",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// # Summary
/// 十天干，序号 甲(0) .. 癸(9)。
///
/// # Invariants
/// - 偶数序号为阳干，奇数序号为阴干。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Jia,
        Stem::Yi,
        Stem::Bing,
        Stem::Ding,
        Stem::Wu,
        Stem::Ji,
        Stem::Geng,
        Stem::Xin,
        Stem::Ren,
        Stem::Gui,
    ];

    /// 在十干循环中的序号 (0..10)
    pub fn index(self) -> u8 {
        match self {
            Stem::Jia => 0,
            Stem::Yi => 1,
            Stem::Bing => 2,
            Stem::Ding => 3,
            Stem::Wu => 4,
            Stem::Ji => 5,
            Stem::Geng => 6,
            Stem::Xin => 7,
            Stem::Ren => 8,
            Stem::Gui => 9,
        }
    }

    /// # Summary
    /// 由任意整数偏移取天干，按欧几里得取模落入 0..10，负数同样合法。
    pub fn from_index(n: i64) -> Self {
        Self::ALL[cycle_slot(n, 10)]
    }

    pub fn element(self) -> Element {
        STEM_ELEMENTS[usize::from(self.index())]
    }

    pub fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    pub fn name(self) -> &'static str {
        match self {
            Stem::Jia => "Jia",
            Stem::Yi => "Yi",
            Stem::Bing => "Bing",
            Stem::Ding => "Ding",
            Stem::Wu => "Wu",
            Stem::Ji => "Ji",
            Stem::Geng => "Geng",
            Stem::Xin => "Xin",
            Stem::Ren => "Ren",
            Stem::Gui => "Gui",
        }
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|stem| stem.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown heavenly stem: {}", s))
    }
}

/// # Summary
/// 十二地支，序号 子(0) .. 亥(11)。
///
/// # Invariants
/// - 每个地支对应一个两小时时段，子时跨越午夜 (23:00-01:00)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Zi,
        Branch::Chou,
        Branch::Yin,
        Branch::Mao,
        Branch::Chen,
        Branch::Si,
        Branch::Wu,
        Branch::Wei,
        Branch::Shen,
        Branch::You,
        Branch::Xu,
        Branch::Hai,
    ];

    /// 在十二支循环中的序号 (0..12)
    pub fn index(self) -> u8 {
        match self {
            Branch::Zi => 0,
            Branch::Chou => 1,
            Branch::Yin => 2,
            Branch::Mao => 3,
            Branch::Chen => 4,
            Branch::Si => 5,
            Branch::Wu => 6,
            Branch::Wei => 7,
            Branch::Shen => 8,
            Branch::You => 9,
            Branch::Xu => 10,
            Branch::Hai => 11,
        }
    }

    /// 由任意整数偏移取地支，按欧几里得取模落入 0..12。
    pub fn from_index(n: i64) -> Self {
        Self::ALL[cycle_slot(n, 12)]
    }

    pub fn element(self) -> Element {
        BRANCH_ELEMENTS[usize::from(self.index())]
    }

    /// 地支藏干 (1 到 3 个)
    pub fn hidden_stems(self) -> &'static [Stem] {
        HIDDEN_STEMS[usize::from(self.index())]
    }

    pub fn name(self) -> &'static str {
        match self {
            Branch::Zi => "Zi",
            Branch::Chou => "Chou",
            Branch::Yin => "Yin",
            Branch::Mao => "Mao",
            Branch::Chen => "Chen",
            Branch::Si => "Si",
            Branch::Wu => "Wu",
            Branch::Wei => "Wei",
            Branch::Shen => "Shen",
            Branch::You => "You",
            Branch::Xu => "Xu",
            Branch::Hai => "Hai",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Branch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|branch| branch.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown earthly branch: {}", s))
    }
}

/// # Summary
/// 一柱：天干与地支的组合。
///
/// # Invariants
/// - 年柱、日柱必须经 `from_cycle` 由同一个整数偏移同时推导干支。
/// - 月柱、时柱的地支来自节气/时辰表，天干由公式推导，可直接用 `new` 构造。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StemBranch {
    pub stem: Stem,
    pub branch: Branch,
}

impl StemBranch {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// # Summary
    /// 由六十甲子循环中的偏移同时推导干支。
    ///
    /// # Logic
    /// 1. 天干取 `n mod 10`。
    /// 2. 地支取 `n mod 12`。
    pub fn from_cycle(n: i64) -> Self {
        Self {
            stem: Stem::from_index(n),
            branch: Branch::from_index(n),
        }
    }
}

impl fmt::Display for StemBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.stem, self.branch)
    }
}

/// 欧几里得取模后的数组下标；`rem_euclid` 保证落在 `0..modulus`。
fn cycle_slot(n: i64, modulus: i64) -> usize {
    usize::try_from(n.rem_euclid(modulus)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_wraps_negative_offsets() {
        assert_eq!(Stem::from_index(-1), Stem::Gui);
        assert_eq!(Stem::from_index(10), Stem::Jia);
        assert_eq!(Branch::from_index(-1), Branch::Hai);
        assert_eq!(Branch::from_index(25), Branch::Chou);
    }

    #[test]
    fn test_index_round_trips_through_all() {
        for (i, stem) in Stem::ALL.iter().enumerate() {
            assert_eq!(usize::from(stem.index()), i);
        }
        for (i, branch) in Branch::ALL.iter().enumerate() {
            assert_eq!(usize::from(branch.index()), i);
        }
    }

    #[test]
    fn test_parse_names_case_insensitive() {
        assert_eq!("geng".parse::<Stem>(), Ok(Stem::Geng));
        assert_eq!(" Hai ".parse::<Branch>(), Ok(Branch::Hai));
        assert!("Foo".parse::<Stem>().is_err());
        assert!("Jia".parse::<Branch>().is_err());
    }

    #[test]
    fn test_wu_stem_and_wu_branch_have_different_elements() {
        assert_eq!(Stem::Wu.element(), Element::Earth);
        assert_eq!(Branch::Wu.element(), Element::Fire);
    }

    #[test]
    fn test_from_cycle_sixty_period() {
        assert_eq!(StemBranch::from_cycle(0), StemBranch::new(Stem::Jia, Branch::Zi));
        assert_eq!(StemBranch::from_cycle(59), StemBranch::new(Stem::Gui, Branch::Hai));
        assert_eq!(StemBranch::from_cycle(60), StemBranch::from_cycle(0));
        assert_eq!(StemBranch::from_cycle(-6), StemBranch::from_cycle(54));
    }
}
