use async_trait::async_trait;

use crate::chart::entity::{Chart, ChartRequest, Gender, LuckPillar, PillarSet};
use crate::chart::error::ChartError;

/// # Summary
/// 排盘服务端口。HTTP 网关等上游通过此接口发起排盘，而不关心时区解析与历法计算的具体实现。
///
/// # Invariants
/// - 实现者必须是线程安全的 (`Send + Sync`)，同一实例会被并发请求共享。
/// - 时区解析失败只能以告警形式出现在结果中，不得使 `calculate` 返回错误。
#[async_trait]
pub trait ChartPort: Send + Sync {
    /// # Summary
    /// 计算四柱与五行分布。
    ///
    /// # Logic
    /// 1. 校验出生时间与地点，缺失或非法直接返回校验错误，不触发任何外部查询。
    /// 2. 解析出生地时区 (失败降级为 UTC 并附带告警)。
    /// 3. 真太阳时修正后推导四柱，并汇总五行。
    ///
    /// # Arguments
    /// * `request`: 排盘请求。
    ///
    /// # Returns
    /// 成功返回完整排盘结果，失败返回 `ChartError`。
    async fn calculate(&self, request: ChartRequest) -> Result<Chart, ChartError>;

    /// # Summary
    /// 由四柱与性别推排八步大运。
    ///
    /// # Arguments
    /// * `pillars`: 四柱干支。
    /// * `gender`: 性别标记。
    ///
    /// # Returns
    /// 起运年龄 10 至 80 的八步大运。
    fn luck_pillars(&self, pillars: &PillarSet, gender: Gender) -> Vec<LuckPillar>;
}
