//! 权重模型：从作答历史推导词条的抽样权重。
//!
//! 答错一次的调整幅度是答对一次的 4 倍（BAD_STEP=1.0 对 OK_STEP=0.25），
//! 让抽样快速偏向错误驱动的重复；答对只会把权重缓慢拉回基线，
//! 永远不会低于 W_MIN。

use crate::constants::{BAD_STEP, HARD_BOOST, OK_STEP, W_MAX, W_MIN};
use crate::store::operations::entries::Entry;

/// 有效抽样权重：基础权重乘以 hard 标记倍率。
/// 只要 weight >= W_MIN > 0，结果恒为正。
pub fn effective_weight(entry: &Entry) -> f64 {
    entry.weight * if entry.hard { HARD_BOOST } else { 1.0 }
}

/// 答对：计数 +1，权重回落 OK_STEP，下限 W_MIN
pub fn apply_correct(entry: &mut Entry) {
    entry.correct_count += 1;
    if entry.weight > W_MIN {
        entry.weight = (entry.weight - OK_STEP).max(W_MIN);
    }
}

/// 答错：计数 +1，权重上浮 BAD_STEP，上限 W_MAX
pub fn apply_incorrect(entry: &mut Entry) {
    entry.incorrect_count += 1;
    entry.weight = (entry.weight + BAD_STEP).min(W_MAX);
}
