//! 配对练习会话状态机。
//!
//! 会话是一个显式对象（无环境全局量）：持有本轮剩余的两列方格、
//! 当前选择和未决反馈。评判发生在第二次点选的瞬间，权重更新立即
//! 落库；反馈展示期间输入锁定，由 UI 在固定延时后调用
//! `resolve_feedback` 收尾。每次开轮递增 generation 令牌，过期的
//! 延时回调凭令牌自动失效，不会作用到新一轮上。

use rand::Rng;

use crate::engine::sampler::{build_round, Round, Tile};
use crate::store::{Store, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// 一次评判的结果快照，携带开轮令牌供延时收尾时校验
#[derive(Debug, Clone)]
pub struct Feedback {
    pub correct: bool,
    pub left_id: String,
    pub right_id: String,
    pub token: u64,
}

#[derive(Debug)]
pub enum PickOutcome {
    /// 输入被忽略：反馈锁定中，或方格不存在
    Ignored,
    /// 记下了一侧选择，等待对侧
    Selected,
    /// 两侧齐了，已评判并落库；UI 展示反馈后调 resolve_feedback
    Evaluated(Feedback),
}

#[derive(Debug, Default)]
pub struct MatchSession {
    round: Round,
    picked_left: Option<String>,
    picked_right: Option<String>,
    pending: Option<Feedback>,
    generation: u64,
    round_size: usize,
}

impl MatchSession {
    pub fn new(round_size: usize) -> Self {
        Self {
            round_size,
            ..Self::default()
        }
    }

    pub fn left(&self) -> &[Tile] {
        &self.round.left
    }

    pub fn right(&self) -> &[Tile] {
        &self.round.right
    }

    /// 反馈展示期间为真，此时 pick_tile 一律忽略
    pub fn is_locked(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn round_complete(&self) -> bool {
        self.round.is_empty()
    }

    /// 从全量词表重新抽一轮。清空选择与未决反馈，令牌 +1，
    /// 使所有仍在飞的延时回调全部过期。
    pub fn start_round<R: Rng>(&mut self, store: &Store, rng: &mut R) -> Result<(), StoreError> {
        let entries = store.load_entries()?;
        let direction = store.get_direction()?;

        self.round = build_round(&entries, direction, self.round_size, rng);
        self.picked_left = None;
        self.picked_right = None;
        self.pending = None;
        self.generation += 1;

        tracing::debug!(
            generation = self.generation,
            pairs = self.round.left.len(),
            "Started round"
        );
        Ok(())
    }

    fn has_tile(&self, side: Side, pair_id: &str) -> bool {
        let pool = match side {
            Side::Left => &self.round.left,
            Side::Right => &self.round.right,
        };
        pool.iter().any(|t| t.pair_id == pair_id)
    }

    /// 点选一块方格。第一次点选记为当前选择（同侧重点选即替换）；
    /// 对侧也有选择时立即评判：pair_id 相等为配对成功。
    /// 评判结果当场写库 —— 配对失败时两侧词条都记错（反猜测设计）。
    pub fn pick_tile(
        &mut self,
        store: &Store,
        side: Side,
        pair_id: &str,
    ) -> Result<PickOutcome, StoreError> {
        if self.is_locked() || !self.has_tile(side, pair_id) {
            return Ok(PickOutcome::Ignored);
        }

        match side {
            Side::Left => self.picked_left = Some(pair_id.to_string()),
            Side::Right => self.picked_right = Some(pair_id.to_string()),
        }

        let (Some(left_id), Some(right_id)) = (&self.picked_left, &self.picked_right) else {
            return Ok(PickOutcome::Selected);
        };
        let (left_id, right_id) = (left_id.clone(), right_id.clone());

        let correct = left_id == right_id;
        if correct {
            store.record_outcome(&left_id, true)?;
        } else {
            store.record_outcome(&left_id, false)?;
            store.record_outcome(&right_id, false)?;
        }

        let feedback = Feedback {
            correct,
            left_id,
            right_id,
            token: self.generation,
        };
        self.pending = Some(feedback.clone());
        Ok(PickOutcome::Evaluated(feedback))
    }

    /// 反馈延时结束后的收尾。令牌过期（期间开过新轮）则什么也不做。
    /// 配对成功移除两块方格；失败只清选择。两列都空了就自动开新轮，
    /// 新轮会反映刚更新过的权重。返回是否真的生效。
    pub fn resolve_feedback<R: Rng>(
        &mut self,
        store: &Store,
        rng: &mut R,
        token: u64,
    ) -> Result<bool, StoreError> {
        let Some(feedback) = self.pending.take() else {
            return Ok(false);
        };
        if feedback.token != token || token != self.generation {
            // 过期回调：新一轮已经开始，忽略
            self.pending = Some(feedback);
            return Ok(false);
        }

        if feedback.correct {
            self.round.left.retain(|t| t.pair_id != feedback.left_id);
            self.round.right.retain(|t| t.pair_id != feedback.right_id);
        }
        self.picked_left = None;
        self.picked_right = None;

        if self.round.is_empty() {
            self.start_round(store, rng)?;
        }
        Ok(true)
    }
}
