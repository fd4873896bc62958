//! 轮次抽样：按有效权重做无放回轮盘赌，再为两列独立洗牌。

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::engine::weights::effective_weight;
use crate::store::operations::entries::Entry;
use crate::store::operations::settings::Direction;

/// 一块可点选的方格：pair_id 关联同一词条生成的左右两块
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub pair_id: String,
    pub text: String,
}

/// 一轮练习的两列方格，各自独立洗牌，位置不泄露配对信息
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub left: Vec<Tile>,
    pub right: Vec<Tile>,
}

impl Round {
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

/// 无放回加权抽样：每次在剩余池上按有效权重转一次轮盘。
/// O(k·n)，对几十到几百条的个人词表足够。
pub fn sample_round<R: Rng>(entries: &[Entry], k: usize, rng: &mut R) -> Vec<Entry> {
    let mut pool: Vec<Entry> = entries.to_vec();
    let mut picked = Vec::with_capacity(k.min(pool.len()));

    while picked.len() < k && !pool.is_empty() {
        let total: f64 = pool.iter().map(effective_weight).sum();

        let index = if total <= 0.0 {
            // 退化情形（weight >= W_MIN 下不应出现）：确定性取池首
            0
        } else {
            let mut r = rng.gen_range(0.0..total);
            // 浮点误差可能走完全池仍未命中，夹到最后一项
            let mut chosen = pool.len() - 1;
            for (i, entry) in pool.iter().enumerate() {
                r -= effective_weight(entry);
                if r <= 0.0 {
                    chosen = i;
                    break;
                }
            }
            chosen
        };

        picked.push(pool.remove(index));
    }

    picked
}

/// 抽取一轮并生成两列按方向赋文、独立洗牌的方格
pub fn build_round<R: Rng>(
    entries: &[Entry],
    direction: Direction,
    k: usize,
    rng: &mut R,
) -> Round {
    let picked = sample_round(entries, k, rng);

    let mut left: Vec<Tile> = Vec::with_capacity(picked.len());
    let mut right: Vec<Tile> = Vec::with_capacity(picked.len());
    for entry in &picked {
        let (left_text, right_text) = match direction {
            Direction::NativeToTarget => (entry.native.clone(), entry.target.clone()),
            Direction::TargetToNative => (entry.target.clone(), entry.native.clone()),
        };
        left.push(Tile {
            pair_id: entry.id.clone(),
            text: left_text,
        });
        right.push(Tile {
            pair_id: entry.id.clone(),
            text: right_text,
        });
    }

    left.shuffle(rng);
    right.shuffle(rng);

    Round { left, right }
}
