/// 权重下限（新词与复位后的基线权重）
pub const W_MIN: f64 = 1.0;

/// 权重上限
pub const W_MAX: f64 = 10.0;

/// 难词（hard 标记）的抽样权重倍率
pub const HARD_BOOST: f64 = 2.5;

/// 答对一次的权重回落步长
pub const OK_STEP: f64 = 0.25;

/// 答错一次的权重增加步长
pub const BAD_STEP: f64 = 1.0;

/// 每轮练习默认抽取的词对数量
pub const DEFAULT_ROUND_SIZE: usize = 10;

/// 评判反馈的默认展示时长（毫秒），期间锁定输入
pub const DEFAULT_FEEDBACK_DELAY_MS: u64 = 700;
