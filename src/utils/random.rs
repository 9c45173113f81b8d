/*
* 开发心理过程：
* 1. 把随机源做成显式注入的能力，而不是进程级全局生成器
* 2. 提供游戏机制需要的采样原语：均匀、卡方、伯努利、加权选择
* 3. 实现可重现的随机序列，便于测试和调试
* 4. 并发调用各自持有生成器，互不争用
*/

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{ChiSquared, Distribution};
use std::collections::VecDeque;

// 随机源能力接口
//
// 所有机制层的随机抽样都经过这个trait，测试可以注入确定性序列。
pub trait RandomSource: Send {
    // [0, 1) 均匀浮点数
    fn uniform(&mut self) -> f64;

    // [0, bound) 均匀整数，bound为0时返回0
    fn uniform_int(&mut self, bound: usize) -> usize;

    // 自由度为df的卡方分布采样（df至少为1）
    fn chi_squared(&mut self, df: u32) -> f64;

    // 伯努利试验：以概率p返回true
    //
    // 语义与原始实现一致：p <= 0 恒为false，p >= 1 恒为true，
    // 超出区间的p不视为错误。
    fn bernoulli(&mut self, p: f64) -> bool {
        self.uniform() < p
    }
}

// 标准随机源 - 基于StdRng，支持种子重现
#[derive(Debug)]
pub struct StdRandom {
    rng: StdRng,
    seed: u64,
}

impl StdRandom {
    pub fn new() -> Self {
        Self::with_seed(rand::random::<u64>())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for StdRandom {
    fn uniform(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    fn uniform_int(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }

    fn chi_squared(&mut self, df: u32) -> f64 {
        // 自由度经过下限保护，构造不会失败
        let dist = ChiSquared::new(df.max(1) as f64)
            .expect("chi-squared degrees of freedom >= 1");
        dist.sample(&mut self.rng)
    }
}

// 从切片中均匀选择一个元素
pub fn pick<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.uniform_int(items.len()))
}

// 加权选择：返回被选中的下标
//
// 权重必须非负；总权重为0或列表为空时返回None。
pub fn weighted_index(rng: &mut dyn RandomSource, weights: &[f64]) -> Option<usize> {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }

    let mut remaining = rng.uniform() * total;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        remaining -= w;
        if remaining <= 0.0 {
            return Some(i);
        }
    }
    // 浮点尾差时退回最后一个正权重项
    weights.iter().rposition(|w| *w > 0.0)
}

// 确定性随机源 - 按预置序列回放
//
// 测试用：uniform与chi_squared各自消费一条队列，耗尽后回落到固定值。
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    uniforms: VecDeque<f64>,
    chi_draws: VecDeque<f64>,
    uniform_fallback: f64,
    chi_fallback: f64,
}

impl SequenceRandom {
    pub fn new(uniforms: Vec<f64>, chi_draws: Vec<f64>) -> Self {
        Self {
            uniforms: uniforms.into(),
            chi_draws: chi_draws.into(),
            uniform_fallback: 0.5,
            chi_fallback: 1.0,
        }
    }

    // 伯努利试验恒成功的随机源
    pub fn always_succeed() -> Self {
        Self {
            uniforms: VecDeque::new(),
            chi_draws: VecDeque::new(),
            uniform_fallback: 0.0,
            chi_fallback: 1.0,
        }
    }

    // 伯努利试验恒失败的随机源
    pub fn always_fail() -> Self {
        Self {
            uniforms: VecDeque::new(),
            chi_draws: VecDeque::new(),
            // 大于任何有效成功概率（上限 1 - 1/220 ≈ 0.9955）
            uniform_fallback: 0.999_999,
            chi_fallback: 1.0,
        }
    }

    pub fn with_fallbacks(mut self, uniform: f64, chi: f64) -> Self {
        self.uniform_fallback = uniform;
        self.chi_fallback = chi;
        self
    }
}

impl RandomSource for SequenceRandom {
    fn uniform(&mut self) -> f64 {
        self.uniforms.pop_front().unwrap_or(self.uniform_fallback)
    }

    fn uniform_int(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        let u = self.uniform();
        ((u * bound as f64) as usize).min(bound - 1)
    }

    fn chi_squared(&mut self, _df: u32) -> f64 {
        self.chi_draws.pop_front().unwrap_or(self.chi_fallback)
    }
}
