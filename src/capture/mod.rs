// 捕捉判定器
// 开发心理：投球循环是纯值变换——快照背包进、新背包出，落盘交给存储协作者
// 设计原则：
// 1. 试投核心不做任何I/O，注入随机源后完全可复现
// 2. 成功路径走存储的原子提交，失败路径只落盘扣减后的背包
// 3. 归属前置条件冲突向上抛瞬时错误，调用方重载后整体重试即可（不会重复扣球）

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ServerError};
use crate::player::{Bag, PlayerId};
use crate::pokemon::PokemonId;
use crate::storage::Storage;
use crate::utils::random::RandomSource;

// 高级球触发偏好的等级阈值
pub const GREAT_BALL_LEVEL_THRESHOLD: u8 = 40;

// 精灵球种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallKind {
    Poke,
    Great,
}

impl BallKind {
    // 单次投球的命中概率（p为负时贝努利试验自然恒败）
    pub fn success_probability(self, level: u8) -> f64 {
        match self {
            BallKind::Great => 1.0 - f64::from(level) / 220.0,
            BallKind::Poke => 1.0 - f64::from(level) / 120.0,
        }
    }
}

// 一次试投循环的完整结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialRun {
    pub captured: bool,
    pub bag: Bag,
    pub thrown: Vec<BallKind>,
}

// resolve的对外结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOutcome {
    pub captured: bool,
    pub bag: Bag,
}

// 每轮的选球策略：高级球数量占优，或持有高级球且目标等级超过阈值时用高级球
// 贪心式启发：高等级目标留给高级球，同时避免高级球囤到最后用不掉
fn choose_ball(bag: &Bag, level: u8) -> BallKind {
    if bag.greatball > bag.pokeball
        || (bag.greatball > 0 && level > GREAT_BALL_LEVEL_THRESHOLD)
    {
        BallKind::Great
    } else {
        BallKind::Poke
    }
}

// 试投循环：消耗球直到命中或两种球都耗尽
// 入参背包不被改动，返回扣减后的新背包值
pub fn run_trials(bag: &Bag, level: u8, rng: &mut dyn RandomSource) -> TrialRun {
    let mut bag = *bag;
    let mut thrown = Vec::new();
    let mut captured = false;

    while !captured && bag.total_balls() > 0 {
        let ball = choose_ball(&bag, level);
        match ball {
            BallKind::Great => bag.greatball -= 1,
            BallKind::Poke => bag.pokeball -= 1,
        }
        thrown.push(ball);

        let p = ball.success_probability(level);
        captured = rng.bernoulli(p);
        debug!(
            "投出{:?}球 (等级{}, 命中率{:.3}): {}",
            ball,
            level,
            p,
            if captured { "命中" } else { "挣脱" }
        );
    }

    TrialRun {
        captured,
        bag,
        thrown,
    }
}

// 捕捉判定入口：加载记录、跑试投、按结果落盘
pub fn resolve(
    store: &dyn Storage,
    player_id: PlayerId,
    pokemon_id: PokemonId,
    rng: &mut dyn RandomSource,
) -> Result<CaptureOutcome> {
    let player = store.load_player(player_id)?;
    let pokemon = store.load_pokemon(pokemon_id)?;

    // 有主个体（训练师或道馆）直接拒绝，不产生任何写入
    if pokemon.is_owned() {
        warn!("宝可梦 {} 已有归属，拒绝玩家 {} 的捕捉请求", pokemon_id, player_id);
        return Err(ServerError::AlreadyOwned);
    }

    let run = run_trials(&player.bag, pokemon.level, rng);

    if run.captured {
        store.commit_capture(player_id, &run.bag, pokemon_id, player.location)?;
        info!(
            "玩家 {} 捕捉到宝可梦 {} ({}), 用球 {} 个",
            player_id,
            pokemon_id,
            pokemon.name,
            run.thrown.len()
        );
    } else if !run.thrown.is_empty() {
        // 失败路径只持久化背包扣减
        store.save_player_bag(player_id, &run.bag)?;
        info!(
            "玩家 {} 捕捉宝可梦 {} 失败, 耗尽 {} 个球",
            player_id,
            pokemon_id,
            run.thrown.len()
        );
    }

    Ok(CaptureOutcome {
        captured: run.captured,
        bag: run.bag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::generator;
    use crate::pokemon::Owner;
    use crate::player::Player;
    use crate::storage::memory::MemoryStore;
    use crate::utils::random::{SequenceRandom, StdRandom};
    use crate::world::location::GeoLocation;

    fn bag(pokeball: u32, greatball: u32) -> Bag {
        Bag {
            pokeball,
            greatball,
            ..Bag::default()
        }
    }

    fn setup(store: &MemoryStore, bag: Bag, level: u8, seed: u64) -> (PlayerId, PokemonId) {
        let mut player = Player::new(1, GeoLocation::new(35.6, 139.7));
        player.bag = bag;
        let pid = store.insert_player(player).unwrap();

        let mut rng = StdRandom::with_seed(seed);
        let pokemon = generator::synthesize(25, Some(level), &mut rng).unwrap();
        let pkid = store.insert_pokemon(pokemon).unwrap();
        (pid, pkid)
    }

    #[test]
    fn test_ball_choice_policy() {
        // 数量占优规则
        assert_eq!(choose_ball(&bag(1, 3), 10), BallKind::Great);
        // 等级阈值规则：只要持有高级球且目标超过40级
        assert_eq!(choose_ball(&bag(5, 1), 50), BallKind::Great);
        // 两条规则都不满足时用普通球
        assert_eq!(choose_ball(&bag(5, 1), 10), BallKind::Poke);
        // 没有高级球时永远普通球
        assert_eq!(choose_ball(&bag(3, 0), 99), BallKind::Poke);
    }

    #[test]
    fn test_success_probability_formulas() {
        assert!((BallKind::Great.success_probability(44) - 0.8).abs() < 1e-12);
        assert!((BallKind::Poke.success_probability(60) - 0.5).abs() < 1e-12);
        // 文档等级域之外普通球概率为负，试投自然恒败
        assert!(BallKind::Poke.success_probability(121) < 0.0);
    }

    #[test]
    fn test_forced_success_consumes_one_pokeball() {
        let mut rng = SequenceRandom::always_succeed();
        let run = run_trials(&bag(1, 0), 1, &mut rng);

        assert!(run.captured);
        assert_eq!(run.thrown, vec![BallKind::Poke]);
        assert_eq!(run.bag.pokeball, 0);
        assert_eq!(run.bag.greatball, 0);
    }

    #[test]
    fn test_forced_fail_exhausts_great_balls() {
        let mut rng = SequenceRandom::always_fail();
        let run = run_trials(&bag(0, 5), 30, &mut rng);

        assert!(!run.captured);
        assert_eq!(run.thrown.len(), 5);
        assert!(run.thrown.iter().all(|b| *b == BallKind::Great));
        assert_eq!(run.bag.greatball, 0);
    }

    #[test]
    fn test_trial_count_bounded_by_initial_balls() {
        for seed in 0..32 {
            let mut rng = StdRandom::with_seed(seed);
            let initial = bag(4, 3);
            let run = run_trials(&initial, 80, &mut rng);

            assert!(run.thrown.len() <= initial.total_balls() as usize);
            // 计数器永不为负由u32保证，这里验证总账目
            assert_eq!(
                run.bag.total_balls() + run.thrown.len() as u32,
                initial.total_balls()
            );
        }
    }

    #[test]
    fn test_empty_bag_never_enters_loop() {
        let mut rng = SequenceRandom::always_succeed();
        let run = run_trials(&bag(0, 0), 50, &mut rng);

        assert!(!run.captured);
        assert!(run.thrown.is_empty());
        assert_eq!(run.bag, bag(0, 0));
    }

    #[test]
    fn test_level_beyond_documented_range_always_fails() {
        // 121级之后普通球概率转负，均匀抽样永远不小于它
        let mut rng = StdRandom::with_seed(99);
        let run = run_trials(&bag(10, 0), 121, &mut rng);

        assert!(!run.captured);
        assert_eq!(run.thrown.len(), 10);
    }

    #[test]
    fn test_resolve_success_commits_ownership() {
        let store = MemoryStore::new();
        let (pid, pkid) = setup(&store, bag(3, 0), 5, 11);

        let mut rng = SequenceRandom::always_succeed();
        let outcome = resolve(&store, pid, pkid, &mut rng).unwrap();

        assert!(outcome.captured);
        assert_eq!(outcome.bag.pokeball, 2);

        let pokemon = store.load_pokemon(pkid).unwrap();
        assert_eq!(pokemon.owner, Some(Owner::Trainer(pid)));
        // 位置更新为玩家所在位置
        assert_eq!(pokemon.location, Some(GeoLocation::new(35.6, 139.7)));

        let player = store.load_player(pid).unwrap();
        assert!(player.owns(pkid));
        assert_eq!(player.bag, outcome.bag);
    }

    #[test]
    fn test_resolve_failure_persists_bag_only() {
        let store = MemoryStore::new();
        let (pid, pkid) = setup(&store, bag(2, 0), 30, 12);

        let mut rng = SequenceRandom::always_fail();
        let outcome = resolve(&store, pid, pkid, &mut rng).unwrap();

        assert!(!outcome.captured);
        assert_eq!(outcome.bag.pokeball, 0);

        let pokemon = store.load_pokemon(pkid).unwrap();
        assert!(!pokemon.is_owned());

        let player = store.load_player(pid).unwrap();
        assert_eq!(player.bag.pokeball, 0);
        assert!(!player.owns(pkid));
    }

    #[test]
    fn test_resolve_owned_target_no_writes() {
        let store = MemoryStore::new();
        let (pid, pkid) = setup(&store, bag(5, 5), 10, 13);

        // 预先把目标划给另一个玩家
        let other = store
            .insert_player(Player::new(2, GeoLocation::new(0.0, 0.0)))
            .unwrap();
        store
            .commit_capture(other, &Bag::default(), pkid, GeoLocation::new(0.0, 0.0))
            .unwrap();

        let mut rng = SequenceRandom::always_succeed();
        let err = resolve(&store, pid, pkid, &mut rng).unwrap_err();
        assert_eq!(err, ServerError::AlreadyOwned);

        // 背包分毫未动
        assert_eq!(store.load_player(pid).unwrap().bag, bag(5, 5));
        assert_eq!(
            store.load_pokemon(pkid).unwrap().owner,
            Some(Owner::Trainer(other))
        );
    }

    #[test]
    fn test_resolve_stadium_owned_target_rejected() {
        let store = MemoryStore::new();
        let (pid, _) = setup(&store, bag(1, 1), 10, 14);

        let mut rng = StdRandom::with_seed(14);
        let mut pokemon = generator::synthesize(3, Some(40), &mut rng).unwrap();
        pokemon.owner = Some(Owner::Stadium(7));
        let pkid = store.insert_pokemon(pokemon).unwrap();

        let mut forced = SequenceRandom::always_succeed();
        assert_eq!(
            resolve(&store, pid, pkid, &mut forced).unwrap_err(),
            ServerError::AlreadyOwned
        );
    }

    #[test]
    fn test_resolve_missing_player() {
        let store = MemoryStore::new();
        let mut rng = StdRandom::with_seed(15);
        let pokemon = generator::synthesize(1, Some(10), &mut rng).unwrap();
        let pkid = store.insert_pokemon(pokemon).unwrap();

        assert_eq!(
            resolve(&store, 42, pkid, &mut rng).unwrap_err(),
            ServerError::PlayerNotFound(42)
        );
    }

    #[test]
    fn test_resolve_empty_bag_immediate_failure() {
        let store = MemoryStore::new();
        let (pid, pkid) = setup(&store, bag(0, 0), 20, 16);

        let mut rng = SequenceRandom::always_succeed();
        let outcome = resolve(&store, pid, pkid, &mut rng).unwrap();

        assert!(!outcome.captured);
        assert_eq!(outcome.bag, Bag::default());
        assert!(!store.load_pokemon(pkid).unwrap().is_owned());
    }

    #[test]
    fn test_mixed_sequence_follows_policy_each_iteration() {
        // g2/p3 对10级目标：普通球扣到高级球占优时策略切换
        let mut rng = SequenceRandom::always_fail();
        let run = run_trials(&bag(3, 2), 10, &mut rng);

        assert_eq!(
            run.thrown,
            vec![
                BallKind::Poke,  // g2 p3
                BallKind::Poke,  // g2 p2
                BallKind::Great, // g2 p1 高级球占优
                BallKind::Poke,  // g1 p1
                BallKind::Great, // g1 p0
            ]
        );
    }
}
