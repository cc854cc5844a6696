use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rumor_ledger::StakeLedger;
use rumor_market::{ClaimRegistry, ResolutionEngine, VotingEngine};
use rumor_reputation::ReputationTracker;
use rumor_types::{AccountId, Category, ClaimId, GuiAmount, MarketParams, Timestamp};

const DAY: u64 = 24 * 60 * 60;

struct Market {
    registry: ClaimRegistry,
    ledger: StakeLedger,
    reputation: ReputationTracker,
    resolution: ResolutionEngine,
    claim_id: ClaimId,
    voters: Vec<AccountId>,
}

fn market_with_voters(n: usize) -> Market {
    let mut registry = ClaimRegistry::new();
    let mut ledger = StakeLedger::new();
    let mut reputation = ReputationTracker::new();
    let params = MarketParams::default();
    let resolution = ResolutionEngine::new(AccountId::new("resolver"));

    let submitter = AccountId::new("submitter");
    ledger.deposit(&submitter, GuiAmount::from_gui(10)).unwrap();
    let claim_id = registry
        .submit_claim(
            &mut ledger,
            &params,
            &submitter,
            "a heavily contested rumor".into(),
            vec![],
            Category::Other,
            None,
            Timestamp::new(1_000),
        )
        .unwrap();

    let voters: Vec<AccountId> = (0..n).map(|i| AccountId::new(format!("voter{i}"))).collect();
    for (i, voter) in voters.iter().enumerate() {
        ledger.deposit(voter, GuiAmount::from_gui(10)).unwrap();
        VotingEngine
            .vote(
                &mut registry,
                &mut ledger,
                &mut reputation,
                &params,
                claim_id,
                voter,
                i % 2 == 0,
                GuiAmount::from_gui(1 + (i as u64 % 5)),
                Timestamp::new(1_001),
            )
            .unwrap();
    }

    Market {
        registry,
        ledger,
        reputation,
        resolution,
        claim_id,
        voters,
    }
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for voter_count in [10, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::new("resolve", voter_count),
            &voter_count,
            |b, &n| {
                b.iter_batched(
                    || market_with_voters(n),
                    |mut m| {
                        m.resolution
                            .resolve(
                                &mut m.registry,
                                &mut m.ledger,
                                &AccountId::new("resolver"),
                                m.claim_id,
                                true,
                                Timestamp::new(1_000 + DAY),
                            )
                            .unwrap();
                        black_box(m)
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

fn bench_settle_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("settle_all");
    for voter_count in [10, 100] {
        group.bench_with_input(
            BenchmarkId::new("claim_rewards", voter_count),
            &voter_count,
            |b, &n| {
                b.iter_batched(
                    || {
                        let mut m = market_with_voters(n);
                        m.resolution
                            .resolve(
                                &mut m.registry,
                                &mut m.ledger,
                                &AccountId::new("resolver"),
                                m.claim_id,
                                true,
                                Timestamp::new(1_000 + DAY),
                            )
                            .unwrap();
                        m
                    },
                    |mut m| {
                        for voter in m.voters.clone() {
                            let _ = m.resolution.claim_rewards(
                                &mut m.registry,
                                &mut m.ledger,
                                &mut m.reputation,
                                m.claim_id,
                                &voter,
                            );
                        }
                        black_box(m)
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_settle_all);
criterion_main!(benches);
