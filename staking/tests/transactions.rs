//! End-to-end transactions through `run_transaction` over both backends.

use tokenpool_bank::{AccountLedger, SupplyTracker};
use tokenpool_nullables::NullStore;
use tokenpool_staking::{
    run_transaction, GenesisState, PoolConfig, PoolError, PoolKeeper, StateContext, TxOutcome,
};
use tokenpool_store::{AccountStore, BatchStore, ParticipantStore, StateStore, SupplyStore};
use tokenpool_store_lmdb::LmdbStore;
use tokenpool_types::params::{MINT_MODULE, STAKED_POOL_PERMISSIONS};
use tokenpool_types::{Account, Address, Int, Participant, ParticipantKind};

const FUNDING: i128 = 100_000_000_000;

fn user() -> Address {
    Address::new([7; 20])
}

fn fund<S: StateStore + BatchStore + ?Sized>(store: &S, keeper: &PoolKeeper, amount: i128) {
    let outcome = run_transaction(store, 1, |ctx| {
        let bank = keeper.bank(ctx);
        bank.mint_coins(MINT_MODULE, Int::new(amount))?;
        bank.send_from_module_to_account(MINT_MODULE, &user(), Int::new(amount))?;
        Ok::<_, PoolError>(())
    })
    .unwrap();
    assert!(outcome.is_committed());
}

#[test]
fn stake_and_unstake_commit_through_transactions() {
    let store = NullStore::new();
    let keeper = PoolKeeper::for_kind(ParticipantKind::Application);
    fund(&store, &keeper, FUNDING);

    let outcome = run_transaction(&store, 2, |ctx| keeper.stake(ctx, &user(), Int::new(10))).unwrap();
    match outcome {
        TxOutcome::Committed(p) => assert_eq!(p.staked_tokens, Int::new(10)),
        other => panic!("Expected Committed, got {other:?}"),
    }

    let ctx = StateContext::new(&store, 3);
    assert_eq!(keeper.get_staked_tokens(&ctx).unwrap(), Int::new(10));
    assert_eq!(
        keeper.bank(&ctx).balance_of(&user()).unwrap(),
        Int::new(99_999_999_990)
    );
    drop(ctx);

    let outcome = run_transaction(&store, 3, |ctx| keeper.unstake(ctx, &user())).unwrap();
    assert!(outcome.is_committed());
    let ctx = StateContext::new(&store, 4);
    assert_eq!(keeper.get_staked_tokens(&ctx).unwrap(), Int::ZERO);
    assert_eq!(keeper.bank(&ctx).balance_of(&user()).unwrap(), Int::new(FUNDING));
}

#[test]
fn negative_stake_aborts_and_discards_writes() {
    let store = NullStore::new();
    let keeper = PoolKeeper::for_kind(ParticipantKind::Node);
    fund(&store, &keeper, 100);
    let batches = store.applied_batches();

    let outcome = run_transaction(&store, 2, |ctx| keeper.stake(ctx, &user(), Int::new(-1))).unwrap();
    match outcome {
        TxOutcome::Aborted(message) => assert_eq!(message, "negative coin amount: -1"),
        other => panic!("Expected Aborted, got {other:?}"),
    }
    assert_eq!(store.applied_batches(), batches);
    assert!(store
        .iter_participants(ParticipantKind::Node)
        .unwrap()
        .is_empty());
}

#[test]
fn insufficient_funds_leaves_no_partial_transfer() {
    let store = NullStore::new();
    let keeper = PoolKeeper::for_kind(ParticipantKind::Application);
    fund(&store, &keeper, 5);

    let outcome = run_transaction(&store, 2, |ctx| {
        keeper.stake(ctx, &user(), Int::new(3))?;
        keeper.stake(ctx, &user(), Int::new(3))
    })
    .unwrap();
    match outcome {
        TxOutcome::Aborted(message) => assert!(message.contains("insufficient account funds")),
        other => panic!("Expected Aborted, got {other:?}"),
    }

    let pool = Address::for_module(&keeper.params().staked_pool_name);
    assert!(store.get_account(&pool).unwrap().is_none());
    assert_eq!(
        store.get_account(&user()).unwrap().unwrap().balance,
        Int::new(5)
    );
}

#[test]
fn rejected_burn_discards_writes() {
    let store = NullStore::new();
    let keeper = PoolKeeper::for_kind(ParticipantKind::Application);
    fund(&store, &keeper, 100);
    run_transaction(&store, 2, |ctx| keeper.stake(ctx, &user(), Int::new(10))).unwrap();

    let outcome = run_transaction(&store, 3, |ctx| {
        keeper.burn_staked_tokens(ctx, Int::new(4))?;
        keeper.burn_staked_tokens(ctx, Int::new(7))
    })
    .unwrap();
    assert!(matches!(
        outcome,
        TxOutcome::Rejected(PoolError::InsufficientPoolBalance { .. })
    ));

    assert_eq!(store.get_supply().unwrap().total, Int::new(100));
    let ctx = StateContext::new(&store, 4);
    assert_eq!(keeper.get_staked_tokens(&ctx).unwrap(), Int::new(10));
}

#[test]
fn burn_beyond_supply_aborts_without_writes() {
    let store = NullStore::new();
    let keeper = PoolKeeper::for_kind(ParticipantKind::Application);
    let pool_address = Address::for_module(&keeper.params().staked_pool_name);
    let mut pool = Account::module(
        &keeper.params().staked_pool_name,
        STAKED_POOL_PERMISSIONS.to_vec(),
    );
    pool.balance = Int::new(10);
    store.put_account(&pool).unwrap();

    let outcome = run_transaction(&store, 2, |ctx| keeper.burn_staked_tokens(ctx, Int::new(5))).unwrap();
    match outcome {
        TxOutcome::Aborted(message) => {
            assert!(message.starts_with("invariant supply-covers-pools broken"));
            assert!(message.contains("supply is 0"));
        }
        other => panic!("Expected Aborted, got {other:?}"),
    }
    assert_eq!(store.applied_batches(), 0);
    assert_eq!(store.get_account(&pool_address).unwrap().unwrap().balance, Int::new(10));
    assert_eq!(store.get_supply().unwrap().total, Int::ZERO);
}

#[test]
fn both_kinds_share_the_fee_pool() {
    let store = NullStore::new();
    let config = PoolConfig::default();
    let apps = config.keeper(ParticipantKind::Application);
    let nodes = config.keeper(ParticipantKind::Node);
    fund(&store, &apps, 100);

    run_transaction(&store, 2, |ctx| {
        apps.stake(ctx, &user(), Int::new(30))?;
        nodes.stake(ctx, &user(), Int::new(20))
    })
    .unwrap();

    let ctx = StateContext::new(&store, 3);
    assert_eq!(apps.get_staked_tokens(&ctx).unwrap(), Int::new(30));
    assert_eq!(nodes.get_staked_tokens(&ctx).unwrap(), Int::new(20));
    assert_eq!(
        apps.get_fee_pool(&ctx).unwrap().address,
        nodes.get_fee_pool(&ctx).unwrap().address
    );
    assert_eq!(apps.staked_ratio(&ctx).unwrap().to_string(), "0.300000000000000000");
    assert!(apps.check_invariants(&ctx).is_ok());
    assert!(nodes.check_invariants(&ctx).is_ok());
}

#[test]
fn lmdb_backed_genesis_and_stake_survive_reopen() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let keeper = PoolKeeper::for_kind(ParticipantKind::Node);
    let genesis = GenesisState::new(vec![
        Participant::new(Address::new([1; 20]), ParticipantKind::Node).with_stake(Int::new(40)),
    ]);

    {
        let store = LmdbStore::open(dir.path(), 10 * 1024 * 1024).unwrap();
        let outcome = run_transaction(&store, 0, |ctx| keeper.init_genesis(ctx, &genesis)).unwrap();
        assert!(outcome.is_committed());
        fund(&store, &keeper, 60);
        run_transaction(&store, 2, |ctx| keeper.stake(ctx, &user(), Int::new(15))).unwrap();
    }

    let store = LmdbStore::open(dir.path(), 10 * 1024 * 1024).unwrap();
    let ctx = StateContext::new(&store, 3);
    assert_eq!(keeper.get_staked_tokens(&ctx).unwrap(), Int::new(55));
    assert_eq!(keeper.bank(&ctx).total_supply().unwrap(), Int::new(100));
    assert_eq!(keeper.export_genesis(&ctx).unwrap().participants.len(), 2);
    assert!(keeper.check_invariants(&ctx).is_ok());
}
