//! End-to-end scenarios for the optimistic verification gate.

use std::sync::Arc;

use optimistic_ism::test_utils::{ManualClock, TestIsm};
use optimistic_ism::utils::message_id;
use optimistic_ism::{
    InterchainSecurityModule, ModuleType, OptimisticIsm, OptimisticIsmConfig, OptimisticIsmError,
    Verification, H256,
};

const OWNER: H256 = H256::repeat_byte(0xaa);
const WATCHER: H256 = H256::repeat_byte(0xbb);
const FRAUD_WINDOW: u64 = 3600;

fn new_gate(clock: Arc<ManualClock>) -> OptimisticIsm {
    OptimisticIsm::with_clock(
        OptimisticIsmConfig {
            owner: OWNER,
            fraud_window: FRAUD_WINDOW,
            watchers: vec![],
        },
        clock,
    )
}

#[tokio::test]
async fn flag_and_rotate_lifecycle() {
    let clock = Arc::new(ManualClock::new(10_000));
    let gate = new_gate(clock.clone());
    assert_eq!(gate.module_type(), ModuleType::Optimistic);

    let compromised = Arc::new(TestIsm::new(H256::repeat_byte(0x01)));
    let replacement = Arc::new(TestIsm::new(H256::repeat_byte(0x02)));
    gate.set_submodule(OWNER, compromised.clone()).unwrap();

    gate.add_watcher(OWNER, WATCHER).unwrap();

    gate.pre_verify(b"meta", b"payload").await.unwrap();
    clock.advance(10);
    assert!(!gate.verify(b"meta", b"payload").await);

    // watcher raises the alarm
    gate.mark_fraudulent(WATCHER, compromised.address()).unwrap();
    assert_ne!(gate.flagged_at(compromised.address()), 0);

    // owner rotates to the replacement
    gate.switch_ism(OWNER, replacement.clone()).unwrap();
    assert_eq!(
        gate.sub_module(b"payload").unwrap().address(),
        replacement.address()
    );

    // once the window has elapsed, the live check runs against the
    // replacement submodule
    clock.advance(FRAUD_WINDOW);
    assert!(gate.verify(b"meta", b"payload").await);
    assert_eq!(replacement.calls(), 1);
}

#[tokio::test]
async fn fraud_window_timing() {
    let proposed_at = 50_000;
    let clock = Arc::new(ManualClock::new(proposed_at));
    let gate = new_gate(clock.clone());
    gate.set_submodule(OWNER, Arc::new(TestIsm::new(H256::repeat_byte(0x01))))
        .unwrap();

    gate.pre_verify(b"meta", b"payload").await.unwrap();

    clock.set(proposed_at + 10);
    assert!(!gate.verify(b"meta", b"payload").await);

    clock.set(proposed_at + FRAUD_WINDOW + 10);
    assert!(gate.verify(b"meta", b"payload").await);
}

#[tokio::test]
async fn null_submodule_proposal_and_verification() {
    let clock = Arc::new(ManualClock::new(10_000));
    let gate = new_gate(clock.clone());

    gate.pre_verify(b"meta", b"payload").await.unwrap();
    assert_eq!(
        gate.proposal(message_id(b"payload")),
        Some(Verification::new(None, 10_000))
    );

    assert!(!gate.verify(b"meta", b"payload").await);
    clock.advance(FRAUD_WINDOW);
    assert!(gate.verify(b"meta", b"payload").await);
}

#[tokio::test]
async fn only_watchers_may_flag() {
    let clock = Arc::new(ManualClock::new(10_000));
    let gate = new_gate(clock);
    gate.add_watcher(OWNER, WATCHER).unwrap();

    let target = H256::repeat_byte(0x01);
    for outsider in [OWNER, H256::repeat_byte(0xcc), H256::repeat_byte(0xdd)] {
        assert!(matches!(
            gate.mark_fraudulent(outsider, target),
            Err(OptimisticIsmError::NotWatcher(_))
        ));
    }
    gate.mark_fraudulent(WATCHER, target).unwrap();

    // revoked watchers lose the capability
    gate.remove_watcher(OWNER, WATCHER).unwrap();
    assert!(matches!(
        gate.mark_fraudulent(WATCHER, target),
        Err(OptimisticIsmError::NotWatcher(_))
    ));
}

#[tokio::test]
async fn proposals_are_idempotent_by_content() {
    let clock = Arc::new(ManualClock::new(10_000));
    let gate = new_gate(clock);

    gate.pre_verify(b"meta-one", b"payload").await.unwrap();
    assert!(matches!(
        gate.pre_verify(b"meta-two", b"payload").await,
        Err(OptimisticIsmError::AlreadyProposed(_))
    ));
    // a different payload is a different identity
    gate.pre_verify(b"meta-one", b"payload-2").await.unwrap();
}
