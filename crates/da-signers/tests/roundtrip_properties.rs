//! # Export/Import Properties
//!
//! States reached by arbitrary message and block sequences must survive an
//! export → import → export cycle with identical JSON.

use da_signers::{
    DaSignersDependencies, DaSignersError, DaSignersMsgServer, DaSignersService, GenesisState,
    InMemoryKVStore, MockStakeLedger, ModuleLifecycle, MsgRegisterSigner, MsgUpdateSocket,
    Params, Signer, StaticGovernanceAuthority, DEFAULT_GOVERNANCE_AUTHORITY, PUBKEY_G1_LEN,
    PUBKEY_G2_LEN,
};
use proptest::prelude::*;
use std::sync::Arc;

// =============================================================================
// TEST HELPERS
// =============================================================================

const ACCOUNTS: u8 = 6;

type Service = DaSignersService<InMemoryKVStore, MockStakeLedger, StaticGovernanceAuthority>;

#[derive(Clone, Debug)]
enum Op {
    Register { signer: u8, key: u8 },
    UpdateSocket { signer: u8, port: u16 },
    Advance { blocks: u64 },
    Commit,
    Discard,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1..=ACCOUNTS, any::<u8>()).prop_map(|(signer, key)| Op::Register { signer, key }),
        (1..=ACCOUNTS, any::<u16>()).prop_map(|(signer, port)| Op::UpdateSocket { signer, port }),
        (1u64..=8).prop_map(|blocks| Op::Advance { blocks }),
        Just(Op::Commit),
        Just(Op::Discard),
    ]
}

fn account(n: u8) -> String {
    format!("{:040x}", n)
}

fn make_service(ledger: Arc<MockStakeLedger>) -> Service {
    DaSignersService::new(DaSignersDependencies {
        store: InMemoryKVStore::new(),
        stake_ledger: ledger,
        governance: Arc::new(StaticGovernanceAuthority::new(DEFAULT_GOVERNANCE_AUTHORITY)),
    })
}

/// Apply `ops` on top of a fresh genesis and commit the final block.
fn replay(ops: &[Op], stakes: &[u128]) -> Service {
    let ledger = Arc::new(MockStakeLedger::new());
    for (n, bonded) in (1..=ACCOUNTS).zip(stakes) {
        ledger.set_bonded(&account(n), *bonded);
    }

    let service = make_service(ledger);
    service
        .init_genesis(GenesisState {
            params: Params {
                max_quorums: 4,
                epoch_blocks: 5,
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap();

    let mut height = 0;
    for op in ops {
        match op {
            Op::Register { signer, key } => service
                .register_signer(MsgRegisterSigner {
                    signer: Signer::new(
                        account(*signer),
                        format!("signer-{}:9000", signer),
                        vec![*key; PUBKEY_G1_LEN],
                        vec![*key; PUBKEY_G2_LEN],
                    ),
                })
                .unwrap(),
            Op::UpdateSocket { signer, port } => {
                let result = service.update_socket(MsgUpdateSocket {
                    account: account(*signer),
                    socket: format!("moved:{}", port),
                });
                assert!(matches!(result, Ok(()) | Err(DaSignersError::NotFound(_))));
            }
            Op::Advance { blocks } => {
                height += blocks;
                // Signers without any vote halt the block; it is discarded.
                if let Err(e) = service.on_block_begin(height) {
                    assert!(matches!(e, DaSignersError::InvariantViolation(_)));
                    assert!(!service.has_pending_writes());
                }
            }
            Op::Commit => service.commit().unwrap(),
            Op::Discard => service.discard_block(),
        }
    }
    service.commit().unwrap();
    service
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_export_import_export_is_identity(
        ops in proptest::collection::vec(op_strategy(), 0..40),
        stakes in proptest::collection::vec(0u128..200, ACCOUNTS as usize),
    ) {
        let service = replay(&ops, &stakes);
        let json = service.export_genesis().unwrap().to_json().unwrap();

        let restored = make_service(Arc::new(MockStakeLedger::new()));
        restored
            .init_genesis(GenesisState::from_json(&json).unwrap())
            .unwrap();

        prop_assert_eq!(restored.export_genesis().unwrap().to_json().unwrap(), json);
    }

    #[test]
    fn prop_replay_is_deterministic(
        ops in proptest::collection::vec(op_strategy(), 0..40),
        stakes in proptest::collection::vec(0u128..200, ACCOUNTS as usize),
    ) {
        let a = replay(&ops, &stakes);
        let b = replay(&ops, &stakes);
        prop_assert_eq!(a.state_digest().unwrap(), b.state_digest().unwrap());
    }
}
