
use assert_matches::assert_matches;
use cosmwasm_std::{from_json, Event};
use cw_multi_test::AppResponse;
use gnfd_apis::SendPackageResponse;
use gnfd_codec::channel::{
    decode_payload, encode_payload, RefundPackage, TransferPackage, GNFD_EXECUTOR_CHANNEL,
    GOV_CHANNEL, STATUS_FAILED, TRANSFER_IN_CHANNEL, TRANSFER_OUT_CHANNEL,
};
use gnfd_codec::{Envelope, Package, PackageType};
use gnfd_light_client::LightClientError;
use gnfd_test_utils::{
    bitmap, consensus_state, envelope, gen_validators, header, sign_envelope, sign_header,
    TEST_LOCAL_CHAIN_ID, TEST_REMOTE_CHAIN_ID,
};
use suite::{SuiteBuilder, INITIAL_HEIGHT};

use crate::error::ContractError;
use crate::state::sequence::Sequences;

fn transfer_payload(amount: u128) -> Vec<u8> {
    encode_payload(&TransferPackage {
        amount,
        recipient: [7; 20],
        refund_address: [8; 20],
    })
}

fn find_event<'a>(res: &'a AppResponse, ty: &str) -> Option<&'a Event> {
    let ty = format!("wasm-{ty}");
    res.events.iter().find(|event| event.ty == ty)
}

#[track_caller]
fn attr<'a>(event: &'a Event, key: &str) -> &'a str {
    event
        .attributes
        .iter()
        .find(|attr| attr.key == key)
        .map(|attr| attr.value.as_str())
        .unwrap()
}

/// Decodes the envelope carried by a `cross_chain_package` event
#[track_caller]
fn outbound_envelope(res: &AppResponse) -> Envelope {
    let event = find_event(res, "cross_chain_package").unwrap();
    Envelope::decode(&hex::decode(attr(event, "payload")).unwrap()).unwrap()
}

#[test]
fn instantiate_works() {
    let suite = SuiteBuilder::new().build();

    let config = suite.get_config();
    assert_eq!(config.local_chain_id, TEST_LOCAL_CHAIN_ID);
    assert_eq!(config.remote_chain_id, TEST_REMOTE_CHAIN_ID);
    assert_eq!(config.emergency_operator, suite.operator);
    assert_eq!(config.inturn_relayer_relay_interval, 1800);

    assert_eq!(suite.get_height(), INITIAL_HEIGHT);
    let state = suite.get_consensus_state();
    assert_eq!(state.validators.len(), 3);
    assert_eq!(state.validator_set_hash, suite.get_validator_set_hash());
    assert_eq!(state.next_validator_set_hash, state.validator_set_hash);

    assert_eq!(
        suite.get_relayers(),
        vec![suite.relayer(0), suite.relayer(1), suite.relayer(2)]
    );
    let channels = suite.get_channels().channels;
    assert_eq!(
        channels.iter().map(|c| c.channel_id).collect::<Vec<_>>(),
        vec![TRANSFER_IN_CHANNEL, TRANSFER_OUT_CHANNEL, GOV_CHANNEL]
    );
    assert_eq!(channels[1].handler, suite.handler(TRANSFER_OUT_CHANNEL));
    assert!(!suite.is_suspended());
    assert_eq!(suite.get_oracle_sequence(), Sequences::default());
}

mod delivery {
    use super::*;

    #[test]
    fn package_signed_by_quorum_is_delivered() {
        let mut suite = SuiteBuilder::new().build();
        let relayer = suite.relayer(0);

        let payload = transfer_payload(1_000);
        let envelope = envelope(0, PackageType::Syn, TRANSFER_OUT_CHANNEL, 0, payload.clone());
        let proof = suite.sign(&envelope, &[0, 1]);
        let res = suite.handle_package(&relayer, &proof).unwrap();

        let received = find_event(&res, "receive_package").unwrap();
        assert_eq!(attr(received, "relayer"), relayer.as_str());
        assert_eq!(attr(received, "package_type"), "syn");
        let handled = find_event(&res, "package_handled").unwrap();
        assert_eq!(attr(handled, "success"), "true");
        assert!(find_event(&res, "cross_chain_package").is_none());

        let delivered = suite.get_received(TRANSFER_OUT_CHANNEL);
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].sequence, 0);
        assert_eq!(delivered[0].package_type, PackageType::Syn);
        assert_eq!(delivered[0].payload.as_slice(), payload.as_slice());

        assert_eq!(
            suite.get_channel_sequence(TRANSFER_OUT_CHANNEL),
            Sequences {
                send: 0,
                receive: 1
            }
        );
        assert_eq!(suite.get_oracle_sequence().receive, 1);
    }

    #[test]
    fn package_without_quorum_is_rejected() {
        let mut suite = SuiteBuilder::new().build();
        let relayer = suite.relayer(0);

        let envelope = envelope(0, PackageType::Syn, TRANSFER_OUT_CHANNEL, 0, transfer_payload(1));
        let proof = suite.sign(&envelope, &[0]);
        let err = suite.handle_package(&relayer, &proof).unwrap_err();
        assert_eq!(
            err,
            ContractError::ProofRejected(LightClientError::InsufficientQuorum {
                signers: 1,
                validators: 3,
                signed_power: 10,
                total_power: 30,
            })
        );
        assert_eq!(suite.get_oracle_sequence(), Sequences::default());
        assert!(suite.get_received(TRANSFER_OUT_CHANNEL).is_empty());

        // all three is fine as well
        let proof = suite.sign(&envelope, &[0, 1, 2]);
        suite.handle_package(&relayer, &proof).unwrap();
    }

    #[test]
    fn tampered_package_is_rejected() {
        let mut suite = SuiteBuilder::new().build();
        let relayer = suite.relayer(1);

        let envelope = envelope(0, PackageType::Syn, TRANSFER_OUT_CHANNEL, 0, transfer_payload(1));
        let mut proof = suite.sign(&envelope, &[1, 2]);
        proof.payload[4] ^= 0x01;
        let err = suite.handle_package(&relayer, &proof).unwrap_err();
        assert_eq!(
            err,
            ContractError::ProofRejected(LightClientError::SignatureInvalid {})
        );

        // same signature, claimed by a different set of signers
        let mut proof = suite.sign(&envelope, &[1, 2]);
        proof.bitmap = bitmap(&[0, 2]);
        let err = suite.handle_package(&relayer, &proof).unwrap_err();
        assert_eq!(
            err,
            ContractError::ProofRejected(LightClientError::SignatureInvalid {})
        );
    }

    #[test]
    fn only_relayers_deliver() {
        let mut suite = SuiteBuilder::new().build();
        let envelope = envelope(0, PackageType::Syn, TRANSFER_OUT_CHANNEL, 0, transfer_payload(1));
        let proof = suite.sign(&envelope, &[0, 1]);

        let stranger = suite.addr("stranger");
        let err = suite.handle_package(&stranger, &proof).unwrap_err();
        assert_eq!(err, ContractError::Unauthorized { role: "relayer" });

        // any relayer of the set can submit, whoever signed
        let relayer = suite.relayer(2);
        suite.handle_package(&relayer, &proof).unwrap();
    }

    #[test]
    fn sequences_must_be_consecutive() {
        let mut suite = SuiteBuilder::new().build();
        let relayer = suite.relayer(0);

        let early = envelope(1, PackageType::Syn, TRANSFER_OUT_CHANNEL, 1, transfer_payload(1));
        let proof = suite.sign(&early, &[0, 1]);
        let err = suite.handle_package(&relayer, &proof).unwrap_err();
        assert_eq!(
            err,
            ContractError::SequenceMismatch {
                channel_id: TRANSFER_OUT_CHANNEL,
                expected: 0,
                actual: 1
            }
        );

        let first = envelope(0, PackageType::Syn, TRANSFER_OUT_CHANNEL, 0, transfer_payload(1));
        let first_proof = suite.sign(&first, &[0, 1]);
        suite.handle_package(&relayer, &first_proof).unwrap();
        // now the early one is in order
        suite.handle_package(&relayer, &proof).unwrap();

        // replays are rejected
        let err = suite.handle_package(&relayer, &first_proof).unwrap_err();
        assert_eq!(
            err,
            ContractError::SequenceMismatch {
                channel_id: TRANSFER_OUT_CHANNEL,
                expected: 2,
                actual: 0
            }
        );

        // a fresh channel starts at 0, but the oracle sequence is shared
        let stale_oracle = envelope(0, PackageType::Ack, GOV_CHANNEL, 0, transfer_payload(1));
        let proof = suite.sign(&stale_oracle, &[0, 1]);
        let err = suite.handle_package(&relayer, &proof).unwrap_err();
        assert_eq!(
            err,
            ContractError::OracleSequenceMismatch {
                expected: 2,
                actual: 0
            }
        );
        assert_eq!(suite.get_oracle_sequence().receive, 2);
    }

    #[test]
    fn misrouted_packages_are_rejected() {
        let mut suite = SuiteBuilder::new().build();
        let relayer = suite.relayer(0);

        let mut wrong_chain =
            envelope(0, PackageType::Syn, TRANSFER_OUT_CHANNEL, 0, transfer_payload(1));
        wrong_chain.src_chain_id = 97;
        let proof = suite.sign(&wrong_chain, &[0, 1]);
        let err = suite.handle_package(&relayer, &proof).unwrap_err();
        assert_eq!(
            err,
            ContractError::ChainIdMismatch {
                src_chain_id: 97,
                dst_chain_id: TEST_LOCAL_CHAIN_ID,
                expected_src_chain_id: TEST_REMOTE_CHAIN_ID,
                expected_dst_chain_id: TEST_LOCAL_CHAIN_ID,
            }
        );

        let no_handler = envelope(0, PackageType::Syn, GNFD_EXECUTOR_CHANNEL, 0, transfer_payload(1));
        let proof = suite.sign(&no_handler, &[0, 1]);
        let err = suite.handle_package(&relayer, &proof).unwrap_err();
        assert_eq!(err, ContractError::UnknownChannel(GNFD_EXECUTOR_CHANNEL));

        // signed, but the package payload is not a single RLP item
        let mut bytes = envelope(0, PackageType::Syn, TRANSFER_OUT_CHANNEL, 0, transfer_payload(1))
            .encode();
        bytes.push(0x80);
        let proof = gnfd_test_utils::ProofBundle {
            signature: gnfd_test_utils::sign(&suite.validators, &[0, 1], &bytes),
            bitmap: gnfd_test_utils::bitmap(&[0, 1]),
            payload: bytes,
        };
        let err = suite.handle_package(&relayer, &proof).unwrap_err();
        assert_matches!(err, ContractError::Codec(_));

        assert_eq!(suite.get_oracle_sequence(), Sequences::default());
    }

    #[test]
    fn rejected_syn_is_answered_with_fail_ack() {
        let mut suite = SuiteBuilder::new().build();
        let relayer = suite.relayer(0);

        let payload = transfer_payload(42);
        let envelope = envelope(0, PackageType::Syn, GOV_CHANNEL, 0, payload.clone());
        let proof = suite.sign(&envelope, &[0, 1]);
        let res = suite.handle_package(&relayer, &proof).unwrap();

        let handled = find_event(&res, "package_handled").unwrap();
        assert_eq!(attr(handled, "success"), "false");
        assert_eq!(attr(handled, "sequence"), "0");

        let fail_ack = outbound_envelope(&res);
        assert_eq!(
            fail_ack,
            Envelope {
                src_chain_id: TEST_LOCAL_CHAIN_ID,
                dst_chain_id: TEST_REMOTE_CHAIN_ID,
                oracle_sequence: 0,
                package: Package {
                    package_type: PackageType::FailAck,
                    channel_id: GOV_CHANNEL,
                    sequence: 0,
                    payload,
                },
            }
        );
        let event = find_event(&res, "cross_chain_package").unwrap();
        assert_eq!(attr(event, "package_type"), "fail_ack");

        // the package stays consumed
        assert_eq!(
            suite.get_channel_sequence(GOV_CHANNEL),
            Sequences {
                send: 1,
                receive: 1
            }
        );
        assert_eq!(
            suite.get_oracle_sequence(),
            Sequences {
                send: 1,
                receive: 1
            }
        );
        let err = suite.handle_package(&relayer, &proof).unwrap_err();
        assert_matches!(err, ContractError::SequenceMismatch { .. });
    }

    #[test]
    fn rejected_ack_is_only_reported() {
        let mut suite = SuiteBuilder::new().build();
        let relayer = suite.relayer(0);

        for (sequence, package_type) in [(0, PackageType::Ack), (1, PackageType::FailAck)] {
            let envelope = envelope(sequence, package_type, GOV_CHANNEL, sequence, transfer_payload(1));
            let proof = suite.sign(&envelope, &[1, 2]);
            let res = suite.handle_package(&relayer, &proof).unwrap();

            let handled = find_event(&res, "package_handled").unwrap();
            assert_eq!(attr(handled, "success"), "false");
            assert!(find_event(&res, "cross_chain_package").is_none());
        }
        assert_eq!(
            suite.get_channel_sequence(GOV_CHANNEL),
            Sequences {
                send: 0,
                receive: 2
            }
        );
    }

    #[test]
    fn handler_can_acknowledge_inline() {
        let mut suite = SuiteBuilder::new().build();
        let relayer = suite.relayer(0);

        let envelope = envelope(0, PackageType::Syn, TRANSFER_IN_CHANNEL, 0, transfer_payload(500));
        let proof = suite.sign(&envelope, &[0, 2]);
        let res = suite.handle_package(&relayer, &proof).unwrap();

        let handled = find_event(&res, "package_handled").unwrap();
        assert_eq!(attr(handled, "success"), "true");

        let ack = outbound_envelope(&res);
        assert_eq!(ack.package.package_type, PackageType::Ack);
        assert_eq!(ack.package.channel_id, TRANSFER_IN_CHANNEL);
        assert_eq!(ack.package.sequence, 0);
        let refund: RefundPackage = decode_payload(&ack.package.payload).unwrap();
        assert_eq!(
            refund,
            RefundPackage {
                refund_amount: 500,
                refund_address: [8; 20],
                status: STATUS_FAILED,
            }
        );
        assert_eq!(suite.get_received(TRANSFER_IN_CHANNEL).len(), 1);
    }
}

mod outbound {
    use super::*;

    #[test]
    fn handlers_send_packages() {
        let mut suite = SuiteBuilder::new().build();
        let handler = suite.handler(TRANSFER_OUT_CHANNEL);

        let payload = transfer_payload(7);
        let res = suite
            .send_package(&handler, TRANSFER_OUT_CHANNEL, PackageType::Syn, payload.clone())
            .unwrap();
        let sent: SendPackageResponse = from_json(res.data.clone().unwrap()).unwrap();
        assert_eq!(
            sent,
            SendPackageResponse {
                sequence: 0,
                oracle_sequence: 0
            }
        );
        let outbound = outbound_envelope(&res);
        assert_eq!(outbound.src_chain_id, TEST_LOCAL_CHAIN_ID);
        assert_eq!(outbound.dst_chain_id, TEST_REMOTE_CHAIN_ID);
        assert_eq!(outbound.package.payload, payload);

        let res = suite
            .send_package(&handler, TRANSFER_OUT_CHANNEL, PackageType::Syn, payload.clone())
            .unwrap();
        let sent: SendPackageResponse = from_json(res.data.unwrap()).unwrap();
        assert_eq!(sent.sequence, 1);
        assert_eq!(sent.oracle_sequence, 1);

        // other channels have their own sequence, the oracle one is shared
        let gov = suite.handler(GOV_CHANNEL);
        let res = suite
            .send_package(&gov, GOV_CHANNEL, PackageType::Syn, payload)
            .unwrap();
        let sent: SendPackageResponse = from_json(res.data.unwrap()).unwrap();
        assert_eq!(
            sent,
            SendPackageResponse {
                sequence: 0,
                oracle_sequence: 2
            }
        );
    }

    #[test]
    fn only_the_channel_handler_sends() {
        let mut suite = SuiteBuilder::new().build();
        let stranger = suite.addr("stranger");
        let gov = suite.handler(GOV_CHANNEL);

        let err = suite
            .send_package(&stranger, TRANSFER_OUT_CHANNEL, PackageType::Syn, transfer_payload(1))
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::UnauthorizedHandler {
                channel_id: TRANSFER_OUT_CHANNEL
            }
        );
        let err = suite
            .send_package(&gov, TRANSFER_OUT_CHANNEL, PackageType::Syn, transfer_payload(1))
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::UnauthorizedHandler {
                channel_id: TRANSFER_OUT_CHANNEL
            }
        );
        let err = suite
            .send_package(&gov, GNFD_EXECUTOR_CHANNEL, PackageType::Syn, transfer_payload(1))
            .unwrap_err();
        assert_eq!(err, ContractError::UnknownChannel(GNFD_EXECUTOR_CHANNEL));

        let err = suite
            .send_package(&gov, GOV_CHANNEL, PackageType::Syn, vec![])
            .unwrap_err();
        assert_matches!(err, ContractError::Codec(_));

        assert_eq!(suite.get_oracle_sequence(), Sequences::default());
    }
}

mod light_client {
    use super::*;

    #[test]
    fn headers_advance_the_height() {
        let mut suite = SuiteBuilder::new().build();
        let relayer = suite.relayer(0);
        let validators = gen_validators(1, 3, 10);

        let proof = suite.sign_header(
            header(INITIAL_HEIGHT + 1, &validators, None, &validators),
            &[0, 1],
        );
        let res = suite
            .sync_header(&relayer, &proof, INITIAL_HEIGHT + 1)
            .unwrap();
        let event = find_event(&res, "sync_header").unwrap();
        assert_eq!(attr(event, "validator_set_changed"), "false");
        assert_eq!(suite.get_height(), INITIAL_HEIGHT + 1);

        // not above the current height
        let err = suite
            .sync_header(&relayer, &proof, INITIAL_HEIGHT + 1)
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::LightClient(LightClientError::StaleHeight {
                current: INITIAL_HEIGHT + 1,
                submitted: INITIAL_HEIGHT + 1
            })
        );

        // header for another height than submitted
        let proof = suite.sign_header(
            header(INITIAL_HEIGHT + 3, &validators, None, &validators),
            &[0, 1],
        );
        let err = suite
            .sync_header(&relayer, &proof, INITIAL_HEIGHT + 2)
            .unwrap_err();
        assert_matches!(
            err,
            ContractError::LightClient(LightClientError::HeaderHeightMismatch { .. })
        );

        // claims a set hash that is not the current one, even with a valid signature
        let others = gen_validators(20, 3, 10);
        let proof = suite.sign_header(header(INITIAL_HEIGHT + 2, &others, None, &others), &[0, 1]);
        let err = suite
            .sync_header(&relayer, &proof, INITIAL_HEIGHT + 2)
            .unwrap_err();
        assert_matches!(
            err,
            ContractError::LightClient(LightClientError::HashMismatch { .. })
        );

        let stranger = suite.addr("stranger");
        let proof = suite.sign_header(
            header(INITIAL_HEIGHT + 2, &validators, None, &validators),
            &[0, 1],
        );
        let err = suite
            .sync_header(&stranger, &proof, INITIAL_HEIGHT + 2)
            .unwrap_err();
        assert_eq!(err, ContractError::Unauthorized { role: "relayer" });
        assert_eq!(suite.get_height(), INITIAL_HEIGHT + 1);
    }

    #[test]
    fn headers_need_a_quorum() {
        let mut suite = SuiteBuilder::new().build();
        let relayer = suite.relayer(0);
        let validators = gen_validators(1, 3, 10);
        let before = suite.get_consensus_state();
        let bytes = header(INITIAL_HEIGHT + 1, &validators, None, &validators);

        // one of three is below two thirds
        let proof = suite.sign_header(bytes.clone(), &[2]);
        let err = suite
            .sync_header(&relayer, &proof, INITIAL_HEIGHT + 1)
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::ProofRejected(LightClientError::InsufficientQuorum {
                signers: 1,
                validators: 3,
                signed_power: 10,
                total_power: 30,
            })
        );

        // the bitmap claims a signer that did not sign
        let mut proof = suite.sign_header(bytes.clone(), &[0]);
        proof.bitmap = bitmap(&[0, 1]);
        let err = suite
            .sync_header(&relayer, &proof, INITIAL_HEIGHT + 1)
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::ProofRejected(LightClientError::SignatureInvalid {})
        );

        // a signature over other bytes
        let mut proof = suite.sign_header(bytes.clone(), &[0, 1]);
        proof.payload = header(INITIAL_HEIGHT + 2, &validators, None, &validators);
        let err = suite
            .sync_header(&relayer, &proof, INITIAL_HEIGHT + 2)
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::ProofRejected(LightClientError::SignatureInvalid {})
        );
        assert_eq!(suite.get_consensus_state(), before);

        // exactly two of three is enough
        let proof = suite.sign_header(bytes, &[0, 2]);
        suite
            .sync_header(&relayer, &proof, INITIAL_HEIGHT + 1)
            .unwrap();
        assert_eq!(suite.get_height(), INITIAL_HEIGHT + 1);
    }

    #[test]
    fn relayer_alone_cannot_replace_the_validator_set() {
        let mut suite = SuiteBuilder::new().build();
        let relayer = suite.relayer(0);
        let current = gen_validators(1, 3, 10);
        let forged = gen_validators(200, 1, 1);
        let before = suite.get_consensus_state();

        // announcing a foreign set with only the relayer's own validator
        let announce = header(INITIAL_HEIGHT + 1, &current, None, &forged);
        let proof = suite.sign_header(announce.clone(), &[0]);
        let err = suite
            .sync_header(&relayer, &proof, INITIAL_HEIGHT + 1)
            .unwrap_err();
        assert_matches!(
            err,
            ContractError::ProofRejected(LightClientError::InsufficientQuorum { .. })
        );

        // signed by the foreign key under the current validators' bits
        let mut proof = sign_header(announce, &forged, &[0]);
        proof.bitmap = bitmap(&[0, 1]);
        let err = suite
            .sync_header(&relayer, &proof, INITIAL_HEIGHT + 1)
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::ProofRejected(LightClientError::SignatureInvalid {})
        );

        // carrying the foreign set right away
        let carry = header(INITIAL_HEIGHT + 1, &current, Some(&forged[..]), &forged);
        let proof = sign_header(carry, &forged, &[0]);
        let err = suite
            .sync_header(&relayer, &proof, INITIAL_HEIGHT + 1)
            .unwrap_err();
        assert_matches!(err, ContractError::ProofRejected(_));
        assert_eq!(suite.get_consensus_state(), before);

        // packages signed by the foreign key are still refused
        let envelope = envelope(0, PackageType::Syn, TRANSFER_OUT_CHANNEL, 0, transfer_payload(1));
        let proof = sign_envelope(&envelope, &forged, &[0]);
        let err = suite.handle_package(&relayer, &proof).unwrap_err();
        assert_matches!(err, ContractError::ProofRejected(_));
        assert!(suite.get_received(TRANSFER_OUT_CHANNEL).is_empty());
    }

    #[test]
    fn validator_set_rotation() {
        let mut suite = SuiteBuilder::new().build();
        let old_relayer = suite.relayer(0);
        let current = gen_validators(1, 3, 10);
        let next = gen_validators(11, 4, 10);

        // a set nobody announced is refused
        let proof = suite.sign_header(
            header(INITIAL_HEIGHT + 1, &current, Some(&next[..]), &next),
            &[0, 1],
        );
        let err = suite
            .sync_header(&old_relayer, &proof, INITIAL_HEIGHT + 1)
            .unwrap_err();
        assert_matches!(
            err,
            ContractError::LightClient(LightClientError::UnannouncedValidatorSet { .. })
        );

        // announce, then switch; both headers are signed by the outgoing set
        let proof = suite.sign_header(
            header(INITIAL_HEIGHT + 1, &current, None, &next),
            &[0, 1],
        );
        suite
            .sync_header(&old_relayer, &proof, INITIAL_HEIGHT + 1)
            .unwrap();
        let proof = suite.sign_header(
            header(INITIAL_HEIGHT + 2, &current, Some(&next[..]), &next),
            &[1, 2],
        );
        let res = suite
            .sync_header(&old_relayer, &proof, INITIAL_HEIGHT + 2)
            .unwrap();
        let event = find_event(&res, "sync_header").unwrap();
        assert_eq!(attr(event, "validator_set_changed"), "true");

        let state = suite.get_consensus_state();
        assert_eq!(state.height, INITIAL_HEIGHT + 2);
        assert_eq!(state.validators.len(), 4);
        let new_relayers: Vec<_> = next.iter().map(|v| suite.relayer_of(v)).collect();
        assert_eq!(suite.get_relayers(), new_relayers);

        let envelope = envelope(0, PackageType::Syn, TRANSFER_OUT_CHANNEL, 0, transfer_payload(1));

        // the old set's relayers and signatures are no longer accepted
        let old_proof = suite.sign(&envelope, &[0, 1]);
        let err = suite.handle_package(&old_relayer, &old_proof).unwrap_err();
        assert_eq!(err, ContractError::Unauthorized { role: "relayer" });
        let err = suite
            .handle_package(&new_relayers[0], &old_proof)
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::ProofRejected(LightClientError::InsufficientQuorum {
                signers: 2,
                validators: 4,
                signed_power: 20,
                total_power: 40,
            })
        );

        // later headers are signed by the new set
        let proof = suite.sign_header(header(INITIAL_HEIGHT + 3, &next, None, &next), &[0, 1, 2]);
        let err = suite
            .sync_header(&new_relayers[0], &proof, INITIAL_HEIGHT + 3)
            .unwrap_err();
        assert_matches!(err, ContractError::ProofRejected(_));
        let proof = sign_header(
            header(INITIAL_HEIGHT + 3, &next, None, &next),
            &next,
            &[0, 1, 2],
        );
        suite
            .sync_header(&new_relayers[0], &proof, INITIAL_HEIGHT + 3)
            .unwrap();

        let proof = sign_envelope(&envelope, &next, &[0, 1, 3]);
        suite.handle_package(&new_relayers[3], &proof).unwrap();
    }

    #[test]
    fn package_delivered_after_the_first_header() {
        let mut suite = SuiteBuilder::new().with_initial_height(1).build();
        let relayer = suite.relayer(1);
        let validators = gen_validators(1, 3, 10);
        assert_eq!(suite.get_height(), 1);

        let bytes = header(2, &validators, None, &validators);
        let proof = suite.sign_header(bytes.clone(), &[0]);
        let err = suite.sync_header(&relayer, &proof, 2).unwrap_err();
        assert_matches!(
            err,
            ContractError::ProofRejected(LightClientError::InsufficientQuorum { .. })
        );
        assert_eq!(suite.get_height(), 1);

        let proof = suite.sign_header(bytes, &[0, 1]);
        suite.sync_header(&relayer, &proof, 2).unwrap();
        assert_eq!(suite.get_height(), 2);

        let envelope = envelope(
            0,
            PackageType::Syn,
            TRANSFER_OUT_CHANNEL,
            0,
            transfer_payload(5_000),
        );
        let proof = suite.sign(&envelope, &[1, 2]);
        suite.handle_package(&relayer, &proof).unwrap();

        assert_eq!(suite.get_channel_sequence(TRANSFER_OUT_CHANNEL).receive, 1);
        assert_eq!(suite.get_oracle_sequence().receive, 1);
        let delivered = suite.get_received(TRANSFER_OUT_CHANNEL);
        assert_eq!(delivered.len(), 1);
        let transfer: TransferPackage = decode_payload(&delivered[0].payload).unwrap();
        assert_eq!(
            transfer,
            TransferPackage {
                amount: 5_000,
                recipient: [7; 20],
                refund_address: [8; 20],
            }
        );
    }

    #[test]
    fn light_client_initialized_later() {
        let mut suite = SuiteBuilder::new().without_light_client().build();
        let relayer = suite.relayer(0);
        let envelope = envelope(0, PackageType::Syn, TRANSFER_OUT_CHANNEL, 0, transfer_payload(1));
        let proof = suite.sign(&envelope, &[0, 1]);

        let err = suite.handle_package(&relayer, &proof).unwrap_err();
        assert_eq!(err, ContractError::NotInitialized {});
        assert!(suite.verify_package(&proof).is_err());

        let state = consensus_state(INITIAL_HEIGHT, &suite.validators, None);
        let stranger = suite.addr("stranger");
        let err = suite.init_light_client(&stranger, state.clone()).unwrap_err();
        assert_matches!(err, ContractError::Admin(_));

        let admin = suite.admin.clone();
        suite.init_light_client(&admin, state.clone()).unwrap();
        assert_eq!(suite.get_height(), INITIAL_HEIGHT);
        let err = suite.init_light_client(&admin, state).unwrap_err();
        assert_eq!(err, ContractError::AlreadyInitialized {});

        suite.handle_package(&relayer, &proof).unwrap();
    }
}

mod emergency {
    use super::*;

    #[test]
    fn operator_repairs_sequences() {
        let mut suite = SuiteBuilder::new().build();
        let operator = suite.operator.clone();

        let res = suite
            .change_sequence(&operator, false, TRANSFER_OUT_CHANNEL, true, true, 5)
            .unwrap();
        let event = find_event(&res, "emergency_change_sequence").unwrap();
        assert_eq!(attr(event, "target"), "channel_2");
        assert_eq!(attr(event, "side"), "receive");
        assert_eq!(attr(event, "old_sequence"), "0");
        assert_eq!(attr(event, "new_sequence"), "5");
        assert_eq!(attr(event, "actor"), operator.as_str());
        suite
            .change_sequence(&operator, false, TRANSFER_OUT_CHANNEL, false, true, 2)
            .unwrap();
        assert_eq!(suite.get_channel_sequence(TRANSFER_OUT_CHANNEL).receive, 3);

        // the channel id is ignored for the oracle
        suite
            .change_sequence(&operator, true, 200, true, false, 4)
            .unwrap();
        assert_eq!(
            suite.get_oracle_sequence(),
            Sequences {
                send: 4,
                receive: 0
            }
        );

        // the delivery expectation follows the repaired sequence
        let relayer = suite.relayer(0);
        let envelope = envelope(0, PackageType::Syn, TRANSFER_OUT_CHANNEL, 3, transfer_payload(1));
        let proof = suite.sign(&envelope, &[0, 1]);
        suite.handle_package(&relayer, &proof).unwrap();
    }

    #[test]
    fn sequence_changes_are_checked() {
        let mut suite = SuiteBuilder::new().build();
        let operator = suite.operator.clone();
        let admin = suite.admin.clone();

        let err = suite
            .change_sequence(&admin, false, TRANSFER_OUT_CHANNEL, true, true, 1)
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::Unauthorized {
                role: "emergency operator"
            }
        );
        let err = suite
            .change_sequence(&operator, false, TRANSFER_OUT_CHANNEL, true, true, 0)
            .unwrap_err();
        assert_eq!(err, ContractError::ZeroDelta {});
        let err = suite
            .change_sequence(&operator, false, GNFD_EXECUTOR_CHANNEL, true, true, 1)
            .unwrap_err();
        assert_eq!(err, ContractError::UnknownChannel(GNFD_EXECUTOR_CHANNEL));
        let err = suite
            .change_sequence(&operator, false, TRANSFER_OUT_CHANNEL, false, false, 1)
            .unwrap_err();
        assert_eq!(err, ContractError::SequenceUnderflow {});
        suite
            .change_sequence(&operator, true, 0, true, true, u64::MAX)
            .unwrap();
        let err = suite
            .change_sequence(&operator, true, 0, true, true, 1)
            .unwrap_err();
        assert_eq!(err, ContractError::SequenceOverflow {});
    }

    #[test]
    fn suspension_stops_relaying() {
        let mut suite = SuiteBuilder::new().build();
        let operator = suite.operator.clone();
        let relayer = suite.relayer(0);
        let handler = suite.handler(TRANSFER_OUT_CHANNEL);

        let stranger = suite.addr("stranger");
        let err = suite.suspend(&stranger).unwrap_err();
        assert_eq!(
            err,
            ContractError::Unauthorized {
                role: "emergency operator"
            }
        );
        let err = suite.reopen(&operator).unwrap_err();
        assert_eq!(err, ContractError::NotSuspended {});

        let res = suite.suspend(&operator).unwrap();
        assert!(find_event(&res, "suspend").is_some());
        assert!(suite.is_suspended());
        let err = suite.suspend(&operator).unwrap_err();
        assert_eq!(err, ContractError::Suspended {});

        let envelope = envelope(0, PackageType::Syn, TRANSFER_OUT_CHANNEL, 0, transfer_payload(1));
        let proof = suite.sign(&envelope, &[0, 1]);
        let err = suite.handle_package(&relayer, &proof).unwrap_err();
        assert_eq!(err, ContractError::Suspended {});
        let err = suite
            .send_package(&handler, TRANSFER_OUT_CHANNEL, PackageType::Syn, transfer_payload(1))
            .unwrap_err();
        assert_eq!(err, ContractError::Suspended {});
        let validators = gen_validators(1, 3, 10);
        let header_proof = suite.sign_header(
            header(INITIAL_HEIGHT + 1, &validators, None, &validators),
            &[0, 1],
        );
        let err = suite
            .sync_header(&relayer, &header_proof, INITIAL_HEIGHT + 1)
            .unwrap_err();
        assert_eq!(err, ContractError::Suspended {});

        // repairs are still possible
        suite
            .change_sequence(&operator, false, TRANSFER_OUT_CHANNEL, true, false, 1)
            .unwrap();

        let res = suite.reopen(&operator).unwrap();
        assert!(find_event(&res, "reopen").is_some());
        assert!(!suite.is_suspended());
        suite.handle_package(&relayer, &proof).unwrap();
    }
}

mod queries {
    use super::*;

    #[test]
    fn inturn_relayer_rotates() {
        let mut suite = SuiteBuilder::new().build();
        let relayers = suite.get_relayers();

        let now = suite.block_time();
        let inturn = suite.get_inturn_relayer();
        let index = ((now / 1800) % 3) as usize;
        assert_eq!(inturn.relayer, relayers[index]);
        assert_eq!(inturn.start, now - now % 1800);
        assert_eq!(inturn.end, inturn.start + 1800);
        assert!(inturn.start <= now && now < inturn.end);

        suite.advance_seconds(1800);
        let next = suite.get_inturn_relayer();
        assert_eq!(next.relayer, relayers[(index + 1) % 3]);
        assert_eq!(next.start, inturn.end);
    }

    #[test]
    fn inturn_relayer_with_the_longest_interval() {
        let mut suite = SuiteBuilder::new().with_relay_interval(u64::MAX).build();
        let relayers = suite.get_relayers();

        let inturn = suite.get_inturn_relayer();
        assert_eq!(inturn.relayer, relayers[0]);
        assert_eq!(inturn.start, 0);
        assert_eq!(inturn.end, u64::MAX);

        // close to the last second a block time can hold
        suite.advance_seconds(16_000_000_000);
        assert_eq!(suite.get_inturn_relayer(), inturn);
    }

    #[test]
    fn verify_package_reports_the_quorum() {
        let suite = SuiteBuilder::new().build();
        let envelope = envelope(0, PackageType::Syn, TRANSFER_OUT_CHANNEL, 0, transfer_payload(1));

        let proof = suite.sign(&envelope, &[0, 2]);
        let res = suite.verify_package(&proof).unwrap();
        assert_eq!(res.signers, 2);
        assert_eq!(res.signed_power, 20);
        assert_eq!(res.total_power, 30);

        let proof = suite.sign(&envelope, &[2]);
        let err = suite.verify_package(&proof).unwrap_err();
        assert!(err.to_string().contains("Insufficient quorum"));

        let mut proof = suite.sign(&envelope, &[0, 1]);
        proof.signature.truncate(48);
        assert!(suite.verify_package(&proof).is_err());

        // the query has no side effects
        assert_eq!(suite.get_oracle_sequence(), Sequences::default());
    }
}

mod admin {
    use super::*;

    #[test]
    fn admin_registers_channels() {
        let mut suite = SuiteBuilder::new().build();
        let admin = suite.admin.clone();
        let executor = suite.addr("executor");

        let stranger = suite.addr("stranger");
        let err = suite
            .register_channel(&stranger, GNFD_EXECUTOR_CHANNEL, &executor)
            .unwrap_err();
        assert_matches!(err, ContractError::Admin(_));

        let res = suite
            .register_channel(&admin, GNFD_EXECUTOR_CHANNEL, &executor)
            .unwrap();
        let event = find_event(&res, "register_channel").unwrap();
        assert_eq!(attr(event, "handler"), executor.as_str());
        assert_eq!(suite.get_channels().channels.len(), 4);

        let err = suite
            .register_channel(&admin, TRANSFER_OUT_CHANNEL, &executor)
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::ChannelAlreadyRegistered(TRANSFER_OUT_CHANNEL)
        );
        assert_eq!(
            suite.handler(TRANSFER_OUT_CHANNEL),
            suite.get_channels().channels[1].handler
        );
    }

    #[test]
    fn migrate_works() {
        let mut suite = SuiteBuilder::new().build();
        let res = suite.migrate().unwrap();
        let event = res.events.iter().find(|e| e.ty == "wasm").unwrap();
        assert_eq!(attr(event, "action"), "migrate");
        assert_eq!(attr(event, "to_version"), crate::contract::CONTRACT_VERSION);

        // state survives
        assert_eq!(suite.get_height(), INITIAL_HEIGHT);
        assert_eq!(suite.get_channels().channels.len(), 3);
    }
}
