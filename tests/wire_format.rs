use cl_rangeproof::{random_bits, Error, Proof, ProofStructure, QrGroup, SquaresTable};
use num_bigint::BigInt;
use rand::SeedableRng;
use serde_json::Value;

fn rng() -> (impl rand::CryptoRng + rand::RngCore) {
    const TEST_RNG_SEED: [u8; 32] = *b"NEVER USE THIS FOR ANYTHING REAL";
    rand::rngs::StdRng::from_seed(TEST_RNG_SEED)
}

// A small group keeps this file fast; the algebra is covered elsewhere.
fn group() -> QrGroup {
    QrGroup::new(BigInt::from(35), BigInt::from(3), BigInt::from(4))
}

fn proof() -> (ProofStructure, Proof, BigInt) {
    let mut rng = rng();
    let group = group();
    let structure = ProofStructure::new(
        1,
        &BigInt::from(45),
        Box::new(SquaresTable::generate(512)),
        256,
        128,
        256,
    );
    let m = BigInt::from(112);
    let m_randomizer = random_bits(&mut rng, 256 + 256 + 128);
    let (_, commit) = structure
        .commitments_from_secrets(&mut rng, &group, &m, &m_randomizer)
        .unwrap();
    let challenge = BigInt::from(1_234_567);
    let proof = structure.build_proof(commit, &challenge);
    (structure, proof, challenge)
}

#[test]
fn field_names_and_decimal_encoding() {
    let (_, proof, _) = proof();
    let json: Value = serde_json::to_value(&proof).unwrap();

    let object = json.as_object().unwrap();
    for field in ["C", "d", "v", "v5", "m", "l_d", "a", "k"] {
        assert!(object.contains_key(field), "missing field {}", field);
    }

    assert_eq!(json["C"].as_array().unwrap().len(), 3);
    assert!(json["C"][0].is_string(), "bases travel as decimal strings");
    assert!(json["v5"].is_string());
    assert_eq!(json["a"], Value::from(4));
    assert_eq!(json["k"], Value::from("178"));
    assert!(json["l_d"].is_u64());
}

#[test]
fn proofs_round_trip_through_json() {
    let (structure, proof, challenge) = proof();
    let group = group();

    let json = serde_json::to_string(&proof).unwrap();
    let decoded: Proof = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, proof);

    assert!(structure.verify_proof_structure(&group, &decoded));
    assert_eq!(
        structure.commitments_from_proof(&group, &decoded, &challenge),
        structure.commitments_from_proof(&group, &proof, &challenge)
    );
}

#[test]
fn missing_wire_fields_fail_verification_not_decoding() {
    let (structure, proof, _) = proof();
    let group = group();

    let mut json: Value = serde_json::to_value(&proof).unwrap();
    let removed = json.as_object_mut().unwrap().remove("m");
    assert!(removed.is_some());

    let decoded: Proof = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.m_response, None);
    assert!(!structure.verify_proof_structure(&group, &decoded));
}

#[test]
fn structure_reconstruction_respects_parameter_bounds() {
    let (_, proof, _) = proof();

    assert!(proof.extract_structure(256, 128, 256).is_ok());

    let mut no_k = proof.clone();
    no_k.k = None;
    assert_eq!(no_k.extract_structure(256, 128, 256).err(), Some(Error::InvalidProof));

    // a K wider than lm plus a machine word makes the statement trivial
    let mut wide_k = proof.clone();
    wide_k.k = Some(BigInt::from(1) << (256 + 64 + 1) as usize);
    assert_eq!(wide_k.extract_structure(256, 128, 256).err(), Some(Error::InvalidProof));

    let mut two_bases = proof;
    two_bases.commitments.truncate(2);
    assert_eq!(two_bases.extract_structure(256, 128, 256).err(), Some(Error::InvalidProof));
}
