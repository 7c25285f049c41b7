use proptest::prelude::*;

use rooch_address::RoochAddress;
use rooch_bcs::{Decode, Encode};
use rooch_primitives::ec::Keypair;
use rooch_transaction::{
    Args, FunctionCall, FunctionCallBuilder, MoveAction, SignedTransaction, SignerConfig,
    StructTag, TransactionBuilder, TransactionData, TransactionSigner, TypeTag,
};

fn type_tag() -> impl Strategy<Value = TypeTag> {
    let leaf = prop_oneof![
        Just(TypeTag::Bool),
        Just(TypeTag::U8),
        Just(TypeTag::U16),
        Just(TypeTag::U32),
        Just(TypeTag::U64),
        Just(TypeTag::U128),
        Just(TypeTag::U256),
        Just(TypeTag::Address),
        Just(TypeTag::Signer),
    ];
    leaf.prop_recursive(4, 16, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(TypeTag::vector),
            (
                prop::array::uniform32(any::<u8>()),
                "[a-z][a-z0-9_]{0,8}",
                "[A-Z][A-Za-z0-9]{0,8}",
                prop::collection::vec(inner, 0..3),
            )
                .prop_map(|(addr, module, name, params)| {
                    TypeTag::struct_tag(StructTag::new(
                        RoochAddress::from_bytes(&addr),
                        module.parse().unwrap(),
                        name.parse().unwrap(),
                        params,
                    ))
                }),
        ]
    })
}

fn function_call() -> impl Strategy<Value = FunctionCall> {
    (
        prop::collection::vec(type_tag(), 0..3),
        prop::collection::vec(prop::collection::vec(any::<u8>(), 0..40), 0..4),
    )
        .prop_map(|(ty_args, args)| {
            FunctionCall::new("0x3::coin::transfer".parse().unwrap(), ty_args, args)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn type_tag_bcs_and_text_roundtrip(tag in type_tag()) {
        let bytes = tag.to_bcs_bytes();
        prop_assert_eq!(TypeTag::from_bcs_bytes(&bytes).unwrap(), tag.clone());
        if !matches!(tag, TypeTag::Signer) {
            prop_assert_eq!(tag.to_string().parse::<TypeTag>().unwrap(), tag);
        }
    }

    #[test]
    fn transaction_data_roundtrip(
        sender in prop::array::uniform32(any::<u8>()),
        seq in any::<u64>(),
        chain in any::<u64>(),
        gas in any::<u64>(),
        call in function_call(),
    ) {
        let tx = TransactionData::new(
            RoochAddress::from_bytes(&sender),
            seq,
            chain,
            gas,
            MoveAction::Function(call),
        );
        let bytes = tx.to_bytes();
        let decoded = TransactionData::from_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded.to_bytes(), bytes);
        prop_assert_eq!(decoded, tx);
    }

    #[test]
    fn integer_args_have_fixed_width(v in any::<u64>(), w in any::<u128>()) {
        let a64 = Args::u64(v).unwrap();
        let a128 = Args::u128(w).unwrap();
        prop_assert_eq!(a64.as_bytes(), &v.to_le_bytes()[..]);
        prop_assert_eq!(a128.as_bytes(), &w.to_le_bytes()[..]);
        prop_assert_eq!(Args::u256(w).unwrap().len(), 32);
        prop_assert_eq!(Args::u8(v).is_ok(), v <= u64::from(u8::MAX));
        prop_assert_eq!(Args::u32(v).is_ok(), v <= u64::from(u32::MAX));
    }

    #[test]
    fn default_signing_stamps_the_derived_sender(
        seed in prop::collection::vec(any::<u8>(), 1..32),
        sender in prop::array::uniform32(any::<u8>()),
        amount in any::<u64>(),
    ) {
        let signer = TransactionSigner::new(Keypair::from_seed(&seed).unwrap(), SignerConfig::default()).unwrap();
        let call = FunctionCallBuilder::new("0x3::transfer::transfer_coin")
            .type_arg_str("0x3::gas_coin::RGas")
            .arg(Args::address(RoochAddress::from_bytes(&sender)).unwrap())
            .arg(Args::u256(amount).unwrap())
            .build()
            .unwrap();
        let tx = TransactionBuilder::new()
            .sender(RoochAddress::from_bytes(&sender))
            .function_call(call)
            .build()
            .unwrap();

        let signed = signer.sign(tx).unwrap();
        prop_assert_eq!(signed.tx.sender, signer.rooch_address());
        let decoded = SignedTransaction::from_hex(&signed.to_hex()).unwrap();
        prop_assert!(decoded.auth.bitcoin_payload().unwrap().verify(&decoded.tx).is_ok());
    }
}
