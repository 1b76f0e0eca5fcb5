use serum_decoder_tests::{
    cancel_order_by_client_id_data, cancel_order_data, consume_events_data, envelope,
    initialize_market_data, match_orders_data, new_order_data, settle_funds_data,
};
use serum_instruction_decoder::{
    programs::serum::{
        CancelOrder, CancelOrderByClientId, ConsumeEvents, InitializeMarket, MatchOrder,
        NewOrder, OrderTypeKind, Payload, SettleFunds, SideKind, INSTRUCTION_HEADER_LEN,
    },
    DecodeError, Instruction, OrderType, SerumInstruction, Side,
};
use solana_pubkey::Pubkey;

fn all_variants() -> Vec<SerumInstruction> {
    vec![
        SerumInstruction::InitializeMarket(InitializeMarket {
            base_lot_size: 100,
            quote_lot_size: 10,
            fee_rate_bps: 22,
            vault_signer_nonce: 3,
            quote_dust_threshold: 100,
        }),
        SerumInstruction::NewOrder(NewOrder {
            side: Side::ASK,
            limit_price: 1_234,
            max_quantity: 5_000,
            order_type: OrderType::POST_ONLY,
            client_id: u64::MAX,
        }),
        SerumInstruction::MatchOrder(MatchOrder { limit: 65_535 }),
        SerumInstruction::ConsumeEvents(ConsumeEvents { limit: 10 }),
        SerumInstruction::CancelOrder(CancelOrder {
            side: 1,
            order_id: u128::MAX - 7,
            open_orders: Pubkey::new_unique().to_bytes(),
            open_orders_slot: 127,
        }),
        SerumInstruction::SettleFunds(SettleFunds),
        SerumInstruction::CancelOrderByClientId(CancelOrderByClientId { client_id: 42 }),
    ]
}

fn payload_len(payload: &SerumInstruction) -> usize {
    match payload {
        SerumInstruction::InitializeMarket(_) => InitializeMarket::LEN,
        SerumInstruction::NewOrder(_) => NewOrder::LEN,
        SerumInstruction::MatchOrder(_) => MatchOrder::LEN,
        SerumInstruction::ConsumeEvents(_) => ConsumeEvents::LEN,
        SerumInstruction::CancelOrder(_) => CancelOrder::LEN,
        SerumInstruction::SettleFunds(_) => SettleFunds::LEN,
        SerumInstruction::CancelOrderByClientId(_) => CancelOrderByClientId::LEN,
    }
}

#[test]
fn test_round_trip_all_variants() {
    for payload in all_variants() {
        let instruction = Instruction::new(2, payload);
        let bytes = borsh::to_vec(&instruction).unwrap();
        assert_eq!(
            bytes.len(),
            INSTRUCTION_HEADER_LEN + payload_len(&instruction.payload)
        );
        assert_eq!(bytes[0], 2);
        assert_eq!(
            u32::from_le_bytes(bytes[1..5].try_into().unwrap()),
            instruction.discriminator()
        );

        let decoded = Instruction::decode(&bytes).unwrap();
        assert_eq!(decoded, instruction, "round trip of {}", instruction.name());
    }
}

#[test]
fn test_decode_initialize_market() {
    let data = initialize_market_data(100, 1, 22, 7, 5);
    let ix = Instruction::decode(&data).unwrap();
    assert_eq!(ix.version, 0);
    assert_eq!(ix.discriminator(), 0);
    assert_eq!(ix.name(), "initialize_market");
    assert_eq!(
        ix.payload,
        SerumInstruction::InitializeMarket(InitializeMarket {
            base_lot_size: 100,
            quote_lot_size: 1,
            fee_rate_bps: 22,
            vault_signer_nonce: 7,
            quote_dust_threshold: 5,
        })
    );
    // encoder agrees with the hand-built wire bytes
    assert_eq!(borsh::to_vec(&ix).unwrap(), data);
}

#[test]
fn test_decode_new_order() {
    let data = new_order_data(0, 25_000, 3, 1, 987_654_321);
    let ix = Instruction::decode(&data).unwrap();
    let SerumInstruction::NewOrder(order) = &ix.payload else {
        panic!("expected new_order, got {:?}", ix.payload);
    };
    assert_eq!(order.side.kind(), SideKind::Bid);
    assert_eq!(order.limit_price, 25_000);
    assert_eq!(order.max_quantity, 3);
    assert_eq!(order.order_type.kind(), OrderTypeKind::ImmediateOrCancel);
    assert_eq!(order.client_id, 987_654_321);
}

#[test]
fn test_decode_match_and_consume_limits() {
    let ix = Instruction::decode(&match_orders_data(300)).unwrap();
    assert_eq!(ix.payload, SerumInstruction::MatchOrder(MatchOrder { limit: 300 }));
    assert_eq!(ix.name(), "match_orders");

    let ix = Instruction::decode(&consume_events_data(5)).unwrap();
    assert_eq!(
        ix.payload,
        SerumInstruction::ConsumeEvents(ConsumeEvents { limit: 5 })
    );
}

#[test]
fn test_decode_cancel_order() {
    let open_orders = Pubkey::new_unique();
    let order_id = (1u128 << 100) | 0xdead_beef;
    let data = cancel_order_data(1, order_id, &open_orders, 9);
    let ix = Instruction::decode(&data).unwrap();
    let SerumInstruction::CancelOrder(cancel) = &ix.payload else {
        panic!("expected cancel_order, got {:?}", ix.payload);
    };
    assert_eq!(cancel.order_id, order_id);
    assert_eq!(cancel.open_orders_pubkey(), open_orders);
    assert_eq!(cancel.open_orders_slot, 9);
}

#[test]
fn test_cancel_order_side_stays_raw() {
    let data = cancel_order_data(2, 1, &Pubkey::new_unique(), 0);
    let ix = Instruction::decode(&data).unwrap();
    let SerumInstruction::CancelOrder(cancel) = &ix.payload else {
        panic!("expected cancel_order");
    };
    let side: u32 = cancel.side;
    assert_eq!(side, 2);

    let side_field = ix
        .payload
        .fields()
        .into_iter()
        .find(|f| f.name == "side")
        .unwrap();
    assert_eq!(side_field.value, "2");

    // new_order renders the same raw value as a label
    let ix = Instruction::decode(&new_order_data(1, 1, 1, 0, 1)).unwrap();
    let side_field = ix
        .payload
        .fields()
        .into_iter()
        .find(|f| f.name == "side")
        .unwrap();
    assert_eq!(side_field.value, "ASK");
}

#[test]
fn test_decode_settle_funds_and_cancel_by_client_id() {
    let ix = Instruction::decode(&settle_funds_data()).unwrap();
    assert_eq!(ix.payload, SerumInstruction::SettleFunds(SettleFunds));
    assert!(ix.payload.fields().is_empty());

    let ix = Instruction::decode(&cancel_order_by_client_id_data(77)).unwrap();
    assert_eq!(
        ix.payload,
        SerumInstruction::CancelOrderByClientId(CancelOrderByClientId { client_id: 77 })
    );
}

#[test]
fn test_unknown_enum_values_keep_raw_integer() {
    let data = new_order_data(2, 10, 10, 5, 1);
    let ix = Instruction::decode(&data).unwrap();
    let SerumInstruction::NewOrder(order) = &ix.payload else {
        panic!("expected new_order");
    };
    assert_eq!(order.side.kind(), SideKind::Unknown);
    assert_eq!(order.side.to_string(), "UNKNOWN");
    assert_eq!(order.side.raw(), 2);
    assert_eq!(order.order_type.kind(), OrderTypeKind::Unknown);
    assert_eq!(order.order_type.to_string(), "UNKNOWN");
    assert_eq!(order.order_type.raw(), 5);

    // and re-encode to the original wire bytes
    assert_eq!(borsh::to_vec(&ix).unwrap(), data);
}

#[test]
fn test_unknown_discriminator() {
    for discriminator in [7u32, 8, 255, 0x0100_0000, u32::MAX] {
        let data = envelope(0, discriminator, &[0u8; 64]);
        assert_eq!(
            Instruction::decode(&data),
            Err(DecodeError::UnknownVariant(discriminator))
        );
    }
}

#[test]
fn test_truncated_header() {
    for len in 0..INSTRUCTION_HEADER_LEN {
        let data = vec![0u8; len];
        assert!(
            matches!(
                Instruction::decode(&data),
                Err(DecodeError::TruncatedInput { remaining, .. }) if remaining == len
            ),
            "header of {len} bytes should be truncated"
        );
    }
}

#[test]
fn test_truncated_payloads() {
    for payload in all_variants() {
        let bytes = borsh::to_vec(&Instruction::new(0, payload.clone())).unwrap();
        for len in INSTRUCTION_HEADER_LEN..bytes.len() {
            let result = Instruction::decode(&bytes[..len]);
            assert_eq!(
                result,
                Err(DecodeError::TruncatedInput {
                    context: payload.name(),
                    needed: payload_len(&payload),
                    remaining: len - INSTRUCTION_HEADER_LEN,
                }),
                "{} truncated to {len} bytes",
                payload.name()
            );
        }
    }
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let mut data = match_orders_data(4);
    data.extend_from_slice(&[0xAA; 3]);
    let ix = Instruction::decode(&data).unwrap();
    assert_eq!(ix.payload, SerumInstruction::MatchOrder(MatchOrder { limit: 4 }));
}

#[test]
fn test_error_messages_name_the_cause() {
    let err = Instruction::decode(&new_order_data(0, 1, 1, 0, 1)[..10]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "truncated input: new_order requires 32 bytes, 5 remaining"
    );
    let err = Instruction::decode(&envelope(0, 9, &[])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown instruction variant with discriminator 9"
    );
}
