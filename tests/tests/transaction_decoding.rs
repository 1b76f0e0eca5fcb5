use serum_decoder_tests::{
    build_transaction, cancel_order_by_client_id_data, decode_serum_instructions,
    decode_transaction, decode_transaction_snapshot, deterministic_keypair, new_order_accounts,
    new_order_data, serum_ix, system_transfer_ix, Config,
};
use serum_instruction_decoder::{
    DecodeError, InstructionAccounts, SerumInstruction, DEX_PROGRAM_ID,
};
use solana_instruction::AccountMeta;
use solana_native_token::LAMPORTS_PER_SOL;
use solana_pubkey::Pubkey;
use solana_signer::Signer;
use solana_transaction::versioned::VersionedTransaction;

/// A `new_order` with the SRM discount account followed by a plain transfer.
fn order_and_transfer() -> (VersionedTransaction, Pubkey, Vec<AccountMeta>) {
    let payer = deterministic_keypair(1).pubkey();
    let recipient = deterministic_keypair(2).pubkey();
    let accounts = new_order_accounts(&payer, true);
    let ixs = [
        serum_ix(new_order_data(0, 1_500, 40, 0, 7), accounts.clone()),
        system_transfer_ix(&payer, &recipient, LAMPORTS_PER_SOL),
    ];
    (build_transaction(&ixs, &payer), payer, accounts)
}

#[test]
fn test_decode_transaction_routes_by_program() {
    let (tx, _, accounts) = order_and_transfer();
    let log = decode_transaction(&tx, &Config::default());

    assert_eq!(log.instructions.len(), 2);
    let order = &log.instructions[0];
    assert_eq!(order.program_id, DEX_PROGRAM_ID);
    assert_eq!(order.program_name, "Serum DEX");
    assert_eq!(order.instruction_name.as_deref(), Some("new_order"));
    assert_eq!(order.accounts.len(), accounts.len());
    for (position, meta) in accounts.iter().enumerate() {
        assert_eq!(order.accounts[position].pubkey, meta.pubkey);
    }
    assert_eq!(order.account_name(4), Some("owner"));
    assert_eq!(order.account_name(9), Some("srm_discount_account"));
    assert_eq!(order.account_name(10), None);

    let transfer = &log.instructions[1];
    assert_eq!(transfer.program_name, "System Program");
    assert!(transfer.instruction_name.is_none());
    assert!(transfer.decoded_instruction.is_none());

    assert_eq!(log.instructions_for(&DEX_PROGRAM_ID).count(), 1);
}

#[test]
fn test_decode_without_registry_only_names_programs() {
    let (tx, _, _) = order_and_transfer();
    let log = decode_transaction(&tx, &Config::default().without_decoders());
    assert_eq!(log.instructions[0].program_name, "Serum DEX");
    assert!(log.instructions[0].decoded_instruction.is_none());
}

#[test]
fn test_decode_serum_instructions_resolves_roles() {
    let (tx, payer, accounts) = order_and_transfer();
    let decoded = decode_serum_instructions(&tx);
    assert_eq!(decoded.len(), 1);

    let (index, result) = &decoded[0];
    assert_eq!(*index, 0);
    let ix = result.as_ref().unwrap();
    assert!(matches!(ix.payload, SerumInstruction::NewOrder(_)));
    let Some(InstructionAccounts::NewOrder(roles)) = &ix.accounts else {
        panic!("expected new_order accounts, got {:?}", ix.accounts);
    };
    assert_eq!(roles.owner.pubkey, payer);
    assert!(roles.owner.is_signer);
    assert_eq!(roles.market.pubkey, accounts[0].pubkey);
    assert_eq!(
        roles.srm_discount_account.as_ref().map(|a| a.pubkey),
        Some(accounts[9].pubkey)
    );
}

#[test]
fn test_decode_serum_instructions_reports_each_failure() {
    let payer = deterministic_keypair(3).pubkey();
    let short_accounts = vec![AccountMeta::new_readonly(payer, true)];
    let ixs = [
        serum_ix(cancel_order_by_client_id_data(5), short_accounts),
        serum_ix(vec![0, 0x10, 0, 0, 0], vec![]),
        serum_ix(new_order_data(0, 1, 1, 0, 1), new_order_accounts(&payer, false)),
    ];
    let tx = build_transaction(&ixs, &payer);

    let decoded = decode_serum_instructions(&tx);
    assert_eq!(decoded.len(), 3);
    assert!(matches!(
        decoded[0].1,
        Err(DecodeError::InsufficientAccounts {
            instruction: "cancel_order_by_client_id",
            required: 4,
            actual: 1,
        })
    ));
    assert_eq!(decoded[1].1, Err(DecodeError::UnknownVariant(16)));
    assert!(decoded[2].1.is_ok());
}

#[test]
fn test_transaction_snapshot() {
    let (tx, payer, _) = order_and_transfer();
    let snapshot = decode_transaction_snapshot(&tx, &Config::default());

    assert_eq!(snapshot.signature, "1".repeat(64));
    let order = &snapshot.instructions[0];
    assert_eq!(order.instruction_name.as_deref(), Some("new_order"));
    assert_eq!(order.accounts[4].role.as_deref(), Some("owner"));
    assert_eq!(order.accounts[4].pubkey, payer.to_string());
    assert!(order.accounts[4].is_signer);
    assert_eq!(
        bs58::decode(&order.data).into_vec().unwrap(),
        new_order_data(0, 1_500, 40, 0, 7)
    );

    insta::assert_json_snapshot!(order.decoded_fields, @r###"
    [
      {
        "name": "side",
        "value": "BID"
      },
      {
        "name": "limit_price",
        "value": "1500"
      },
      {
        "name": "max_quantity",
        "value": "40"
      },
      {
        "name": "order_type",
        "value": "LIMIT"
      },
      {
        "name": "client_id",
        "value": "7"
      }
    ]
    "###);

    let json = serde_json::to_value(&snapshot).unwrap();
    let transfer = &json["instructions"][1];
    assert_eq!(transfer["program_name"], "System Program");
    assert!(transfer.get("instruction_name").is_none());
    assert!(transfer.get("decoded_fields").is_none());
    assert!(transfer["accounts"][0].get("role").is_none());
}
