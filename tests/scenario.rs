use std::fs;
use std::str::FromStr;

use tempfile::TempDir;

use bank_ledger::io::store_file;
use bank_ledger::{Bank, BankError, Money, TxKind};

fn money(v: &str) -> Money {
    Money::from_str(v).unwrap()
}

#[test]
fn alice_account_lifecycle() {
    let dir = TempDir::new().unwrap();
    let mut bank = Bank::open(dir.path());

    let id = bank.create_customer("Alice", 30).unwrap();
    assert_eq!(id, 100, "fresh counter starts at 100");

    let customer = bank.customer_mut(id).unwrap();
    customer.deposit_money(money("500")).unwrap();
    assert_eq!(customer.balance(), money("500"));
    assert_eq!(customer.account().transactions().len(), 1);
    assert_eq!(customer.account().transactions()[0].id(), 1);
    assert_eq!(customer.account().transactions()[0].kind(), TxKind::Deposit);

    customer.withdraw_money(money("200")).unwrap();
    assert_eq!(customer.balance(), money("300"));
    assert_eq!(customer.account().transactions().len(), 2);
    assert_eq!(customer.account().transactions()[1].id(), 2);
    assert_eq!(
        customer.account().transactions()[1].kind(),
        TxKind::Withdrawal
    );

    let err = customer.withdraw_money(money("1000")).unwrap_err();
    assert!(matches!(err, BankError::InsufficientBalance { .. }));
    assert_eq!(customer.balance(), money("300"));
    assert_eq!(customer.account().transactions().len(), 2);
}

#[test]
fn counter_survives_sequential_runs() {
    let dir = TempDir::new().unwrap();

    let first = {
        let mut bank = Bank::open(dir.path());
        bank.create_customer("Alice", 30).unwrap()
    };

    let second = {
        let mut bank = Bank::open(dir.path());
        bank.create_customer("Bob", 41).unwrap()
    };

    assert_eq!(second, first + 1);
}

#[test]
fn persisted_file_round_trips_header_and_transactions() {
    let dir = TempDir::new().unwrap();
    let mut bank = Bank::open(dir.path());
    let id = bank.create_customer("Alice", 30).unwrap();

    let customer = bank.customer_mut(id).unwrap();
    customer.deposit_money(money("500")).unwrap();
    customer.withdraw_money(money("200")).unwrap();
    bank.persist_customer(id);

    let text = fs::read_to_string(store_file::customer_file(&bank.customers_dir(), id)).unwrap();
    let persisted = store_file::parse(&text);

    assert_eq!(persisted.name, "Alice");
    assert_eq!(persisted.age, 30);
    assert_eq!(persisted.account_id, 100);
    assert_eq!(persisted.balance, money("300"));
    assert_eq!(
        persisted.transactions,
        bank.customer(id).unwrap().account().transactions().to_vec()
    );
}

#[test]
fn double_save_merges_and_renumbers() {
    let dir = TempDir::new().unwrap();
    let mut bank = Bank::open(dir.path());
    let id = bank.create_customer("Alice", 30).unwrap();

    // first save of the session: one deposit on file
    bank.customer_mut(id)
        .unwrap()
        .deposit_money(money("500"))
        .unwrap();
    bank.persist_customer(id);

    // second save without reloading: the merge re-reads the first save and
    // appends the whole in-memory sequence after it
    bank.customer_mut(id)
        .unwrap()
        .withdraw_money(money("200"))
        .unwrap();
    bank.persist_customer(id);

    let text = fs::read_to_string(store_file::customer_file(&bank.customers_dir(), id)).unwrap();
    let persisted = store_file::parse(&text);

    let amounts: Vec<Money> = persisted.transactions.iter().map(|t| t.amount()).collect();
    assert_eq!(
        amounts,
        vec![money("500"), money("500"), money("200")],
        "neither save's transactions were dropped"
    );

    let ids: Vec<u32> = persisted.transactions.iter().map(|t| t.id()).collect();
    assert_eq!(ids, vec![1, 2, 3], "on-disk ids stay unique and dense");
}

#[test]
fn lookups_are_idempotent_and_side_effect_free() {
    let dir = TempDir::new().unwrap();
    let mut bank = Bank::open(dir.path());
    let id = bank.create_customer("Alice", 30).unwrap();
    bank.customer_mut(id)
        .unwrap()
        .deposit_money(money("12.5"))
        .unwrap();

    for _ in 0..3 {
        let by_id = bank.customer(id).unwrap();
        let by_name = bank.customer_by_name("Alice").unwrap();

        assert_eq!(by_id.account_id(), by_name.account_id());
        assert_eq!(by_id.balance(), money("12.5"));
        assert_eq!(by_name.balance(), money("12.5"));
        assert_eq!(by_id.account().transactions().len(), 1);
    }
}

#[test]
fn fresh_run_does_not_index_existing_customer_files() {
    let dir = TempDir::new().unwrap();
    {
        let mut bank = Bank::open(dir.path());
        let id = bank.create_customer("Alice", 30).unwrap();
        bank.customer_mut(id)
            .unwrap()
            .deposit_money(money("500"))
            .unwrap();
        bank.persist_customer(id);
    }

    let bank = Bank::open(dir.path());
    assert!(matches!(
        bank.customer(100),
        Err(BankError::AccountNotFound(100))
    ));
    assert!(matches!(
        bank.customer_by_name("Alice"),
        Err(BankError::NameNotFound(_))
    ));

    // the file itself is still there, and a new run's saves merge into it
    let text = fs::read_to_string(store_file::customer_file(&bank.customers_dir(), 100)).unwrap();
    assert_eq!(store_file::parse(&text).transactions.len(), 1);
}
