//! Interactive console session over the ledger core. All reads and writes go
//! through the injected handles so sessions can be scripted in tests.

use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use chrono::Datelike;

use crate::common::money::Money;
use crate::domain::bank::Bank;
use crate::domain::transaction::{Transaction, TxKind};
use crate::io::report;

/// Runs the menu loop until the operator exits or input ends.
pub fn run<R, W>(input: &mut R, output: &mut W, data_dir: &Path) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut bank = Bank::open(data_dir);

    loop {
        writeln!(output)?;
        writeln!(output, "Bank Ledger")?;
        writeln!(output, "1. Create a new account")?;
        writeln!(output, "2. Use an existing account")?;
        writeln!(output, "3. Admin options")?;
        writeln!(output, "4. Exit")?;

        let Some(choice) = prompt(input, output, "Choice: ")? else {
            break;
        };
        match choice.as_str() {
            "1" => create_account(&mut bank, input, output)?,
            "2" => use_account(&mut bank, input, output)?,
            "3" => admin_menu(&bank, input, output)?,
            "4" => {
                writeln!(output, "Thank you for using the bank ledger.")?;
                break;
            }
            other => writeln!(output, "Unknown choice: {other}")?,
        }
    }

    Ok(())
}

fn create_account<R: BufRead, W: Write>(
    bank: &mut Bank,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()> {
    let Some(name) = prompt(input, output, "Customer name: ")? else {
        return Ok(());
    };
    let Some(age_text) = prompt(input, output, "Customer age: ")? else {
        return Ok(());
    };
    let Ok(age) = age_text.parse::<u32>() else {
        writeln!(output, "Invalid age: {age_text}")?;
        return Ok(());
    };

    match bank.create_customer(&name, age) {
        Ok(account_id) => {
            writeln!(output, "Account created for {name} with account ID {account_id}.")?;
            operations(bank, account_id, input, output)
        }
        Err(err) => writeln!(output, "{err}"),
    }
}

fn use_account<R: BufRead, W: Write>(
    bank: &mut Bank,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()> {
    let Some(id_text) = prompt(input, output, "Account ID: ")? else {
        return Ok(());
    };
    let Ok(account_id) = id_text.parse::<u32>() else {
        writeln!(output, "Invalid account ID: {id_text}")?;
        return Ok(());
    };

    match bank.customer(account_id) {
        Ok(_) => operations(bank, account_id, input, output),
        Err(err) => writeln!(output, "{err}"),
    }
}

fn operations<R: BufRead, W: Write>(
    bank: &mut Bank,
    account_id: u32,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()> {
    loop {
        writeln!(output)?;
        writeln!(output, "1. Deposit money")?;
        writeln!(output, "2. Withdraw money")?;
        writeln!(output, "3. View previous transactions")?;
        writeln!(output, "4. View balance")?;
        writeln!(output, "5. Filter transactions")?;
        writeln!(output, "6. Back")?;

        let Some(choice) = prompt(input, output, "Operation: ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => {
                let Some(amount) = prompt_amount(input, output, "Deposit amount: ")? else {
                    continue;
                };
                let result = bank.customer_mut(account_id).and_then(|customer| {
                    customer.deposit_money(amount)?;
                    Ok(customer.balance())
                });
                match result {
                    Ok(balance) => {
                        writeln!(output, "New balance: {balance}")?;
                        bank.persist_customer(account_id);
                    }
                    Err(err) => writeln!(output, "{err}")?,
                }
            }
            "2" => {
                let Some(amount) = prompt_amount(input, output, "Withdrawal amount: ")? else {
                    continue;
                };
                let result = bank.customer_mut(account_id).and_then(|customer| {
                    customer.withdraw_money(amount)?;
                    Ok(customer.balance())
                });
                match result {
                    Ok(balance) => {
                        writeln!(output, "New balance: {balance}")?;
                        bank.persist_customer(account_id);
                    }
                    Err(err) => writeln!(output, "{err}")?,
                }
            }
            "3" => match bank.customer(account_id) {
                Ok(customer) => {
                    let txs: Vec<&Transaction> = customer.account().transactions().iter().collect();
                    writeln!(output, "Previous transactions:")?;
                    print_transactions(output, &txs)?;
                }
                Err(err) => writeln!(output, "{err}")?,
            },
            "4" => match bank.customer(account_id) {
                Ok(customer) => writeln!(output, "Balance: {}", customer.balance())?,
                Err(err) => writeln!(output, "{err}")?,
            },
            "5" => filter_transactions(bank, account_id, input, output)?,
            "6" => return Ok(()),
            other => writeln!(output, "Unknown choice: {other}")?,
        }
    }
}

/// Post-hoc queries over the exposed transaction sequence; the core itself
/// does not filter.
fn filter_transactions<R: BufRead, W: Write>(
    bank: &Bank,
    account_id: u32,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()> {
    writeln!(output, "1. By year and month")?;
    writeln!(output, "2. By type")?;
    let Some(choice) = prompt(input, output, "Filter by: ")? else {
        return Ok(());
    };

    let customer = match bank.customer(account_id) {
        Ok(customer) => customer,
        Err(err) => return writeln!(output, "{err}"),
    };

    match choice.as_str() {
        "1" => {
            let Some(year_text) = prompt(input, output, "Year (yyyy): ")? else {
                return Ok(());
            };
            let Some(month_text) = prompt(input, output, "Month (1-12): ")? else {
                return Ok(());
            };
            let (Ok(year), Ok(month)) = (year_text.parse::<i32>(), month_text.parse::<u32>())
            else {
                return writeln!(output, "Invalid year or month.");
            };

            let matches: Vec<&Transaction> = customer
                .account()
                .transactions()
                .iter()
                .filter(|t| t.timestamp().year() == year && t.timestamp().month() == month)
                .collect();
            writeln!(output, "Transactions for {year}-{month:02}:")?;
            print_transactions(output, &matches)
        }
        "2" => {
            let Some(kind_text) = prompt(input, output, "Type (Deposit/Withdrawal): ")? else {
                return Ok(());
            };
            match TxKind::from_str(&kind_text) {
                Ok(kind) => {
                    let matches: Vec<&Transaction> = customer
                        .account()
                        .transactions()
                        .iter()
                        .filter(|t| t.kind() == kind)
                        .collect();
                    writeln!(output, "Transactions of type {kind}:")?;
                    print_transactions(output, &matches)
                }
                Err(err) => writeln!(output, "{err}"),
            }
        }
        other => writeln!(output, "Unknown choice: {other}"),
    }
}

fn admin_menu<R: BufRead, W: Write>(
    bank: &Bank,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()> {
    writeln!(output, "1. View all accounts")?;
    writeln!(output, "2. View all transactions")?;
    let Some(choice) = prompt(input, output, "Admin option: ")? else {
        return Ok(());
    };

    let customers = bank.customers();
    match choice.as_str() {
        "1" => {
            if customers.is_empty() {
                return writeln!(output, "No accounts found.");
            }
            writeln!(output, "All accounts:")?;
            if let Err(err) = report::write_account_summary(&mut *output, &customers) {
                writeln!(output, "could not write account summary: {err}")?;
            }
            Ok(())
        }
        "2" => {
            if customers.is_empty() {
                return writeln!(output, "No accounts available to show transactions.");
            }
            writeln!(output, "All transactions:")?;
            for customer in customers {
                writeln!(
                    output,
                    "Account ID: {} - {} - Transactions:",
                    customer.account_id(),
                    customer.name()
                )?;
                for tx in customer.account().transactions() {
                    writeln!(output, "{tx}")?;
                }
            }
            Ok(())
        }
        other => writeln!(output, "Unknown choice: {other}"),
    }
}

fn print_transactions<W: Write>(output: &mut W, txs: &[&Transaction]) -> std::io::Result<()> {
    if txs.is_empty() {
        return writeln!(output, "No matching transactions.");
    }
    for tx in txs {
        writeln!(output, "{tx}")?;
    }
    Ok(())
}

fn prompt_amount<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> std::io::Result<Option<Money>> {
    let Some(text) = prompt(input, output, label)? else {
        return Ok(None);
    };
    match Money::from_str(&text) {
        Ok(amount) => Ok(Some(amount)),
        Err(_) => {
            writeln!(output, "Invalid amount: {text}")?;
            Ok(None)
        }
    }
}

/// Writes the label and reads one trimmed line; `None` means end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> std::io::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
