use std::io::Write;

use crate::domain::customer::Customer;

#[derive(serde::Serialize)]
/// One row of the admin account summary. Headers written (in this order):
/// `account_id,name,age,balance,transactions`. The balance is formatted to
/// 4 decimal places as a string.
struct SummaryRow {
    account_id: u32,
    name: String,
    age: u32,
    balance: String,
    transactions: usize,
}

/// Writes the admin account summary as CSV, one row per customer.
///
/// Rows are sorted by account id ascending for deterministic output.
///
/// # Errors
///
/// Returns a `csv::Error` if serializing or flushing any row fails.
pub fn write_account_summary<W: Write>(
    writer: W,
    customers: &[&Customer],
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    let mut customers: Vec<&&Customer> = customers.iter().collect();
    customers.sort_by_key(|c| c.account_id());

    for customer in customers {
        wtr.serialize(SummaryRow {
            account_id: customer.account_id(),
            name: customer.name().to_string(),
            age: customer.age(),
            balance: customer.balance().to_string(),
            transactions: customer.account().transactions().len(),
        })?;
    }

    wtr.flush()?;
    Ok(())
}
