use crate::importer::fields::{field, Field};
use crate::importer::normalize::parse_number;
use crate::models::RawRecord;

/// Signed amount of a statement row: credits positive, debits negative.
///
/// Dedicated debit/credit columns take precedence over a generic amount
/// column, which is only consulted when both are zero or absent.
pub fn infer_amount(record: &RawRecord) -> f64 {
    let debit = parse_number(field(record, Field::Debit));
    let credit = parse_number(field(record, Field::Credit));

    if credit != 0.0 && debit == 0.0 {
        return credit;
    }
    if debit != 0.0 && credit == 0.0 {
        return -debit;
    }
    if credit != 0.0 || debit != 0.0 {
        return credit - debit;
    }

    let amount = field(record, Field::Amount);
    if amount.trim().is_empty() {
        0.0
    } else {
        parse_number(amount)
    }
}
