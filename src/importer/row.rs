use crate::importer::amount::infer_amount;
use crate::importer::fields::{field, Field};
use crate::importer::normalize::normalize_date;
use crate::models::{CanonicalTransaction, RawRecord};

/// Turn one raw record into a transaction, or `None` when it has no date or no
/// description. A zero amount never discards a row.
pub fn normalize_row(record: &RawRecord) -> Option<CanonicalTransaction> {
    let date = normalize_date(field(record, Field::Date));
    let description = field(record, Field::Description).trim();
    if date.is_empty() || description.is_empty() {
        return None;
    }
    Some(CanonicalTransaction::new(date, description, infer_amount(record)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_complete_row() {
        let r = record(&[("Fecha", "01/03/2024"), ("Detalle", " Café "), ("Monto", "-3,50")]);
        let tx = normalize_row(&r).unwrap();
        assert_eq!(tx.date, "2024-03-01");
        assert_eq!(tx.description, "Café");
        assert_eq!(tx.amount, -3.5);
    }

    #[test]
    fn test_missing_date_is_dropped() {
        let r = record(&[("Fecha", ""), ("Detalle", "Café"), ("Monto", "100")]);
        assert!(normalize_row(&r).is_none());
    }

    #[test]
    fn test_blank_description_is_dropped() {
        let r = record(&[("Fecha", "2024-03-01"), ("Descripción", "   "), ("Monto", "100")]);
        assert!(normalize_row(&r).is_none());
    }

    #[test]
    fn test_zero_amount_is_kept() {
        let r = record(&[("Date", "2024-03-01"), ("Description", "Memo line")]);
        let tx = normalize_row(&r).unwrap();
        assert_eq!(tx.amount, 0.0);
    }

    #[test]
    fn test_unparsed_date_is_kept_verbatim() {
        let r = record(&[("Date", "March 1"), ("Description", "Rent"), ("Amount", "-10")]);
        assert_eq!(normalize_row(&r).unwrap().date, "March 1");
    }

    #[test]
    fn test_long_description_is_bounded() {
        let long = "x".repeat(800);
        let r = record(&[("Date", "2024-03-01"), ("Description", &long)]);
        assert_eq!(normalize_row(&r).unwrap().description.chars().count(), 500);
    }
}
