use crate::models::RawRecord;

/// Canonical columns a statement export can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Description,
    Debit,
    Credit,
    Amount,
}

impl Field {
    /// Header spellings seen in bank exports, in precedence order.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Date => &["Fecha", "FECHA", "Date", "DATE"],
            Self::Description => &[
                "Descripción",
                "Descripcion",
                "DESCRIPCION",
                "DESCRIPCIÓN",
                "Transacción",
                "Transaccion",
                "TRANSACCION",
                "TRANSACCIÓN",
                "Detalle",
                "DETALLE",
                "Description",
                "DESCRIPTION",
            ],
            Self::Debit => &["Débito", "Debito", "DEBITO", "DÉBITO", "Cargo", "CARGO", "Debit", "DEBIT"],
            Self::Credit => &["Crédito", "Credito", "CREDITO", "CRÉDITO", "Abono", "ABONO", "Credit", "CREDIT"],
            Self::Amount => &["Monto", "MONTO", "Amount", "AMOUNT", "Importe", "IMPORTE", "Total", "TOTAL"],
        }
    }
}

/// First value under any of `aliases` that is non-blank, or `""`.
pub fn resolve<'a>(record: &'a RawRecord, aliases: &[&str]) -> &'a str {
    aliases
        .iter()
        .filter_map(|alias| record.get(*alias))
        .find(|value| !value.trim().is_empty())
        .map(String::as_str)
        .unwrap_or("")
}

/// [`resolve`] against a field's alias list.
pub fn field<'a>(record: &'a RawRecord, field: Field) -> &'a str {
    resolve(record, field.aliases())
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
    fn test_first_alias_wins() {
        let r = record(&[("Date", "2024-02-02"), ("Fecha", "2024-01-01")]);
        assert_eq!(field(&r, Field::Date), "2024-01-01");
    }

    #[test]
    fn test_blank_values_fall_through() {
        let r = record(&[("Fecha", "   "), ("DATE", "2024-01-01")]);
        assert_eq!(field(&r, Field::Date), "2024-01-01");
    }

    #[test]
    fn test_value_is_returned_untrimmed() {
        let r = record(&[("Detalle", "  Café  ")]);
        assert_eq!(field(&r, Field::Description), "  Café  ");
    }

    #[test]
    fn test_missing_field_is_empty() {
        let r = record(&[("Saldo", "10")]);
        assert_eq!(field(&r, Field::Amount), "");
        assert_eq!(resolve(&r, &[]), "");
    }

    #[test]
    fn test_accent_and_case_variants() {
        let r = record(&[("DEBITO", "5"), ("Abono", "7")]);
        assert_eq!(field(&r, Field::Debit), "5");
        assert_eq!(field(&r, Field::Credit), "7");
    }
}
