//! Record-identity hasher
//!
//! Derives a stable content hash of a flattened record so downstream
//! consumers can detect duplicate or unchanged records across runs. The
//! `'key':'value'||` segment format and the MD5 digest are load-bearing:
//! existing consumers compare against fingerprints produced by earlier
//! exports.

use md5::{Digest, Md5};

use crate::flatten::FlatRecord;

/// Fingerprint of a flattened record: MD5 over `'k':'v'||` segments in
/// lexicographic key order, as lowercase hex.
pub fn fingerprint(record: &FlatRecord) -> String {
    let mut joined = String::new();
    for (key, value) in record {
        joined.push_str(&format!("'{}':'{}'||", key, value));
    }
    hex::encode(Md5::digest(joined.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Record, Value};
    use crate::flatten::flatten;
    use rust_decimal::Decimal;

    #[test]
    fn test_known_digest() {
        let mut record = Record::new();
        record.push("amount", Value::Amount(Decimal::new(1250, 2)));
        record.push("purpose", Value::text("rent"));

        let flat = flatten(&record).unwrap();
        assert_eq!(fingerprint(&flat), "a20074064841cd8498eebf0168225319");
    }

    #[test]
    fn test_known_digest_for_integral_amount() {
        let mut amount = Record::new();
        amount.push("amount", Value::Amount(Decimal::new(1875000, 2)));

        let mut balance = Record::new();
        balance.push("amount", Value::Record(amount));

        let mut record = Record::new();
        record.push("balance", Value::Record(balance));

        // Segment must read 'balance_amount_amount':'18750.0'|| - integral
        // amounts keep their decimal point.
        let flat = flatten(&record).unwrap();
        assert_eq!(fingerprint(&flat), "04a93a50674e1c5143b31c47d4ce1798");
    }

    #[test]
    fn test_invariant_under_source_key_order() {
        let mut a = Record::new();
        a.push("purpose", Value::text("rent"));
        a.push("amount", Value::Amount(Decimal::new(1250, 2)));

        let mut b = Record::new();
        b.push("amount", Value::Amount(Decimal::new(1250, 2)));
        b.push("purpose", Value::text("rent"));

        assert_eq!(
            fingerprint(&flatten(&a).unwrap()),
            fingerprint(&flatten(&b).unwrap())
        );
    }

    #[test]
    fn test_sensitive_to_any_value_change() {
        let mut a = Record::new();
        a.push("amount", Value::Amount(Decimal::new(1250, 2)));
        a.push("purpose", Value::text("rent"));

        let mut b = Record::new();
        b.push("amount", Value::Amount(Decimal::new(1251, 2)));
        b.push("purpose", Value::text("rent"));

        assert_ne!(
            fingerprint(&flatten(&a).unwrap()),
            fingerprint(&flatten(&b).unwrap())
        );
    }

    #[test]
    fn test_sensitive_to_key_rename() {
        let mut a = Record::new();
        a.push("purpose", Value::text("rent"));
        let mut b = Record::new();
        b.push("reference", Value::text("rent"));

        assert_ne!(
            fingerprint(&flatten(&a).unwrap()),
            fingerprint(&flatten(&b).unwrap())
        );
    }
}
