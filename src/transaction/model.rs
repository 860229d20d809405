use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A transfer waiting in the pending pool or sealed inside a block.
///
/// `amount` keeps whatever JSON number the submitter sent; it is not
/// range-checked and round-trips through peers byte-for-byte, so block
/// digests computed on different nodes agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: Number,
}

impl Transaction {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Number>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Transaction;

    #[test]
    fn amount_keeps_submitted_number_form() {
        let tx: Transaction =
            serde_json::from_str(r#"{"sender":"a","recipient":"b","amount":5}"#).unwrap();
        assert_eq!(serde_json::to_string(&tx.amount).unwrap(), "5");

        let tx: Transaction =
            serde_json::from_str(r#"{"sender":"a","recipient":"b","amount":-2.5}"#).unwrap();
        assert_eq!(serde_json::to_string(&tx.amount).unwrap(), "-2.5");
    }

    #[test]
    fn missing_field_is_rejected() {
        let res = serde_json::from_str::<Transaction>(r#"{"sender":"a","amount":1}"#);
        assert!(res.is_err());
    }
}
