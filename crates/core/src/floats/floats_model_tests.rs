//! Tests for float domain models, in particular the status wire values.

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal_macros::dec;

    use crate::floats::{FloatStatus, NewFloat};

    const ALL_STATUSES: [FloatStatus; 10] = [
        FloatStatus::Pending,
        FloatStatus::AwaitingAccountant,
        FloatStatus::AccountantApproved,
        FloatStatus::AwaitingDoctor,
        FloatStatus::Approved,
        FloatStatus::Open,
        FloatStatus::PartiallyClosed,
        FloatStatus::Closed,
        FloatStatus::RejectedByAccountant,
        FloatStatus::RejectedByDoctor,
    ];

    #[test]
    fn status_round_trips_every_wire_literal() {
        for status in ALL_STATUSES {
            assert_eq!(FloatStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn status_serializes_to_arabic_literals() {
        assert_eq!(
            serde_json::to_string(&FloatStatus::Open).unwrap(),
            "\"مفتوحة\""
        );
        assert_eq!(
            serde_json::to_string(&FloatStatus::AwaitingAccountant).unwrap(),
            "\"بانتظار مراجعة المحاسب\""
        );
        assert_eq!(
            serde_json::from_str::<FloatStatus>("\"مقبولة نهائياً\"").unwrap(),
            FloatStatus::Approved
        );
    }

    #[test]
    fn unknown_status_fails_to_parse() {
        assert!(FloatStatus::from_str("open").is_err());
    }

    #[test]
    fn review_statuses_block_new_requests() {
        for status in ALL_STATUSES {
            let expected = matches!(
                status,
                FloatStatus::Pending
                    | FloatStatus::AwaitingAccountant
                    | FloatStatus::AccountantApproved
                    | FloatStatus::AwaitingDoctor
            );
            assert_eq!(status.is_in_review(), expected, "{status:?}");
        }
    }

    #[test]
    fn only_live_balances_are_supersedable() {
        for status in ALL_STATUSES {
            let expected = matches!(status, FloatStatus::Open | FloatStatus::PartiallyClosed);
            assert_eq!(status.is_supersedable(), expected, "{status:?}");
        }
    }

    #[test]
    fn rejected_statuses_release_the_sequence_number() {
        assert!(FloatStatus::RejectedByAccountant.is_rejected());
        assert!(FloatStatus::RejectedByDoctor.is_rejected());
        assert!(!FloatStatus::Closed.is_rejected());
    }

    #[test]
    fn new_float_requires_employee_and_positive_amount() {
        let valid = NewFloat {
            employee: "مهندس سامح حافظ".to_string(),
            amount: dec!(1000),
        };
        assert!(valid.validate().is_ok());

        let no_employee = NewFloat {
            employee: "  ".to_string(),
            amount: dec!(1000),
        };
        assert!(no_employee.validate().is_err());

        let zero_amount = NewFloat {
            employee: "مهندس سامح حافظ".to_string(),
            amount: dec!(0),
        };
        assert!(zero_amount.validate().is_err());
    }
}
