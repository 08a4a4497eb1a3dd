/// Number of digits in a one-time verification code.
pub const OTP_CODE_LENGTH: u32 = 6;

/// Minutes before an issued one-time code expires.
pub const OTP_TTL_MINUTES: i64 = 10;

/// Wire format for business dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
