//! Account record encoding
//!
//! One record per line:
//!
//! ```text
//! <name>|<email>|<credential hash>|<YYYY-MM-DD HH:MM:SS>
//! ```
//!
//! Each field is escaped with [`super::escape`]. Timestamps are UTC.

use chrono::{NaiveDateTime, TimeZone, Utc};

use super::escape::{join_fields, split_fields, unescape};
use crate::account::{Account, REGISTERED_AT_FORMAT};

/// Number of fields in a well-formed record
pub const FIELD_COUNT: usize = 4;

/// Encode an account as a single line, without the line terminator.
pub fn encode(account: &Account) -> String {
    join_fields(&[
        account.name().to_string(),
        account.email().to_string(),
        account.credential_hash().to_string(),
        account.registered_at_display(),
    ])
}

/// Decode one line. Returns `None` for anything that is not a well-formed
/// record: wrong field count or an unparseable timestamp.
pub fn decode(line: &str) -> Option<Account> {
    let fields = split_fields(line);
    if fields.len() != FIELD_COUNT {
        return None;
    }

    let registered_at =
        NaiveDateTime::parse_from_str(&unescape(fields[3]), REGISTERED_AT_FORMAT).ok()?;

    Some(Account::new(
        unescape(fields[0]),
        unescape(fields[1]),
        unescape(fields[2]),
        Utc.from_utc_datetime(&registered_at),
    ))
}
