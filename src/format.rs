use chrono::{DateTime, FixedOffset, Offset, Utc};

pub const RUPEE: &str = "₹";

/// India Standard Time, +05:30.
pub fn ist() -> FixedOffset {
    offset_from_minutes(IST_OFFSET_MINUTES)
}

pub const IST_OFFSET_MINUTES: i32 = 330;

/// Out-of-range offsets (beyond a day) fall back to UTC.
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

/// Renders whole rupees the way `en-IN` does: `₹12,34,567`.
pub fn format_inr(amount: impl Into<i128>) -> String {
    let amount = amount.into();
    let digits = amount.unsigned_abs().to_string();
    let sign = if amount < 0 { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("{sign}{RUPEE}{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();

    format!("{sign}{RUPEE}{},{tail}", groups.join(","))
}

pub fn format_datetime(timestamp: Option<DateTime<FixedOffset>>, offset: FixedOffset) -> String {
    match timestamp {
        Some(ts) => ts
            .with_timezone(&offset)
            .format("%-d/%-m/%Y, %-I:%M:%S %P")
            .to_string(),
        None => "-".to_owned(),
    }
}

pub fn format_date(timestamp: Option<DateTime<FixedOffset>>, offset: FixedOffset) -> String {
    match timestamp {
        Some(ts) => ts.with_timezone(&offset).format("%-d/%-m/%Y").to_string(),
        None => "-".to_owned(),
    }
}
