//! Property-based tests for text layout and date rendering.
//!
//! Uses proptest to verify that:
//! - Padding never shortens text and reaches the requested column width
//! - Short ids are prefixes of the full id
//! - Dates render as M/D/YYYY for any UTC timestamp

use chrono::{Datelike, TimeZone, Utc};
use itrack::format::{pad_to_width, short_id};
use itrack::ui::format_date;
use proptest::prelude::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

mod common;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        ..Default::default()
    })]

    /// Property: padded text keeps its content and fills the width
    #[test]
    fn pad_reaches_requested_width(text in "[a-zA-Z0-9 éü日本語]{0,16}", width in 0usize..40) {
        common::init_test_logging();
        let padded = pad_to_width(&text, width);
        info!(?text, width, "pad_reaches_requested_width");

        prop_assert!(padded.starts_with(&text));
        let used = UnicodeWidthStr::width(text.as_str());
        prop_assert_eq!(UnicodeWidthStr::width(padded.as_str()), used.max(width));
    }

    /// Property: short ids are prefixes of at most eight characters
    #[test]
    fn short_id_is_prefix(id in "[0-9a-f-]{0,40}") {
        let short = short_id(&id);
        prop_assert!(id.starts_with(short));
        prop_assert!(short.chars().count() <= 8);
        prop_assert_eq!(short.chars().count(), id.chars().count().min(8));
    }

    /// Property: dates render as M/D/YYYY without zero padding
    #[test]
    fn dates_render_month_day_year(secs in 0i64..4_102_444_800i64) {
        let ts = Utc.timestamp_opt(secs, 0).single().expect("valid timestamp");
        let rendered = format_date(&ts);
        let parts: Vec<&str> = rendered.split('/').collect();

        prop_assert_eq!(parts.len(), 3);
        prop_assert_eq!(parts[0].parse::<u32>().unwrap(), ts.month());
        prop_assert_eq!(parts[1].parse::<u32>().unwrap(), ts.day());
        prop_assert_eq!(parts[2].parse::<i32>().unwrap(), ts.year());
        prop_assert!(!parts[0].starts_with('0') && !parts[1].starts_with('0'));
    }
}
