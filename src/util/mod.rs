pub mod errors;
pub mod notation;

use num_format::{Locale, ToFormattedString};


pub fn format_count(count: u64) -> String {
    return count.to_formatted_string(&Locale::en);
}

pub fn format_bytes(bytes: u64) -> String {
    return bytefmt::format(bytes);
}
