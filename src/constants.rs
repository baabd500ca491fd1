use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

// Client-facing messages (Hebrew, the site's language)
pub const SUCCESS_MESSAGE: &str = "ההודעה נשלחה בהצלחה";
pub const INVALID_DATA_MESSAGE: &str = "נתונים לא תקינים";
pub const RATE_LIMITED_MESSAGE: &str = "יותר מדי בקשות. אנא נסו שוב בעוד 15 דקות.";
pub const DELIVERY_FAILED_MESSAGE: &str = "אירעה שגיאה בשליחת ההודעה. אנא נסו שוב מאוחר יותר.";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

/// Bucket shared by every request whose origin cannot be derived from headers.
pub const UNKNOWN_CLIENT: &str = "unknown";

pub const MAX_FIELD_CHARS: usize = 1000;
pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 5;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;
pub const MAX_RATE_LIMIT_WINDOW_SECS: u64 = 30 * 24 * 60 * 60;
