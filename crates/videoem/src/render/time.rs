use std::fmt::Display;

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone};

/// 与 en-GB 的 `day month(short) year, hour:minute` 格式一致，例如 10 Oct 2000, 10:10
const DISPLAY_FORMAT: &str = "%d %b %Y, %H:%M";

/// en-GB 的九月缩写是 Sept，其它月份与 `%b` 相同
fn display<Tz>(datetime: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let formatted = datetime.format(DISPLAY_FORMAT).to_string();
    if datetime.month() == 9 {
        formatted.replacen(" Sep ", " Sept ", 1)
    } else {
        formatted
    }
}

const INVALID_DATE: &str = "Invalid Date";

/// 将数据库时间转换为本地时区的展示格式
pub fn format_db_time(raw: &str) -> String {
    format_db_time_in(raw, &Local)
}

pub fn format_db_time_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let raw = raw.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return display(datetime.with_timezone(tz));
    }
    // 不带时区的时间按照目标时区的本地时间处理
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
    {
        Some(datetime) => display(datetime),
        None => INVALID_DATE.to_owned(),
    }
}
