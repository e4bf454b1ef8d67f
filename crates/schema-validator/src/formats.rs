//! String-format checkers for the `format` keyword (`spec.md` §4.6). Trimmed
//! to the formats the spec names: `uri`, `uri-reference`, `email`,
//! `color-hex`, `date`, `time`, `date-time`. Parsing logic for `date`/`time`
//! is adapted byte-for-byte from the upstream JSON Schema validator this
//! crate's resolver layer is built on; `color-hex` has no upstream
//! counterpart and is hand-written.

pub fn is_known_format(name: &str) -> bool {
    matches!(
        name,
        "uri" | "uri-reference" | "email" | "color-hex" | "date" | "time" | "date-time"
    )
}

pub fn check(name: &str, value: &str) -> bool {
    match name {
        "uri" => schema_referencing::Uri::parse(value).is_ok(),
        "uri-reference" => schema_referencing::UriRef::parse(value).is_ok(),
        "email" => is_valid_email(value),
        "color-hex" => is_valid_color_hex(value),
        "date" => is_valid_date(value),
        "time" => is_valid_time(value),
        "date-time" => is_valid_date_time(value),
        _ => true,
    }
}

fn is_valid_color_hex(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_valid_email(email: &str) -> bool {
    use email_address::EmailAddress;
    use std::net::{Ipv4Addr, Ipv6Addr};
    use std::str::FromStr;

    let Ok(parsed) = EmailAddress::from_str(email) else {
        return false;
    };
    let domain = parsed.domain();
    if let Some(domain) = domain.strip_prefix('[').and_then(|d| d.strip_suffix(']')) {
        if let Some(domain) = domain.strip_prefix("IPv6:") {
            domain.parse::<Ipv6Addr>().is_ok()
        } else {
            domain.parse::<Ipv4Addr>().is_ok()
        }
    } else {
        is_valid_hostname(domain)
    }
}

fn is_valid_hostname(hostname: &str) -> bool {
    !(hostname.ends_with('-')
        || hostname.starts_with('-')
        || hostname.is_empty()
        || hostname.chars().count() > 255
        || hostname.chars().any(|c| !(c.is_alphanumeric() || c == '-' || c == '.'))
        || hostname.split('.').any(|part| part.chars().count() > 63))
}

fn is_valid_date(date: &str) -> bool {
    if date.len() != 10 {
        return false;
    }
    let bytes = date.as_bytes();
    if bytes[4] != b'-'
        || bytes[7] != b'-'
        || !bytes[..4].iter().all(u8::is_ascii_digit)
        || !bytes[5..7].iter().all(u8::is_ascii_digit)
        || !bytes[8..10].iter().all(u8::is_ascii_digit)
    {
        return false;
    }
    let year = (bytes[0] as u16 - b'0' as u16) * 1000
        + (bytes[1] as u16 - b'0' as u16) * 100
        + (bytes[2] as u16 - b'0' as u16) * 10
        + (bytes[3] as u16 - b'0' as u16);
    let month = (bytes[5] - b'0') * 10 + (bytes[6] - b'0');
    if month < 1 || month > 12 {
        return false;
    }
    let day = (bytes[8] - b'0') * 10 + (bytes[9] - b'0');
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => day >= 1 && day <= 31,
        4 | 6 | 9 | 11 => day >= 1 && day <= 30,
        2 if is_leap_year(year) => day >= 1 && day <= 29,
        2 => day >= 1 && day <= 28,
        _ => false,
    }
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn is_valid_time(item: &str) -> bool {
    let bytes = item.as_bytes();
    let len = bytes.len();
    if len < 9 {
        return false;
    }
    if !bytes[0].is_ascii_digit()
        || !bytes[1].is_ascii_digit()
        || bytes[2] != b':'
        || !bytes[3].is_ascii_digit()
        || !bytes[4].is_ascii_digit()
        || bytes[5] != b':'
        || !bytes[6].is_ascii_digit()
        || !bytes[7].is_ascii_digit()
    {
        return false;
    }
    let hh = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    let mm = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
    let ss = (bytes[6] - b'0') * 10 + (bytes[7] - b'0');
    if hh > 23 || mm > 59 || ss > 60 {
        return false;
    }
    let mut i = 8;
    if i < len && bytes[i] == b'.' {
        i += 1;
        let mut has_digit = false;
        while i < len && bytes[i].is_ascii_digit() {
            has_digit = true;
            i += 1;
        }
        if !has_digit {
            return false;
        }
    }
    if i == len {
        return false;
    }
    match bytes[i] {
        b'Z' | b'z' => i == len - 1 && (ss != 60 || (hh == 23 && mm == 59)),
        b'+' | b'-' => {
            if len - i != 6 {
                return false;
            }
            let sign = bytes[i];
            i += 1;
            if !bytes[i].is_ascii_digit()
                || !bytes[i + 1].is_ascii_digit()
                || bytes[i + 2] != b':'
                || !bytes[i + 3].is_ascii_digit()
                || !bytes[i + 4].is_ascii_digit()
            {
                return false;
            }
            let offset_hh = (bytes[i] - b'0') * 10 + (bytes[i + 1] - b'0');
            let offset_mm = (bytes[i + 3] - b'0') * 10 + (bytes[i + 4] - b'0');
            if offset_hh > 23 || offset_mm > 59 {
                return false;
            }
            if ss == 60 {
                let mut utc_hh = i32::from(hh);
                let mut utc_mm = i32::from(mm);
                if sign == b'+' {
                    utc_hh -= i32::from(offset_hh);
                    utc_mm -= i32::from(offset_mm);
                } else {
                    utc_hh += i32::from(offset_hh);
                    utc_mm += i32::from(offset_mm);
                }
                utc_hh += utc_mm.div_euclid(60);
                utc_mm = utc_mm.rem_euclid(60);
                utc_hh = (utc_hh + 24) % 24;
                utc_hh == 23 && utc_mm == 59
            } else {
                true
            }
        }
        _ => false,
    }
}

fn is_valid_date_time(value: &str) -> bool {
    let Some(sep) = value.find(['T', 't', ' ']) else {
        return false;
    };
    is_valid_date(&value[..sep]) && is_valid_time(&value[sep + 1..])
}
