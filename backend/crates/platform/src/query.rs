//! URL Query-String Helpers
//!
//! Minimal query-string reading and rewriting, in the same hand-parsed
//! style as the cookie utilities. Only the subset of percent-encoding the
//! gateway needs: `application/x-www-form-urlencoded` values, `+` as
//! space on decode.

/// Look up a query parameter by name, percent-decoding the value
///
/// `query` is the raw query string without the leading `?`. The first
/// matching parameter wins. A parameter without `=` reads as an empty
/// value.
pub fn get_param(query: &str, name: &str) -> Option<String> {
    if query.is_empty() {
        return None;
    }

    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));

        if percent_decode(key) == name {
            Some(percent_decode(value))
        } else {
            None
        }
    })
}

/// Rebuild a query string with every occurrence of one parameter removed
///
/// Remaining pairs keep their original encoding and order. Returns an
/// empty string when nothing is left.
pub fn strip_param(query: &str, name: &str) -> String {
    if query.is_empty() {
        return String::new();
    }

    query
        .split('&')
        .filter(|pair| {
            let key = pair.split_once('=').map_or(*pair, |(k, _)| k);
            percent_decode(key) != name
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Append parameters to a path, percent-encoding the values
///
/// Uses `?` or `&` depending on whether the path already carries a query.
pub fn append_params(path: &str, params: &[(&str, &str)]) -> String {
    let mut out = path.to_string();

    for (name, value) in params {
        out.push(if out.contains('?') { '&' } else { '?' });
        out.push_str(name);
        out.push('=');
        out.push_str(&percent_encode(value));
    }

    out
}

/// Decode percent-escapes and `+` (as space)
///
/// Invalid escapes pass through untouched rather than failing; query
/// strings arrive from the wild and a bad escape is not worth a 400 here.
pub fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                if let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                    out.push((hi << 4) | lo);
                    i += 3;
                    continue;
                }
                out.push(b'%');
                i += 1;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Encode everything outside the RFC 3986 unreserved set
pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());

    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push_str(&format!("%{:02X}", b));
            }
        }
    }

    out
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
