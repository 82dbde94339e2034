/// Left-pads `value` with `pad` until it is `target_len` characters long.
///
/// Returns the value unchanged if it already meets or exceeds the target.
pub fn lpad(value: &str, target_len: usize, pad: char) -> String {
    let len = value.chars().count();
    if len >= target_len {
        return value.to_string();
    }
    let mut result = String::with_capacity(target_len);
    for _ in len..target_len {
        result.push(pad);
    }
    result.push_str(value);
    result
}

/// Right-pads `value` with `pad` until it is `target_len` characters long.
///
/// Returns the value unchanged if it already meets or exceeds the target.
pub fn rpad(value: &str, target_len: usize, pad: char) -> String {
    let len = value.chars().count();
    let mut result = String::with_capacity(target_len.max(len));
    result.push_str(value);
    for _ in len..target_len {
        result.push(pad);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lpad_short_value() {
        assert_eq!(lpad("101", 8, '0'), "00000101");
    }

    #[test]
    fn test_lpad_exact_length() {
        assert_eq!(lpad("1010", 4, '0'), "1010");
    }

    #[test]
    fn test_lpad_longer_than_target() {
        assert_eq!(lpad("101010", 4, '0'), "101010");
    }

    #[test]
    fn test_rpad_short_value() {
        assert_eq!(rpad("11", 6, '0'), "110000");
    }

    #[test]
    fn test_rpad_exact_length() {
        assert_eq!(rpad("110011", 6, '0'), "110011");
    }

    #[test]
    fn test_rpad_longer_than_target() {
        assert_eq!(rpad("110011", 2, '0'), "110011");
    }

    #[test]
    fn test_pad_empty_value() {
        assert_eq!(lpad("", 3, '='), "===");
        assert_eq!(rpad("", 3, '='), "===");
    }
}
